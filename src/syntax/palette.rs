//! Colour schemes
//!
//! A palette maps each styled category to a [`Style`]. The three
//! built-in presets are interchangeable and selected by name.

use std::collections::HashMap;

use crate::error::{Error, Result};
use super::style::Style;
use super::tokens::TokenType;

/// Categories a scheme assigns a style to, in table order
pub const STYLED: [TokenType; 8] = [
    TokenType::Normal,
    TokenType::Keyword,
    TokenType::Builtin,
    TokenType::Definition,
    TokenType::Comment,
    TokenType::String,
    TokenType::Number,
    TokenType::Instance,
];

/// Name of the scheme used when none is configured
pub const DEFAULT_SCHEME: &str = "Pydev";

/// (category, colour, bold, italic)
type SchemeRow = (TokenType, &'static str, bool, bool);

const IDLE: [SchemeRow; 8] = [
    (TokenType::Normal, "#000000", false, false),
    (TokenType::Keyword, "#ff7700", true, false),
    (TokenType::Builtin, "#900090", false, false),
    (TokenType::Definition, "#0000ff", false, false),
    (TokenType::Comment, "#dd0000", false, true),
    (TokenType::String, "#00aa00", false, false),
    (TokenType::Number, "#924900", false, false),
    (TokenType::Instance, "#777777", true, true),
];

const PYDEV: [SchemeRow; 8] = [
    (TokenType::Normal, "#000000", false, false),
    (TokenType::Keyword, "#0000FF", false, false),
    (TokenType::Builtin, "#900090", false, false),
    (TokenType::Definition, "#000000", true, false),
    (TokenType::Comment, "#C0C0C0", false, false),
    (TokenType::String, "#00AA00", false, true),
    (TokenType::Number, "#800000", false, false),
    (TokenType::Instance, "#000000", false, true),
];

const SCINTILLA: [SchemeRow; 8] = [
    (TokenType::Normal, "#000000", false, false),
    (TokenType::Keyword, "#00007F", true, false),
    (TokenType::Builtin, "#000000", false, false),
    (TokenType::Definition, "#007F7F", true, false),
    (TokenType::Comment, "#007F00", false, false),
    (TokenType::String, "#7F007F", false, false),
    (TokenType::Number, "#007F7F", false, false),
    (TokenType::Instance, "#000000", false, true),
];

static PRESETS: [(&str, &[SchemeRow; 8]); 3] =
    [("IDLE", &IDLE), ("Pydev", &PYDEV), ("Scintilla", &SCINTILLA)];

/// A named mapping from token category to display style
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    name: String,
    styles: HashMap<TokenType, Style>,
}

impl Palette {
    /// Names of the built-in schemes
    pub fn preset_names() -> impl Iterator<Item = &'static str> {
        PRESETS.iter().map(|(name, _)| *name)
    }

    /// Load a built-in scheme by name (case-insensitive)
    pub fn preset(name: &str) -> Result<Self> {
        let (preset_name, rows) = PRESETS
            .iter()
            .find(|(preset, _)| preset.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownScheme(name.to_string()))?;

        let mut styles = HashMap::new();
        for &(token, hex, bold, italic) in rows.iter() {
            let mut style = Style::fg(hex.parse()?);
            style.bold = bold;
            style.italic = italic;
            styles.insert(token, style);
        }

        Ok(Self {
            name: preset_name.to_string(),
            styles,
        })
    }

    /// The default scheme
    pub fn default_scheme() -> Self {
        // The preset tables are constant and valid
        Self::preset(DEFAULT_SCHEME).unwrap_or_else(|_| Self::plain(DEFAULT_SCHEME))
    }

    /// A scheme with every category in the default style
    fn plain(name: &str) -> Self {
        Self {
            name: name.to_string(),
            styles: STYLED.iter().map(|&t| (t, Style::default())).collect(),
        }
    }

    /// Derive a new scheme from this one
    pub fn derive(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            styles: self.styles.clone(),
        }
    }

    /// Scheme name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Override the style of one category
    pub fn set(&mut self, token: TokenType, style: Style) {
        self.styles.insert(token.style_key(), style);
    }

    /// Style used to draw a category
    pub fn style(&self, token: TokenType) -> Style {
        self.styles
            .get(&token.style_key())
            .copied()
            .unwrap_or_default()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::default_scheme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::style::Color;

    #[test]
    fn test_presets_load() {
        for name in Palette::preset_names() {
            let palette = Palette::preset(name).unwrap();
            assert_eq!(palette.name(), name);
        }
    }

    #[test]
    fn test_preset_case_insensitive() {
        assert_eq!(Palette::preset("idle").unwrap().name(), "IDLE");
        assert_eq!(Palette::preset("SCINTILLA").unwrap().name(), "Scintilla");
    }

    #[test]
    fn test_unknown_scheme() {
        assert!(matches!(
            Palette::preset("Monokai"),
            Err(Error::UnknownScheme(name)) if name == "Monokai"
        ));
    }

    #[test]
    fn test_default_is_pydev() {
        assert_eq!(Palette::default().name(), "Pydev");
    }

    #[test]
    fn test_idle_styles() {
        let palette = Palette::preset("IDLE").unwrap();
        let keyword = palette.style(TokenType::Keyword);
        assert_eq!(keyword.fg, Color::rgb(0xff, 0x77, 0x00));
        assert!(keyword.bold);
        assert!(!keyword.italic);

        let instance = palette.style(TokenType::Instance);
        assert!(instance.bold && instance.italic);
    }

    #[test]
    fn test_multiline_string_uses_string_style() {
        let palette = Palette::preset("Pydev").unwrap();
        assert_eq!(
            palette.style(TokenType::MultilineString),
            palette.style(TokenType::String)
        );
        assert_eq!(palette.style(TokenType::Sync), palette.style(TokenType::Normal));
    }

    #[test]
    fn test_derive_and_set() {
        let mut custom = Palette::preset("IDLE").unwrap().derive("Mine");
        custom.set(TokenType::Comment, Style::fg(Color::rgb(1, 2, 3)));
        assert_eq!(custom.name(), "Mine");
        assert_eq!(custom.style(TokenType::Comment).fg, Color::rgb(1, 2, 3));
        assert_eq!(
            custom.style(TokenType::Keyword),
            Palette::preset("IDLE").unwrap().style(TokenType::Keyword)
        );
    }
}
