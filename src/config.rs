//! Configuration file support
//!
//! Loads settings from ~/.pysh.toml (or %USERPROFILE%\.pysh.toml on Windows)
//!
//! Example:
//! ```toml
//! color-scheme = "IDLE"
//! line-numbers = true
//! tab-width = 4
//! max-width = 120
//!
//! [schemes.Solarized]
//! NORMAL = "#657b83"
//! KEYWORD = { color = "#859900", bold = true }
//! ```
//!
//! Custom schemes start from the default preset, so only the
//! categories that differ need to be listed. The `PYSH_COLOR_SCHEME`
//! environment variable overrides `color-scheme`.

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use log::{debug, warn};
use toml::{Table, Value};

use crate::error::{Error, Result};
use crate::syntax::{Palette, Style, TokenType, DEFAULT_SCHEME};

/// Environment variable selecting the colour scheme
pub const SCHEME_ENV: &str = "PYSH_COLOR_SCHEME";

/// Configuration settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the colour scheme to use
    pub color_scheme: String,
    /// Whether to show line numbers
    pub show_line_numbers: bool,
    /// Tab width for display
    pub tab_width: usize,
    /// Clip lines to this many columns
    pub max_width: Option<usize>,
    /// Schemes defined in the config file
    pub schemes: Vec<Palette>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color_scheme: DEFAULT_SCHEME.to_string(),
            show_line_numbers: false,
            tab_width: 8,
            max_width: None,
            schemes: Vec::new(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".pysh.toml"))
        }

        #[cfg(not(windows))]
        {
            env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".pysh.toml"))
        }
    }

    /// Load configuration from the config file and environment
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => match fs::read_to_string(&path) {
                Ok(contents) => {
                    debug!("Loading config from {}", path.display());
                    Self::parse(&contents)?
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => Config::default(),
                Err(e) => return Err(e.into()),
            },
            None => Config::default(),
        };

        config.apply_env(env::var(SCHEME_ENV).ok());
        Ok(config)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let table: Table = contents.parse()?;
        let mut config = Config::default();

        for (key, value) in &table {
            match key.as_str() {
                "color-scheme" => {
                    config.color_scheme = expect_str(key, value)?.to_string();
                }
                "line-numbers" => {
                    config.show_line_numbers = value
                        .as_bool()
                        .ok_or_else(|| Error::Config(format!("{key} must be a boolean")))?;
                }
                "tab-width" => {
                    let n = expect_integer(key, value)?;
                    config.tab_width = n.clamp(1, 16) as usize; // Between 1 and 16
                }
                "max-width" => {
                    let n = expect_integer(key, value)?;
                    config.max_width = (n > 0).then_some(n as usize);
                }
                "schemes" => {
                    let schemes = value
                        .as_table()
                        .ok_or_else(|| Error::Config("schemes must be a table".to_string()))?;
                    for (name, rows) in schemes {
                        config.schemes.push(parse_scheme(name, rows)?);
                    }
                }
                other => warn!("Ignoring unknown config key: {}", other),
            }
        }

        Ok(config)
    }

    /// Apply an environment override of the colour scheme
    pub fn apply_env(&mut self, scheme: Option<String>) {
        if let Some(name) = scheme.filter(|s| !s.trim().is_empty()) {
            debug!("Color scheme {} selected by {}", name, SCHEME_ENV);
            self.color_scheme = name.trim().to_string();
        }
    }

    /// Resolve the selected colour scheme
    ///
    /// Schemes from the config file shadow presets of the same name.
    pub fn palette(&self) -> Result<Palette> {
        let custom = self
            .schemes
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(&self.color_scheme));
        match custom {
            Some(palette) => Ok(palette.clone()),
            None => Palette::preset(&self.color_scheme),
        }
    }

    /// Names of every selectable scheme
    pub fn scheme_names(&self) -> Vec<String> {
        Palette::preset_names()
            .map(str::to_string)
            .chain(self.schemes.iter().map(|p| p.name().to_string()))
            .collect()
    }
}

fn expect_str<'v>(key: &str, value: &'v Value) -> Result<&'v str> {
    value
        .as_str()
        .ok_or_else(|| Error::Config(format!("{key} must be a string")))
}

fn expect_integer(key: &str, value: &Value) -> Result<i64> {
    value
        .as_integer()
        .ok_or_else(|| Error::Config(format!("{key} must be an integer")))
}

/// Parse one `[schemes.NAME]` table
fn parse_scheme(name: &str, value: &Value) -> Result<Palette> {
    let rows = value
        .as_table()
        .ok_or_else(|| Error::Config(format!("scheme {name} must be a table")))?;

    let mut palette = Palette::default().derive(name);
    for (category, entry) in rows {
        let token = TokenType::from_name(category)
            .ok_or_else(|| Error::Config(format!("unknown category {category} in scheme {name}")))?;
        palette.set(token, parse_style(entry)?);
    }
    Ok(palette)
}

/// `"#rrggbb"` or `{ color = "#rrggbb", bold = true, italic = false }`
fn parse_style(value: &Value) -> Result<Style> {
    match value {
        Value::String(hex) => Ok(Style::fg(hex.parse()?)),
        Value::Table(table) => {
            let color = table
                .get("color")
                .and_then(Value::as_str)
                .ok_or_else(|| Error::Config("style needs a color".to_string()))?;
            let mut style = Style::fg(color.parse()?);
            style.bold = table.get("bold").and_then(Value::as_bool).unwrap_or(false);
            style.italic = table.get("italic").and_then(Value::as_bool).unwrap_or(false);
            Ok(style)
        }
        _ => Err(Error::Config("style must be a color or a table".to_string())),
    }
}
