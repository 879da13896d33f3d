//! Composite pattern compiler
//!
//! All Python token rules are joined into one regular expression made of
//! named alternatives. Alternatives are tried leftmost-first, so their
//! order is their precedence when several could match at one position.

use std::sync::OnceLock;

use log::debug;
use regex::{Captures, Regex};

use crate::error::Result;
use super::lexicon;
use super::tokens::TokenType;

/// Named alternatives, in precedence order
const GROUPS: [TokenType; 8] = [
    TokenType::Instance,
    TokenType::Keyword,
    TokenType::Builtin,
    TokenType::Comment,
    TokenType::MultilineString,
    TokenType::String,
    TokenType::Number,
    TokenType::Sync,
];

/// Optional string prefix
const PREFIX: &str = r"(?:\b[rRuU])?";

const NUMBER_FORMS: [&str; 3] = [
    r"\b[+-]?[0-9]+[lL]?\b",
    r"\b[+-]?0[xX][0-9A-Fa-f]+[lL]?\b",
    r"\b[+-]?[0-9]+(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?\b",
];

/// Named group pattern matching any of the alternates
fn named_group(token: TokenType, alternates: &[String]) -> String {
    format!("(?P<{}>{})", token.name(), alternates.join("|"))
}

/// Body of a triple-quoted string: never contains three `quote`s in a row
fn triple_body(quote: char) -> String {
    format!(r"(?:{q}{{0,2}}(?:\\.|[^{q}\\]))*", q = quote)
}

/// Triple-quoted string left open until the end of the line
fn open_triple(quote: char) -> String {
    let delim = quote.to_string().repeat(3);
    format!(
        r"{PREFIX}{delim}{body}{q}{{0,2}}\\?$",
        body = triple_body(quote),
        q = quote
    )
}

/// Triple-quoted string, closing delimiter optional
fn closed_triple(quote: char) -> String {
    let delim = quote.to_string().repeat(3);
    format!(r"{PREFIX}{delim}{body}(?:{delim})?", body = triple_body(quote))
}

/// Single-quoted string, closing quote optional
fn quoted(quote: char) -> String {
    format!(
        r"{PREFIX}{q}[^{q}\\\n]*(?:\\.[^{q}\\\n]*)*{q}?",
        q = quote
    )
}

/// Build the full composite pattern source
pub fn python_pattern_source(keywords: &[&str], builtins: &[&str]) -> String {
    let escaped = |words: &[&str]| -> Vec<String> {
        words.iter().map(|w| regex::escape(w)).collect()
    };

    let instance = named_group(TokenType::Instance, &[r"\bself\b".to_string()]);
    let kw = format!(r"\b{}\b", named_group(TokenType::Keyword, &escaped(keywords)));
    let builtin = format!(
        r#"(?:[^.'"\\#]\b|^){}\b"#,
        named_group(TokenType::Builtin, &escaped(builtins))
    );
    let comment = named_group(TokenType::Comment, &[r"#[^\n]*".to_string()]);
    let multiline_string = named_group(
        TokenType::MultilineString,
        &[open_triple('\''), open_triple('"')],
    );
    let string = named_group(
        TokenType::String,
        &[
            closed_triple('\''),
            closed_triple('"'),
            quoted('\''),
            quoted('"'),
        ],
    );
    let number = named_group(
        TokenType::Number,
        &NUMBER_FORMS.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
    );
    let sync = named_group(TokenType::Sync, &[r"\n".to_string()]);

    format!(
        "(?s){}",
        [instance, kw, builtin, comment, multiline_string, string, number, sync].join("|")
    )
}

/// One match of the composite pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenMatch {
    /// Start of the whole match
    pub start: usize,
    /// End of the whole match (next search starts here)
    pub end: usize,
    /// Category of the named group that fired
    pub token: TokenType,
    /// Span of the named group
    pub value_start: usize,
    pub value_end: usize,
}

impl TokenMatch {
    /// Matched text of the named group
    pub fn value<'t>(&self, text: &'t str) -> &'t str {
        &text[self.value_start..self.value_end]
    }
}

/// Compiled composite pattern plus the two lookahead helpers
#[derive(Debug)]
pub struct CompositePattern {
    prog: Regex,
    identifier: Regex,
    alias: Regex,
}

impl CompositePattern {
    /// Compile from explicit keyword and builtin name sets
    pub fn compile(keywords: &[&str], builtins: &[&str]) -> Result<Self> {
        let source = python_pattern_source(keywords, builtins);
        let prog = Regex::new(&source)?;
        debug!(
            "Compiled composite pattern ({} keywords, {} builtins, {} bytes)",
            keywords.len(),
            builtins.len(),
            source.len()
        );

        Ok(Self {
            prog,
            identifier: Regex::new(r"^\s+(\w+)")?,
            alias: Regex::new(r"\bas\b")?,
        })
    }

    /// Process-wide pattern built from the Python lexicon
    pub fn python() -> &'static CompositePattern {
        static PYTHON: OnceLock<CompositePattern> = OnceLock::new();
        PYTHON.get_or_init(|| {
            Self::compile(lexicon::KEYWORDS, lexicon::builtins())
                .expect("built-in Python pattern compiles")
        })
    }

    /// Pattern source
    pub fn as_str(&self) -> &str {
        self.prog.as_str()
    }

    /// Find the next token at or after `start`
    pub fn find_at(&self, text: &str, start: usize) -> Option<TokenMatch> {
        if start > text.len() {
            return None;
        }
        let caps = self.prog.captures_at(text, start)?;
        let whole = caps.get(0)?;
        let (token, value_start, value_end) = fired_group(&caps).unwrap_or((
            TokenType::Normal,
            whole.start(),
            whole.end(),
        ));

        Some(TokenMatch {
            start: whole.start(),
            end: whole.end(),
            token,
            value_start,
            value_end,
        })
    }

    /// Identifier following a definition keyword ending at `pos`
    pub fn definition_name(&self, text: &str, pos: usize) -> Option<(usize, usize)> {
        let rest = text.get(pos..)?;
        let name = self.identifier.captures(rest)?.get(1)?;
        Some((pos + name.start(), pos + name.end()))
    }

    /// Every `as` between `pos` and the first `#` of the line
    pub fn aliases(&self, text: &str, pos: usize) -> Vec<(usize, usize)> {
        let endpos = text.find('#').unwrap_or(text.len());
        if pos > endpos {
            return Vec::new();
        }
        let scope = &text[..endpos];

        let mut found = Vec::new();
        let mut at = pos;
        while let Some(m) = self.alias.find_at(scope, at) {
            found.push((m.start(), m.end()));
            at = m.end();
        }
        found
    }
}

/// The single named group with a non-empty capture
fn fired_group(caps: &Captures) -> Option<(TokenType, usize, usize)> {
    GROUPS.iter().find_map(|&token| {
        caps.name(token.name())
            .filter(|m| !m.as_str().is_empty())
            .map(|m| (token, m.start(), m.end()))
    })
}
