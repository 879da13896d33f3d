//! Token categories for Python highlighting
//!
//! The category names double as the named groups of the composite
//! pattern and as the keys of colour scheme tables.

/// Semantic token categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Plain text
    Normal,
    /// Language keywords (def, import, while, ...)
    Keyword,
    /// Names from the builtin namespace (len, print, ValueError, ...)
    Builtin,
    /// Identifier introduced by `def` or `class`
    Definition,
    /// `#` comments
    Comment,
    /// String literals closed on their line
    String,
    /// Opening or closing of a triple-quoted string spanning lines
    MultilineString,
    /// Numeric literals
    Number,
    /// `self`
    Instance,
    /// Newline sentinel
    Sync,
}

impl TokenType {
    /// All categories
    pub const ALL: [TokenType; 10] = [
        TokenType::Normal,
        TokenType::Keyword,
        TokenType::Builtin,
        TokenType::Definition,
        TokenType::Comment,
        TokenType::String,
        TokenType::MultilineString,
        TokenType::Number,
        TokenType::Instance,
        TokenType::Sync,
    ];

    /// Get the canonical name (also the pattern group name)
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::Normal => "NORMAL",
            TokenType::Keyword => "KEYWORD",
            TokenType::Builtin => "BUILTIN",
            TokenType::Definition => "DEFINITION",
            TokenType::Comment => "COMMENT",
            TokenType::String => "STRING",
            TokenType::MultilineString => "ML_STRING",
            TokenType::Number => "NUMBER",
            TokenType::Instance => "INSTANCE",
            TokenType::Sync => "SYNC",
        }
    }

    /// Parse a category from its name (for scheme files)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "NORMAL" => Some(TokenType::Normal),
            "KEYWORD" => Some(TokenType::Keyword),
            "BUILTIN" => Some(TokenType::Builtin),
            "DEFINITION" => Some(TokenType::Definition),
            "COMMENT" => Some(TokenType::Comment),
            "STRING" => Some(TokenType::String),
            "ML_STRING" | "MULTILINE_STRING" => Some(TokenType::MultilineString),
            "NUMBER" => Some(TokenType::Number),
            "INSTANCE" => Some(TokenType::Instance),
            "SYNC" => Some(TokenType::Sync),
            _ => None,
        }
    }

    /// Category whose style this one is drawn with
    pub fn style_key(&self) -> TokenType {
        match self {
            TokenType::MultilineString => TokenType::String,
            TokenType::Sync => TokenType::Normal,
            other => *other,
        }
    }
}
