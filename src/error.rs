//! Error types for pysh

use thiserror::Error;

/// Result type alias for pysh operations
pub type Result<T> = std::result::Result<T, Error>;

/// Highlighter error types
///
/// Highlighting a line never fails; these cover configuration,
/// colour scheme loading, I/O and pattern construction.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unknown color scheme: {0}")]
    UnknownScheme(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("{0}")]
    Config(String),
}
