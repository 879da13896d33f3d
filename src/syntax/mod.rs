//! Python syntax highlighting
//!
//! This module provides the line tokenizer and its supporting pieces:
//! - Token categories and colour schemes
//! - The composite pattern built from the keyword and builtin tables
//! - The per-line highlighter and its residual state
//! - A per-document cache for block-by-block hosts

mod style;
mod tokens;
mod palette;
mod lexicon;
mod pattern;
mod state;
mod highlighter;
mod document;

pub use style::{Color, Span, Style};
pub use tokens::TokenType;
pub use palette::{Palette, DEFAULT_SCHEME};
pub use lexicon::{builtins, KEYWORDS, PYTHON_VERSION};
pub use pattern::{CompositePattern, TokenMatch};
pub use state::{HighlightResult, LineState};
pub use highlighter::Highlighter;
pub use document::{BusyIndicator, DocumentHighlighter, NoBusy};
