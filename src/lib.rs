//! pysh - line-oriented Python syntax highlighting
//!
//! Each line is tokenized on its own; the only context carried to the
//! next line is whether a triple-quoted string is still open.
//!
//! ```
//! use pysh::syntax::{Highlighter, LineState, TokenType};
//!
//! let highlighter = Highlighter::default();
//! let result = highlighter.highlight_line("def foo():", LineState::Normal);
//! assert_eq!(result.token_at(4), Some(TokenType::Definition));
//! assert_eq!(result.end_state, LineState::Normal);
//! ```

pub mod config;
pub mod error;
pub mod render;
pub mod syntax;

pub use error::{Error, Result};
