//! Per-line residual state and highlight results

use super::palette::Palette;
use super::style::{Span, Style};
use super::tokens::TokenType;

/// Lexical context carried from one line to the next
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LineState {
    /// Outside any string
    #[default]
    Normal,
    /// Inside a triple-quoted string left open by an earlier line
    InsideString,
}

impl LineState {
    /// Block state value for a line that was never highlighted
    pub const UNSET: i32 = -1;

    /// Check if we're inside a multi-line string
    pub fn is_inside_string(&self) -> bool {
        *self == LineState::InsideString
    }

    /// Integer block state (0 = normal, 1 = inside string)
    pub fn to_block_state(self) -> i32 {
        match self {
            LineState::Normal => 0,
            LineState::InsideString => 1,
        }
    }

    /// Read an integer block state; anything but 1 is normal
    pub fn from_block_state(value: i32) -> Self {
        if value == 1 {
            LineState::InsideString
        } else {
            LineState::Normal
        }
    }
}

/// Result of highlighting a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightResult {
    /// Contiguous spans covering the whole line
    pub spans: Vec<Span>,
    /// State at end of line (for next line)
    pub end_state: LineState,
}

impl HighlightResult {
    /// Category at a byte position
    pub fn token_at(&self, pos: usize) -> Option<TokenType> {
        self.spans.iter().find(|s| s.contains(pos)).map(|s| s.token)
    }

    /// Spans with their display styles
    pub fn styled<'a>(&'a self, palette: &'a Palette) -> impl Iterator<Item = (Span, Style)> + 'a {
        self.spans.iter().map(move |span| (*span, palette.style(span.token)))
    }
}

/// Per-byte paint buffer for one line
///
/// Later paints override earlier ones, like formats applied to a text
/// block one after another.
#[derive(Debug)]
pub(crate) struct LineFormat {
    cells: Vec<TokenType>,
}

impl LineFormat {
    /// Buffer for a line of `len` bytes, painted normal
    pub fn new(len: usize) -> Self {
        Self {
            cells: vec![TokenType::Normal; len],
        }
    }

    /// Paint `start..end`, clamped to the line
    pub fn paint(&mut self, start: usize, end: usize, token: TokenType) {
        let end = end.min(self.cells.len());
        if start < end {
            self.cells[start..end].fill(token);
        }
    }

    /// Merge runs of equal categories into spans
    pub fn into_spans(self) -> Vec<Span> {
        let mut spans: Vec<Span> = Vec::new();
        for (pos, token) in self.cells.into_iter().enumerate() {
            match spans.last_mut() {
                Some(last) if last.token == token => last.end = pos + 1,
                _ => spans.push(Span::new(pos, pos + 1, token)),
            }
        }
        spans
    }
}
