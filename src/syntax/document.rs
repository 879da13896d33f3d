//! Whole-document highlighting
//!
//! Keeps one highlight result and one integer block state per line so
//! that an edit only re-highlights the lines whose incoming state
//! actually changed.

use log::debug;

use super::highlighter::Highlighter;
use super::state::{HighlightResult, LineState};
use super::style::Span;

/// Hooks run around a bulk re-highlight (e.g. a busy cursor)
pub trait BusyIndicator {
    /// Called before the first line is highlighted
    fn begin(&mut self);
    /// Called after the last line, even on early exit
    fn end(&mut self);
}

/// Indicator that does nothing
#[derive(Debug, Default)]
pub struct NoBusy;

impl BusyIndicator for NoBusy {
    fn begin(&mut self) {}
    fn end(&mut self) {}
}

/// Runs `end` when dropped
struct BusyGuard<'b> {
    indicator: &'b mut dyn BusyIndicator,
}

impl<'b> BusyGuard<'b> {
    fn new(indicator: &'b mut dyn BusyIndicator) -> Self {
        indicator.begin();
        Self { indicator }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.indicator.end();
    }
}

/// Per-document highlighting cache
pub struct DocumentHighlighter<'p> {
    highlighter: Highlighter<'p>,
    /// Residual block state per line (-1 = not computed)
    block_states: Vec<i32>,
    /// Cached spans per line (None = not computed)
    line_spans: Vec<Option<Vec<Span>>>,
}

impl<'p> DocumentHighlighter<'p> {
    /// Create an empty cache around a highlighter
    pub fn new(highlighter: Highlighter<'p>) -> Self {
        Self {
            highlighter,
            block_states: Vec::new(),
            line_spans: Vec::new(),
        }
    }

    /// The line highlighter
    pub fn highlighter(&self) -> &Highlighter<'p> {
        &self.highlighter
    }

    /// Number of lines the cache knows about
    pub fn len(&self) -> usize {
        self.block_states.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.block_states.is_empty()
    }

    /// Stored block state of a line (-1 if unknown)
    pub fn block_state(&self, idx: usize) -> i32 {
        self.block_states.get(idx).copied().unwrap_or(LineState::UNSET)
    }

    /// Cached spans of a line
    pub fn spans(&self, idx: usize) -> Option<&[Span]> {
        self.line_spans.get(idx).and_then(|s| s.as_deref())
    }

    /// State a line starts in
    fn incoming_state(&self, idx: usize) -> LineState {
        if idx == 0 {
            LineState::Normal
        } else {
            LineState::from_block_state(self.block_state(idx - 1))
        }
    }

    /// Ensure cache vectors are large enough
    fn ensure_size(&mut self, line_count: usize) {
        if self.block_states.len() < line_count {
            self.block_states.resize(line_count, LineState::UNSET);
        }
        if self.line_spans.len() < line_count {
            self.line_spans.resize(line_count, None);
        }
    }

    /// Highlight one line from the stored state of the line before it
    pub fn highlight_block(&mut self, idx: usize, text: &str) -> HighlightResult {
        self.ensure_size(idx + 1);
        let result = self.highlighter.highlight_line(text, self.incoming_state(idx));
        self.block_states[idx] = result.end_state.to_block_state();
        self.line_spans[idx] = Some(result.spans.clone());
        result
    }

    /// Re-highlight a whole document from the first line
    pub fn rehighlight<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        busy: &mut dyn BusyIndicator,
    ) -> Vec<HighlightResult> {
        let _guard = BusyGuard::new(busy);
        debug!("Re-highlighting {} lines", lines.len());

        self.invalidate_all();
        self.ensure_size(lines.len());
        lines
            .iter()
            .enumerate()
            .map(|(idx, line)| self.highlight_block(idx, line.as_ref()))
            .collect()
    }

    /// Refresh after an edit starting at line `from`
    ///
    /// Stops once a line ends in the same state as before and the next
    /// line is already cached. Returns the number of lines highlighted.
    /// Call [`invalidate_from`](Self::invalidate_from) first when lines
    /// were inserted or removed above the end of the document.
    pub fn update<S: AsRef<str>>(&mut self, lines: &[S], from: usize) -> usize {
        self.truncate(lines.len());
        self.ensure_size(lines.len());

        let mut count = 0;
        for idx in from..lines.len() {
            let before = self.block_states[idx];
            let result = self.highlight_block(idx, lines[idx].as_ref());
            count += 1;

            let next_cached = self.line_spans.get(idx + 1).is_some_and(|s| s.is_some());
            if before == result.end_state.to_block_state() && next_cached {
                break;
            }
        }

        debug!("Updated {} lines starting at line {}", count, from);
        count
    }

    /// Invalidate cache from a specific line onwards
    pub fn invalidate_from(&mut self, line: usize) {
        for idx in line..self.line_spans.len() {
            self.line_spans[idx] = None;
            self.block_states[idx] = LineState::UNSET;
        }
    }

    /// Invalidate entire cache
    pub fn invalidate_all(&mut self) {
        self.block_states.clear();
        self.line_spans.clear();
    }

    /// Forget lines past the end of a shortened document
    fn truncate(&mut self, line_count: usize) {
        self.block_states.truncate(line_count);
        self.line_spans.truncate(line_count);
    }
}

impl Default for DocumentHighlighter<'static> {
    fn default() -> Self {
        Self::new(Highlighter::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokens::TokenType;

    #[derive(Default)]
    struct Recorder {
        events: Vec<&'static str>,
    }

    impl BusyIndicator for Recorder {
        fn begin(&mut self) {
            self.events.push("begin");
        }
        fn end(&mut self) {
            self.events.push("end");
        }
    }

    const DOC: [&str; 5] = ["def f():", "    \"\"\"Doc", "    more", "    \"\"\"", "    return 1"];

    #[test]
    fn test_rehighlight_states() {
        let mut doc = DocumentHighlighter::default();
        let results = doc.rehighlight(&DOC, &mut NoBusy);
        assert_eq!(results.len(), 5);
        let states: Vec<i32> = (0..5).map(|i| doc.block_state(i)).collect();
        assert_eq!(states, vec![0, 1, 1, 0, 0]);
        assert_eq!(doc.block_state(5), LineState::UNSET);
    }

    #[test]
    fn test_rehighlight_busy_hooks() {
        let mut doc = DocumentHighlighter::default();
        let mut recorder = Recorder::default();
        doc.rehighlight(&DOC, &mut recorder);
        assert_eq!(recorder.events, vec!["begin", "end"]);
    }

    #[test]
    fn test_highlight_block_uses_previous_state() {
        let mut doc = DocumentHighlighter::default();
        doc.highlight_block(0, "'''");
        let result = doc.highlight_block(1, "x = 1");
        assert_eq!(result.end_state, LineState::InsideString);
        assert_eq!(result.token_at(4), Some(TokenType::String));
    }

    #[test]
    fn test_update_stops_when_state_settles() {
        let mut doc = DocumentHighlighter::default();
        let lines = ["a = 1", "b = 2", "c = 3", "d = 4"];
        doc.rehighlight(&lines, &mut NoBusy);

        let edited = ["a = 10", "b = 2", "c = 3", "d = 4"];
        assert_eq!(doc.update(&edited, 0), 1);
        assert_eq!(doc.spans(0).unwrap().last().unwrap().end, 6);
    }

    #[test]
    fn test_update_propagates_opened_string() {
        let mut doc = DocumentHighlighter::default();
        let lines = ["x = 1", "y = 2", "z = 3"];
        doc.rehighlight(&lines, &mut NoBusy);

        let edited = ["x = '''", "y = 2", "z = 3"];
        assert_eq!(doc.update(&edited, 0), 3);
        assert_eq!(doc.block_state(2), 1);
        assert!(doc.spans(2).unwrap().iter().all(|s| s.token == TokenType::String));
    }

    #[test]
    fn test_update_shrinks_document() {
        let mut doc = DocumentHighlighter::default();
        doc.rehighlight(&["a", "b", "c"], &mut NoBusy);
        doc.update(&["a"], 0);
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_invalidate_from() {
        let mut doc = DocumentHighlighter::default();
        doc.rehighlight(&DOC, &mut NoBusy);
        doc.invalidate_from(2);
        assert!(doc.spans(1).is_some());
        assert!(doc.spans(2).is_none());
        assert_eq!(doc.block_state(3), LineState::UNSET);
    }
}
