//! Line highlighter
//!
//! Tokenizes one line of Python at a time with the composite pattern.
//! The only context carried between lines is whether a triple-quoted
//! string is still open ([`LineState`]).

use super::lexicon;
use super::palette::Palette;
use super::pattern::CompositePattern;
use super::state::{HighlightResult, LineFormat, LineState};
use super::tokens::TokenType;

/// Python syntax highlighter
#[derive(Debug, Clone)]
pub struct Highlighter<'p> {
    pattern: &'p CompositePattern,
    palette: Palette,
}

impl Highlighter<'static> {
    /// Highlighter using the built-in Python pattern
    pub fn new(palette: Palette) -> Self {
        Self::with_pattern(CompositePattern::python(), palette)
    }
}

impl Default for Highlighter<'static> {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

impl<'p> Highlighter<'p> {
    /// Highlighter using a custom composite pattern
    pub fn with_pattern(pattern: &'p CompositePattern, palette: Palette) -> Self {
        Self { pattern, palette }
    }

    /// Colour scheme used to resolve styles
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Switch colour scheme
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Highlight a single line
    ///
    /// Takes the line text and the state left by the previous line.
    /// Returns spans covering the line and the state for the next line.
    pub fn highlight_line(&self, text: &str, prev_state: LineState) -> HighlightResult {
        let mut format = LineFormat::new(text.len());
        let mut inside_string = prev_state.is_inside_string();
        if inside_string {
            format.paint(0, text.len(), TokenType::String);
        }

        let mut pos = 0;
        while let Some(m) = self.pattern.find_at(text, pos) {
            if m.token != TokenType::Normal {
                if inside_string {
                    format.paint(m.value_start, m.value_end, TokenType::String);
                } else {
                    format.paint(m.value_start, m.value_end, m.token);
                    if m.token == TokenType::Keyword {
                        self.refine_keyword(text, m.value(text), m.value_end, &mut format);
                    }
                }

                if m.token == TokenType::MultilineString {
                    inside_string = !inside_string;
                }
            }

            // An empty match must still move the scan forward
            pos = if m.end > m.start {
                m.end
            } else {
                match text[m.end..].chars().next() {
                    Some(ch) => m.end + ch.len_utf8(),
                    None => break,
                }
            };
        }

        HighlightResult {
            spans: format.into_spans(),
            end_state: if inside_string {
                LineState::InsideString
            } else {
                LineState::Normal
            },
        }
    }

    /// Highlight consecutive lines, threading the state through
    pub fn highlight_lines<'a, I>(&self, lines: I, initial: LineState) -> Vec<HighlightResult>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut state = initial;
        lines
            .into_iter()
            .map(|line| {
                let result = self.highlight_line(line, state);
                state = result.end_state;
                result
            })
            .collect()
    }

    /// Contextual styling after `def`, `class` and `import`
    fn refine_keyword(&self, text: &str, keyword: &str, end: usize, format: &mut LineFormat) {
        if lexicon::is_definition_keyword(keyword) {
            if let Some((start, name_end)) = self.pattern.definition_name(text, end) {
                format.paint(start, name_end, TokenType::Definition);
            }
        } else if lexicon::is_import_keyword(keyword) {
            // Approximation: an `as` inside a string literal is coloured too
            for (start, as_end) in self.pattern.aliases(text, end) {
                format.paint(start, as_end, TokenType::Keyword);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::style::Span;

    fn highlight(text: &str, prev: LineState) -> HighlightResult {
        Highlighter::default().highlight_line(text, prev)
    }

    /// Category of the first occurrence of `needle` (checked over its whole length)
    fn token_of(text: &str, result: &HighlightResult, needle: &str) -> TokenType {
        let start = text.find(needle).unwrap();
        let token = result.token_at(start).unwrap();
        for pos in start..start + needle.len() {
            assert_eq!(result.token_at(pos), Some(token), "mixed categories in {needle:?}");
        }
        token
    }

    fn assert_covers(text: &str, result: &HighlightResult) {
        let mut pos = 0;
        for span in &result.spans {
            assert_eq!(span.start, pos);
            assert!(!span.is_empty());
            pos = span.end;
        }
        assert_eq!(pos, text.len());
    }

    #[test]
    fn test_def_definition() {
        let text = "def foo():";
        let result = highlight(text, LineState::Normal);
        assert_eq!(token_of(text, &result, "def"), TokenType::Keyword);
        assert_eq!(token_of(text, &result, "foo"), TokenType::Definition);
        assert_eq!(token_of(text, &result, "():"), TokenType::Normal);
        assert_eq!(result.end_state, LineState::Normal);
    }

    #[test]
    fn test_class_definition() {
        let text = "class Spam(object):";
        let result = highlight(text, LineState::Normal);
        assert_eq!(token_of(text, &result, "class"), TokenType::Keyword);
        assert_eq!(token_of(text, &result, "Spam"), TokenType::Definition);
        assert_eq!(token_of(text, &result, "object"), TokenType::Builtin);
    }

    #[test]
    fn test_import_as() {
        let text = "import os as o  # as trick";
        let result = highlight(text, LineState::Normal);
        assert_eq!(token_of(text, &result, "import"), TokenType::Keyword);
        assert_eq!(result.token_at(10), Some(TokenType::Keyword));
        assert_eq!(result.token_at(11), Some(TokenType::Keyword));
        assert_eq!(token_of(text, &result, "# as trick"), TokenType::Comment);
        assert_covers(text, &result);
    }

    #[test]
    fn test_import_alias_inside_later_string() {
        let text = "import x; y = ' as '";
        let result = highlight(text, LineState::Normal);
        // The string match comes after the alias scan and repaints it
        assert_eq!(token_of(text, &result, "' as '"), TokenType::String);
        assert_eq!(result.end_state, LineState::Normal);
    }

    #[test]
    fn test_builtin_instance_number_comment() {
        let text = "self.n = len(x) + 0x1F  # done";
        let result = highlight(text, LineState::Normal);
        assert_eq!(token_of(text, &result, "self"), TokenType::Instance);
        assert_eq!(token_of(text, &result, "len"), TokenType::Builtin);
        assert_eq!(token_of(text, &result, "0x1F"), TokenType::Number);
        assert_eq!(token_of(text, &result, "# done"), TokenType::Comment);
        assert_eq!(token_of(text, &result, " = "), TokenType::Normal);
    }

    #[test]
    fn test_no_strings_stays_normal() {
        for text in ["x = 1", "", "    return self.value  # '''", "for i in range(10):"] {
            let result = highlight(text, LineState::Normal);
            assert_eq!(result.end_state, LineState::Normal, "{text:?}");
        }
    }

    #[test]
    fn test_closed_strings_stay_normal() {
        for text in [r#"s = "a" + 'b'"#, r#"doc = """one line""""#, "t = '''x''' + 1"] {
            let result = highlight(text, LineState::Normal);
            assert_eq!(result.end_state, LineState::Normal, "{text:?}");
        }
    }

    #[test]
    fn test_multiline_string() {
        let hl = Highlighter::default();

        let first = hl.highlight_line(r#"x = """start of doc"#, LineState::Normal);
        assert_eq!(first.end_state, LineState::InsideString);
        assert_eq!(first.token_at(4), Some(TokenType::MultilineString));

        let middle_text = "def if self 42 # not code";
        let middle = hl.highlight_line(middle_text, first.end_state);
        assert_eq!(middle.end_state, LineState::InsideString);
        assert_eq!(
            middle.spans,
            vec![Span::new(0, middle_text.len(), TokenType::String)]
        );

        let last = hl.highlight_line(r#"end of doc""""#, middle.end_state);
        assert_eq!(last.end_state, LineState::Normal);
        assert!(last.spans.iter().all(|s| s.token == TokenType::String));
    }

    #[test]
    fn test_inside_string_empty_line() {
        let result = highlight("", LineState::InsideString);
        assert!(result.spans.is_empty());
        assert_eq!(result.end_state, LineState::InsideString);
    }

    #[test]
    fn test_single_quote_docstring() {
        let hl = Highlighter::default();
        let results = hl.highlight_lines(["'''", "body", "'''", "x = 1"], LineState::Normal);
        let states: Vec<_> = results.iter().map(|r| r.end_state).collect();
        assert_eq!(
            states,
            vec![
                LineState::InsideString,
                LineState::InsideString,
                LineState::Normal,
                LineState::Normal,
            ]
        );
        assert_eq!(results[3].token_at(4), Some(TokenType::Number));
    }

    #[test]
    fn test_unterminated_single_quote() {
        let text = "print('half";
        let result = highlight(text, LineState::Normal);
        assert_eq!(token_of(text, &result, "print"), TokenType::Builtin);
        assert_eq!(token_of(text, &result, "'half"), TokenType::String);
        assert_eq!(result.end_state, LineState::Normal);
    }

    #[test]
    fn test_idempotent() {
        let hl = Highlighter::default();
        for (text, state) in [
            ("def f(a, b=2):  # c", LineState::Normal),
            ("still 'inside' here", LineState::InsideString),
            (r#"u"""open"#, LineState::Normal),
        ] {
            assert_eq!(hl.highlight_line(text, state), hl.highlight_line(text, state));
        }
    }

    #[test]
    fn test_non_ascii_text() {
        let text = "s = 'héllo'  # ünïcode";
        let result = highlight(text, LineState::Normal);
        assert_covers(text, &result);
        assert_eq!(token_of(text, &result, "'héllo'"), TokenType::String);
        assert_eq!(token_of(text, &result, "# ünïcode"), TokenType::Comment);
    }

    #[test]
    fn test_styles_from_palette() {
        let hl = Highlighter::new(Palette::preset("IDLE").unwrap());
        let result = hl.highlight_line("def f(): pass", LineState::Normal);
        let (span, style) = result.styled(hl.palette()).next().unwrap();
        assert_eq!(span.token, TokenType::Keyword);
        assert!(style.bold);
    }
}
