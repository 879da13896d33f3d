//! Terminal output of highlighted lines using crossterm

use std::io::{self, Write};

use crossterm::{
    cursor, execute, queue,
    style::{Attribute, Color as TermColor, Print, SetAttribute, SetForegroundColor},
};
use unicode_width::UnicodeWidthChar;

use crate::config::Config;
use crate::error::Result;
use crate::syntax::{BusyIndicator, HighlightResult, Palette, Style};

/// Writes highlighted lines as styled terminal text
#[derive(Debug, Clone)]
pub struct Renderer {
    /// Tab width for display
    pub tab_width: usize,
    /// Whether to prefix line numbers
    pub show_line_numbers: bool,
    /// Clip lines to this many columns
    pub max_width: Option<usize>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Renderer {
    /// Renderer with the display settings of a config
    pub fn from_config(config: &Config) -> Self {
        Self {
            tab_width: config.tab_width.max(1),
            show_line_numbers: config.show_line_numbers,
            max_width: config.max_width,
        }
    }

    /// Render a whole document
    pub fn render<W: Write, S: AsRef<str>>(
        &self,
        out: &mut W,
        lines: &[S],
        results: &[HighlightResult],
        palette: &Palette,
    ) -> Result<()> {
        let gutter = lines.len().to_string().len();
        for (idx, (line, result)) in lines.iter().zip(results).enumerate() {
            if self.show_line_numbers {
                queue!(
                    out,
                    SetAttribute(Attribute::Dim),
                    Print(format!("{:>width$} ", idx + 1, width = gutter)),
                    SetAttribute(Attribute::Reset)
                )?;
            }
            self.render_line(out, line.as_ref(), result, palette)?;
            queue!(out, Print("\n"))?;
        }
        out.flush()?;
        Ok(())
    }

    /// Render one line, span by span
    pub fn render_line<W: Write>(
        &self,
        out: &mut W,
        text: &str,
        result: &HighlightResult,
        palette: &Palette,
    ) -> Result<()> {
        let max_cols = self.max_width.unwrap_or(usize::MAX);
        let mut col = 0;

        for (span, style) in result.styled(palette) {
            let Some(chunk) = text.get(span.start..span.end) else {
                continue;
            };
            let (display, width) = self.layout(chunk, col, max_cols);
            if !display.is_empty() {
                apply_style(out, &style)?;
                queue!(out, Print(display), SetAttribute(Attribute::Reset))?;
            }
            col += width;
            if col >= max_cols {
                break;
            }
        }
        Ok(())
    }

    /// Print each line prefixed with its residual block state
    pub fn render_states<W: Write, S: AsRef<str>>(
        &self,
        out: &mut W,
        lines: &[S],
        results: &[HighlightResult],
    ) -> Result<()> {
        for (line, result) in lines.iter().zip(results) {
            writeln!(out, "{} {}", result.end_state.to_block_state(), line.as_ref())?;
        }
        out.flush()?;
        Ok(())
    }

    /// Expand tabs starting at column `col` and clip at `max_cols`
    ///
    /// Returns the display text and its width in columns.
    fn layout(&self, chunk: &str, col: usize, max_cols: usize) -> (String, usize) {
        let expanded = self.expand_tabs(chunk, col);
        let display = truncate_to_width(&expanded, max_cols.saturating_sub(col));
        let width = display_width(&display);
        (display, width)
    }

    /// Replace tabs with spaces up to the next tab stop
    fn expand_tabs(&self, chunk: &str, col: usize) -> String {
        let mut result = String::with_capacity(chunk.len());
        let tab_width = self.tab_width.max(1);
        let mut at = col;
        for ch in chunk.chars() {
            if ch == '\t' {
                let spaces = tab_width - at % tab_width;
                result.extend(std::iter::repeat(' ').take(spaces));
                at += spaces;
            } else {
                result.push(ch);
                at += char_width(ch);
            }
        }
        result
    }
}

fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Queue the commands selecting a style
fn apply_style<W: Write>(out: &mut W, style: &Style) -> io::Result<()> {
    let fg = TermColor::Rgb {
        r: style.fg.r,
        g: style.fg.g,
        b: style.fg.b,
    };
    queue!(out, SetForegroundColor(fg))?;
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.italic {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    Ok(())
}

/// Truncate a string to fit within a display width
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = char_width(ch);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result
}

/// Hides the terminal cursor while a whole document is re-highlighted
///
/// Only use it on a terminal: the escape sequences go to `out`.
#[derive(Debug)]
pub struct TerminalBusy<W: Write> {
    out: W,
}

impl<W: Write> TerminalBusy<W> {
    /// Indicator writing to `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> BusyIndicator for TerminalBusy<W> {
    fn begin(&mut self) {
        let _ = execute!(self.out, cursor::Hide);
    }

    fn end(&mut self) {
        let _ = execute!(self.out, cursor::Show);
    }
}
