//! Progress-driven typing reveal.
//!
//! A frame borrows the full text and exposes the prefix that is visible at a
//! given progress. Counting is by Unicode scalar value, so a multi-byte
//! character is never split.

use crate::highlight::{plain_text, ColoredChar};
use crate::scroll::clamp_unit;

/// Default cursor glyph in the terminal.
pub const TERMINAL_CURSOR: char = '▋';

/// Default cursor glyph in HTML output.
pub const HTML_CURSOR: char = '|';

/// Number of characters out of `total` visible at `progress`.
///
/// Exact at both ends: 0 shows nothing, 1 (or more) shows everything.
pub fn visible_len(total: usize, progress: f64) -> usize {
    let progress = clamp_unit(progress);
    if progress >= 1.0 {
        return total;
    }
    ((total as f64 * progress).floor() as usize).min(total)
}

fn cursor_for(show_cursor: bool, cursor_char: char, progress: f64) -> Option<char> {
    (show_cursor && clamp_unit(progress) < 1.0).then_some(cursor_char)
}

/// Reveal settings shared by every frame a component renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingRenderer {
    pub show_cursor: bool,
    pub cursor_char: char,
}

impl Default for TypingRenderer {
    fn default() -> Self {
        Self {
            show_cursor: true,
            cursor_char: TERMINAL_CURSOR,
        }
    }
}

impl TypingRenderer {
    pub fn new(show_cursor: bool, cursor_char: char) -> Self {
        Self {
            show_cursor,
            cursor_char,
        }
    }

    pub fn render<'a>(&self, text: &'a str, progress: f64) -> TypingFrame<'a> {
        let count = visible_len(text.chars().count(), progress);
        let end = text
            .char_indices()
            .nth(count)
            .map_or(text.len(), |(idx, _)| idx);
        TypingFrame {
            text,
            end,
            cursor: cursor_for(self.show_cursor, self.cursor_char, progress),
        }
    }

    pub fn render_colored<'a>(&self, chars: &'a [ColoredChar], progress: f64) -> ColoredFrame<'a> {
        ColoredFrame {
            chars,
            visible: visible_len(chars.len(), progress),
            cursor: cursor_for(self.show_cursor, self.cursor_char, progress),
        }
    }
}

/// Render `text` with the terminal cursor glyph.
pub fn render(text: &str, progress: f64, show_cursor: bool) -> TypingFrame<'_> {
    TypingRenderer::new(show_cursor, TERMINAL_CURSOR).render(text, progress)
}

/// Render a colored sequence with the terminal cursor glyph.
pub fn render_colored(chars: &[ColoredChar], progress: f64, show_cursor: bool) -> ColoredFrame<'_> {
    TypingRenderer::new(show_cursor, TERMINAL_CURSOR).render_colored(chars, progress)
}

/// Plain-text reveal at one progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingFrame<'a> {
    text: &'a str,
    end: usize,
    cursor: Option<char>,
}

impl<'a> TypingFrame<'a> {
    pub fn visible(&self) -> &'a str {
        &self.text[..self.end]
    }

    /// Visible text split at line breaks.
    pub fn lines(&self) -> impl Iterator<Item = &'a str> {
        self.visible().split('\n')
    }

    /// Line breaks within the visible prefix.
    pub fn line_breaks(&self) -> usize {
        self.visible().matches('\n').count()
    }

    /// Cursor glyph to draw right after the visible prefix.
    pub fn cursor(&self) -> Option<char> {
        self.cursor
    }

    /// Full text, for assistive technology.
    pub fn accessible_label(&self) -> &'a str {
        self.text
    }

    /// The partial rendering is decoration; the label carries the meaning.
    pub fn decorative(&self) -> bool {
        true
    }

    pub fn is_complete(&self) -> bool {
        self.end == self.text.len()
    }
}

/// Colored reveal at one progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColoredFrame<'a> {
    chars: &'a [ColoredChar],
    visible: usize,
    cursor: Option<char>,
}

impl<'a> ColoredFrame<'a> {
    pub fn visible(&self) -> &'a [ColoredChar] {
        &self.chars[..self.visible]
    }

    /// Visible characters grouped into lines. Newline characters are dropped.
    pub fn lines(&self) -> impl Iterator<Item = &'a [ColoredChar]> {
        self.visible().split(ColoredChar::is_newline)
    }

    pub fn line_breaks(&self) -> usize {
        self.visible().iter().filter(|c| c.is_newline()).count()
    }

    pub fn cursor(&self) -> Option<char> {
        self.cursor
    }

    pub fn visible_text(&self) -> String {
        plain_text(self.visible())
    }

    pub fn accessible_label(&self) -> String {
        plain_text(self.chars)
    }

    pub fn decorative(&self) -> bool {
        true
    }

    pub fn is_complete(&self) -> bool {
        self.visible == self.chars.len()
    }
}
