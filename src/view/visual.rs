//! Visual panel: the typing reveal of the active section's code, terminal
//! output or plain visual text.

use super::styles::PanelStyles;
use crate::highlight::ColoredChar;
use crate::typing::{ColoredFrame, TypingFrame};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// What the panel shows.
#[derive(Debug, Clone, Copy)]
pub enum VisualContent<'a> {
    /// No section, or a section without a visual.
    Empty,
    Colored(ColoredFrame<'a>),
    Plain(TypingFrame<'a>),
}

/// Split one line of colored characters into runs of equal style.
fn colored_spans<'a>(chars: &[ColoredChar], styles: &PanelStyles) -> Vec<Span<'a>> {
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_style = None;

    for ch in chars {
        let style = styles.char_style(ch);
        match run_style {
            Some(prev) if prev != style => {
                spans.push(Span::styled(std::mem::take(&mut run), prev));
            }
            _ => {}
        }
        run_style = Some(style);
        run.push(ch.ch);
    }
    if let Some(style) = run_style {
        spans.push(Span::styled(run, style));
    }
    spans
}

/// Rows for a frame, with the cursor appended to the last one.
pub fn frame_lines<'a>(content: &VisualContent<'_>, styles: &PanelStyles) -> Vec<Line<'a>> {
    let (mut lines, cursor): (Vec<Line<'a>>, Option<char>) = match content {
        VisualContent::Empty => return Vec::new(),
        VisualContent::Colored(frame) => (
            frame
                .lines()
                .map(|chars| Line::from(colored_spans(chars, styles)))
                .collect(),
            frame.cursor(),
        ),
        VisualContent::Plain(frame) => (
            frame
                .lines()
                .map(|text| Line::styled(text.to_string(), styles.body))
                .collect(),
            frame.cursor(),
        ),
    };

    if let (Some(cursor), Some(last)) = (cursor, lines.last_mut()) {
        last.push_span(Span::styled(cursor.to_string(), styles.cursor));
    }
    lines
}

/// Visual panel widget.
pub struct VisualPanel<'a> {
    content: VisualContent<'a>,
    title: &'a str,
    styles: &'a PanelStyles,
}

impl<'a> VisualPanel<'a> {
    pub fn new(content: VisualContent<'a>, title: &'a str, styles: &'a PanelStyles) -> Self {
        Self {
            content,
            title,
            styles,
        }
    }
}

impl Widget for VisualPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.title))
            .border_style(self.styles.muted);

        let lines = frame_lines(&self.content, self.styles);
        // Keep the line being typed in view.
        let inner_height = area.height.saturating_sub(2);
        let overflow = u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .saturating_sub(inner_height);

        Paragraph::new(lines)
            .block(block)
            .scroll((overflow, 0))
            .render(area, buf);
    }
}
