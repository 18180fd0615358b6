//! Narrative pane: the scrollable case-study text.
//!
//! [`NarrativeLayout`] wraps the project at a given width and records where
//! each section starts, which is what the [`Viewport`] measures against.

use super::styles::PanelStyles;
use crate::model::{Project, SectionId};
use crate::scroll::{SectionInfo, Viewport};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Greedy word wrap by display width.
///
/// Runs of whitespace collapse to one space. Words wider than `width` are
/// split between characters. Always returns at least one line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        if current_width > 0 && current_width + 1 + word_width > width {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width > width {
            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width > 0 && current_width + ch_width > width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
            continue;
        }

        if current_width > 0 {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += word_width;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Title,
    Heading(usize),
    Body,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NarrativeLine {
    kind: LineKind,
    text: String,
}

impl NarrativeLine {
    fn blank() -> Self {
        Self {
            kind: LineKind::Blank,
            text: String::new(),
        }
    }
}

/// The project laid out as rows at one width.
#[derive(Debug, Clone)]
pub struct NarrativeLayout {
    lines: Vec<NarrativeLine>,
    sections: Vec<SectionInfo>,
    width: u16,
}

impl NarrativeLayout {
    pub fn build(project: &Project, width: u16) -> Self {
        let wrap_width = usize::from(width.max(1));
        let mut lines = Vec::new();

        // Preamble: title and description, belonging to no section.
        for text in wrap_text(&project.title, wrap_width) {
            lines.push(NarrativeLine {
                kind: LineKind::Title,
                text,
            });
        }
        push_paragraphs(&mut lines, &project.description, wrap_width);
        lines.push(NarrativeLine::blank());

        let mut sections = Vec::with_capacity(project.sections.len());
        for (index, section) in project.sections.iter().enumerate() {
            let top = lines.len();
            for text in wrap_text(&section.title, wrap_width) {
                lines.push(NarrativeLine {
                    kind: LineKind::Heading(index),
                    text,
                });
            }
            lines.push(NarrativeLine::blank());
            push_paragraphs(&mut lines, &section.content, wrap_width);
            lines.push(NarrativeLine::blank());

            sections.push(SectionInfo {
                id: section.id.clone(),
                index,
                top: top as f64,
                height: (lines.len() - top) as f64,
            });
        }

        Self {
            lines,
            sections,
            width,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn sections(&self) -> &[SectionInfo] {
        &self.sections
    }

    /// Geometry for a pane `viewport_height` rows tall.
    ///
    /// One viewport of empty space follows the last section so it can be
    /// scrolled all the way through the reading line.
    pub fn viewport(&self, viewport_height: u16) -> Viewport {
        let document_height = (self.lines.len() + usize::from(viewport_height)) as f64;
        Viewport::new(self.sections.clone(), document_height)
    }

    /// Plain text of the rows starting at `offset`, for tests and logging.
    pub fn visible_text(&self, offset: usize, height: usize) -> Vec<&str> {
        self.lines
            .iter()
            .skip(offset)
            .take(height)
            .map(|l| l.text.as_str())
            .collect()
    }
}

fn push_paragraphs(lines: &mut Vec<NarrativeLine>, text: &str, width: usize) {
    for source_line in text.lines() {
        if source_line.trim().is_empty() {
            lines.push(NarrativeLine::blank());
            continue;
        }
        for text in wrap_text(source_line, width) {
            lines.push(NarrativeLine {
                kind: LineKind::Body,
                text,
            });
        }
    }
}

/// Narrative pane widget.
pub struct NarrativePane<'a> {
    layout: &'a NarrativeLayout,
    offset: usize,
    active: Option<&'a SectionId>,
    title: &'a str,
    styles: &'a PanelStyles,
}

impl<'a> NarrativePane<'a> {
    pub fn new(
        layout: &'a NarrativeLayout,
        offset: usize,
        active: Option<&'a SectionId>,
        title: &'a str,
        styles: &'a PanelStyles,
    ) -> Self {
        Self {
            layout,
            offset,
            active,
            title,
            styles,
        }
    }
}

impl Widget for NarrativePane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.title))
            .border_style(self.styles.muted);

        let height = usize::from(area.height.saturating_sub(2));
        let active_index = self.active.and_then(|id| {
            self.layout
                .sections
                .iter()
                .find(|s| &s.id == id)
                .map(|s| s.index)
        });

        let lines: Vec<Line> = self
            .layout
            .lines
            .iter()
            .skip(self.offset)
            .take(height)
            .map(|line| {
                let style = match line.kind {
                    LineKind::Title => self.styles.heading,
                    LineKind::Heading(i) if Some(i) == active_index => {
                        self.styles.active_heading
                    }
                    LineKind::Heading(_) => self.styles.heading,
                    LineKind::Body | LineKind::Blank => self.styles.body,
                };
                Line::styled(line.text.as_str(), style)
            })
            .collect();

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
