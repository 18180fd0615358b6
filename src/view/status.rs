//! Status bar: live readout of the scroll store.

use super::styles::PanelStyles;
use crate::scroll::{Direction, Projections, ScrollState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const SCROLLING_INDICATOR: &str = " ● scrolling ";
const KEY_HINTS: &str = "j/k scroll | r motion | q quit";

fn percent(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 100.0).round() as u8
}

fn direction_glyph(direction: Option<Direction>) -> &'static str {
    match direction {
        Some(Direction::Down) => "↓",
        Some(Direction::Up) => "↑",
        None => "·",
    }
}

/// The status text without the scrolling indicator.
pub fn status_text(
    state: &ScrollState,
    projections: &Projections,
    section_title: Option<&str>,
) -> String {
    let mut text = format!(
        " {} | section {:>3}% | overall {:>3}% | typing {:>3}% | {} ",
        section_title.unwrap_or("-"),
        percent(state.progress),
        percent(state.global_progress),
        percent(projections.typing_progress),
        direction_glyph(state.direction),
    );
    if state.reduced_motion {
        text.push_str("| reduced motion ");
    }
    text
}

pub struct StatusBar<'a> {
    state: &'a ScrollState,
    projections: Projections,
    section_title: Option<&'a str>,
    styles: &'a PanelStyles,
}

impl<'a> StatusBar<'a> {
    pub fn new(
        state: &'a ScrollState,
        projections: Projections,
        section_title: Option<&'a str>,
        styles: &'a PanelStyles,
    ) -> Self {
        Self {
            state,
            projections,
            section_title,
            styles,
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(
            status_text(self.state, &self.projections, self.section_title),
            self.styles.status,
        )];
        if self.state.is_scrolling {
            spans.push(Span::styled(SCROLLING_INDICATOR, self.styles.scrolling));
        }
        spans.push(Span::styled(format!(" {KEY_HINTS}"), self.styles.muted));

        Paragraph::new(Line::from(spans))
            .style(self.styles.status)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::styles::ColorConfig;

    #[test]
    fn text_at_rest() {
        let state = ScrollState::default();
        let text = status_text(&state, &Projections::of(&state), None);
        assert_eq!(
            text,
            " - | section   0% | overall   0% | typing   0% | · "
        );
    }

    #[test]
    fn text_mid_section() {
        let state = ScrollState {
            progress: 0.35,
            global_progress: 0.125,
            direction: Some(Direction::Down),
            reduced_motion: true,
            ..ScrollState::default()
        };
        let text = status_text(&state, &Projections::of(&state), Some("Building it"));
        assert_eq!(
            text,
            " Building it | section  35% | overall  13% | typing 100% | ↓ | reduced motion "
        );
    }

    #[test]
    fn scrolling_indicator_only_while_scrolling() {
        let styles = PanelStyles::with_color_config(ColorConfig::disabled());
        let area = Rect::new(0, 0, 120, 1);

        let mut state = ScrollState::default();
        let mut buf = Buffer::empty(area);
        StatusBar::new(&state, Projections::of(&state), None, &styles).render(area, &mut buf);
        let row: String = (0..120).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(!row.contains("scrolling"));

        state.is_scrolling = true;
        let mut buf = Buffer::empty(area);
        StatusBar::new(&state, Projections::of(&state), None, &styles).render(area, &mut buf);
        let row: String = (0..120).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(row.contains("scrolling"), "{row}");
    }
}
