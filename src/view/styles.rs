//! Presenter styling.
//!
//! Highlight colors arrive as `#rrggbb` strings and map straight onto
//! truecolor. With colors disabled every style collapses to the default so
//! only the text remains.

use crate::highlight::{ColoredChar, FontStyle};
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

/// Parse `#rrggbb` into a truecolor value.
pub fn hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

// ===== PanelStyles =====

/// Styles for every non-highlighted part of the presenter.
#[derive(Debug, Clone, Copy)]
pub struct PanelStyles {
    colors: ColorConfig,
    pub heading: Style,
    pub active_heading: Style,
    pub body: Style,
    pub muted: Style,
    pub cursor: Style,
    pub status: Style,
    pub scrolling: Style,
}

impl PanelStyles {
    pub fn with_color_config(colors: ColorConfig) -> Self {
        if colors.colors_enabled() {
            Self {
                colors,
                heading: Style::default().add_modifier(Modifier::BOLD),
                active_heading: Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                body: Style::default(),
                muted: Style::default().fg(Color::DarkGray),
                cursor: Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::SLOW_BLINK),
                status: Style::default().fg(Color::Black).bg(Color::Gray),
                scrolling: Style::default()
                    .fg(Color::Yellow)
                    .bg(Color::Gray)
                    .add_modifier(Modifier::BOLD),
            }
        } else {
            // Modifiers survive: they are not colors.
            Self {
                colors,
                heading: Style::default().add_modifier(Modifier::BOLD),
                active_heading: Style::default().add_modifier(Modifier::BOLD),
                body: Style::default(),
                muted: Style::default(),
                cursor: Style::default(),
                status: Style::default().add_modifier(Modifier::REVERSED),
                scrolling: Style::default().add_modifier(Modifier::REVERSED),
            }
        }
    }

    pub fn colors(&self) -> ColorConfig {
        self.colors
    }

    /// Style for one highlighted character.
    pub fn char_style(&self, ch: &ColoredChar) -> Style {
        let mut style = Style::default();
        if self.colors.colors_enabled() {
            if let Some(color) = hex_color(&ch.color) {
                style = style.fg(color);
            }
        }
        if ch.font_style == Some(FontStyle::Italic) {
            style = style.add_modifier(Modifier::ITALIC);
        }
        style
    }
}

impl Default for PanelStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}
