//! Presenter actions independent of key bindings.

/// User intent in the presenter.
///
/// The mapping from `crossterm::event::KeyEvent` to `KeyAction` is handled
/// by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// One line towards the end. Default: j/↓
    ScrollDown,
    /// One line towards the start. Default: k/↑
    ScrollUp,
    /// Default: PgDn/Space
    PageDown,
    /// Default: PgUp
    PageUp,
    /// Default: g/Home
    ScrollToTop,
    /// Default: G/End
    ScrollToBottom,
    /// Default: r
    ToggleReducedMotion,
    /// Default: q/Esc/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Signed line delta for line-wise scrolling, `None` for other actions.
    pub fn line_delta(self) -> Option<i64> {
        match self {
            KeyAction::ScrollDown => Some(1),
            KeyAction::ScrollUp => Some(-1),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_delta_only_for_line_scrolling() {
        assert_eq!(KeyAction::ScrollDown.line_delta(), Some(1));
        assert_eq!(KeyAction::ScrollUp.line_delta(), Some(-1));
        assert_eq!(KeyAction::PageDown.line_delta(), None);
        assert_eq!(KeyAction::Quit.line_delta(), None);
    }
}
