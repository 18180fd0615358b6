//! Keyboard bindings configuration.

use crate::model::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to presenter actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only code and modifiers take part in the lookup; event kind and
    /// keyboard state flags are ignored.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };

        // Line scrolling
        keys.bind(KeyCode::Char('j'), KeyModifiers::NONE, KeyAction::ScrollDown);
        keys.bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::ScrollDown);
        keys.bind(KeyCode::Char('k'), KeyModifiers::NONE, KeyAction::ScrollUp);
        keys.bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::ScrollUp);

        // Page scrolling
        keys.bind(KeyCode::PageDown, KeyModifiers::NONE, KeyAction::PageDown);
        keys.bind(KeyCode::Char(' '), KeyModifiers::NONE, KeyAction::PageDown);
        keys.bind(KeyCode::PageUp, KeyModifiers::NONE, KeyAction::PageUp);

        // Jumps. Terminals disagree on whether 'G' carries SHIFT.
        keys.bind(KeyCode::Char('g'), KeyModifiers::NONE, KeyAction::ScrollToTop);
        keys.bind(KeyCode::Home, KeyModifiers::NONE, KeyAction::ScrollToTop);
        keys.bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::ScrollToBottom);
        keys.bind(KeyCode::Char('G'), KeyModifiers::NONE, KeyAction::ScrollToBottom);
        keys.bind(KeyCode::End, KeyModifiers::NONE, KeyAction::ScrollToBottom);

        keys.bind(
            KeyCode::Char('r'),
            KeyModifiers::NONE,
            KeyAction::ToggleReducedMotion,
        );

        // Application controls
        keys.bind(KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit);
        keys.bind(KeyCode::Esc, KeyModifiers::NONE, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        keys
    }
}
