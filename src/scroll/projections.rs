//! Values derived from scroll state.
//!
//! The free functions are pure. [`ProjectionWatcher`] subscribes to a store
//! and recomputes all three on every change, so readers never poll.

use super::state::ScrollState;
use super::store::{ScrollStore, Subscription};
use parking_lot::Mutex;
use std::sync::Arc;

/// Section progress at which the typing reveal is complete.
///
/// The remaining part of the section is a settled dwell period showing the
/// fully typed text.
pub const TYPING_COMPLETE_AT: f64 = 0.7;

/// Animations run unless the reader prefers reduced motion.
pub fn should_animate(state: &ScrollState) -> bool {
    !state.reduced_motion
}

/// True right after a transition into a (non-null) new section.
pub fn section_changed(state: &ScrollState) -> bool {
    state.current_section.is_some() && state.current_section != state.previous_section
}

/// Typing reveal progress in `[0, 1]`.
///
/// Reduced motion shows everything at once.
pub fn typing_progress(state: &ScrollState) -> f64 {
    if state.reduced_motion {
        return 1.0;
    }
    (state.progress / TYPING_COMPLETE_AT).min(1.0)
}

/// All derived values at one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projections {
    pub should_animate: bool,
    pub section_changed: bool,
    pub typing_progress: f64,
}

impl Projections {
    pub fn of(state: &ScrollState) -> Self {
        Self {
            should_animate: should_animate(state),
            section_changed: section_changed(state),
            typing_progress: typing_progress(state),
        }
    }
}

impl Default for Projections {
    fn default() -> Self {
        Self::of(&ScrollState::default())
    }
}

/// Keeps [`Projections`] current for one store.
#[derive(Debug)]
pub struct ProjectionWatcher {
    latest: Arc<Mutex<Projections>>,
    _subscription: Subscription,
}

impl ProjectionWatcher {
    pub fn attach(store: &ScrollStore) -> Self {
        let latest = Arc::new(Mutex::new(Projections::default()));
        let subscription = {
            let latest = Arc::clone(&latest);
            store.subscribe(move |state| *latest.lock() = Projections::of(state))
        };
        Self {
            latest,
            _subscription: subscription,
        }
    }

    pub fn get(&self) -> Projections {
        *self.latest.lock()
    }

    pub fn should_animate(&self) -> bool {
        self.get().should_animate
    }

    pub fn section_changed(&self) -> bool {
        self.get().section_changed
    }

    pub fn typing_progress(&self) -> f64 {
        self.get().typing_progress
    }
}
