//! Scroll state snapshot.

use crate::model::SectionId;
use std::fmt;

/// Sign of the most recent scroll delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Direction of a position change, `None` when unchanged.
    pub fn from_delta(delta: f64) -> Option<Self> {
        if delta > 0.0 {
            Some(Direction::Down)
        } else if delta < 0.0 {
            Some(Direction::Up)
        } else {
            None
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Up => "up",
            Direction::Down => "down",
        })
    }
}

/// Everything derived from scroll position for one page session.
///
/// `progress` and `global_progress` are kept in `[0, 1]` by every store
/// command; construct through [`ScrollState::default`] and the store rather
/// than by hand.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScrollState {
    pub current_section: Option<SectionId>,
    pub previous_section: Option<SectionId>,
    /// Position within `current_section`.
    pub progress: f64,
    /// Position across the whole document.
    pub global_progress: f64,
    pub is_scrolling: bool,
    pub direction: Option<Direction>,
    pub reduced_motion: bool,
}

/// Clamp into `[0, 1]`. NaN maps to 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
