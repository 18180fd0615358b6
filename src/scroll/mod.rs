//! Scroll-driven state: the store, its derived projections and the viewport
//! measurement that feeds it.

pub mod projections;
pub mod state;
pub mod store;
pub mod timer;
pub mod viewport;

pub use projections::{
    section_changed, should_animate, typing_progress, ProjectionWatcher, Projections,
    TYPING_COMPLETE_AT,
};
pub use state::{clamp_unit, Direction, ScrollState};
pub use store::{ScrollStore, Subscription, QUIET_PERIOD};
pub use timer::DelayedTask;
pub use viewport::{ScrollSample, SectionInfo, Viewport, READING_LINE};
