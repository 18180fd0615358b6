//! scrollsync
//!
//! Scroll-synchronized typing and syntax highlighting for narrative case-study
//! presentations.
//!
//! Pure core: [`highlight`] turns source text into colored characters,
//! [`scroll`] keeps the scroll-derived state and its projections, and
//! [`typing`] reveals a prefix of text for a progress value. Impure shell:
//! [`view`] drives a terminal presenter from scroll input, with [`config`]
//! and [`logging`] around it.

pub mod config;
pub mod highlight;
pub mod logging;
pub mod model;
pub mod scroll;
pub mod typing;
pub mod view;
