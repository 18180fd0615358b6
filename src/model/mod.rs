//! Domain model types (pure).
//!
//! Content records, identifiers, presenter actions and the error taxonomy.

pub mod content;
pub mod error;
pub mod identifiers;
pub mod key_action;

// Re-export for convenience
pub use content::{
    load_project, CodeBlock, Project, Section, ValidationIssue, VisualKind, VisualState,
};
pub use error::{AppError, ContentError, HighlightError};
pub use identifiers::{InvalidSectionId, SectionId};
pub use key_action::KeyAction;
