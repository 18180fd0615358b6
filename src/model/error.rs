//! Error types for scrollsync.
//!
//! Each domain owns a `thiserror` enum; [`AppError`] wraps all of them so the
//! binary can compose failures with `?`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - top-level error returned by the binary's setup path
//!   - [`ContentError`] - project file could not be read, parsed or validated
//!   - [`HighlightError`] - tokenizer construction failed
//!   - [`ConfigError`](crate::config::ConfigError) - config file unreadable or malformed
//!   - [`LoggingError`](crate::logging::LoggingError) - tracing setup failed
//!   - [`TuiError`](crate::view::TuiError) - terminal failures
//!
//! Scroll store commands never fail, and unsupported highlighting languages
//! degrade silently, so neither appears here.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::model::content::ValidationIssue;
use crate::view::TuiError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging setup failed: {0}")]
    Logging(#[from] LoggingError),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Highlighting unavailable: {0}")]
    Highlight(#[from] HighlightError),

    #[error("Terminal error: {0}")]
    Tui(#[from] TuiError),
}

/// Failure to load a project content file.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ContentError {
    #[error("Failed to read project file at {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse project file at {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// Only `.toml` and `.json` project files are understood.
    #[error("Unsupported project file format: {path} (expected .toml or .json)")]
    UnsupportedFormat { path: PathBuf },

    #[error("Invalid project: {}", join_issues(.0))]
    Invalid(Vec<ValidationIssue>),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Tokenizer construction failure.
///
/// Cloneable because every caller awaiting the same in-flight construction
/// receives the same failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HighlightError {
    /// A custom `.tmTheme` file could not be loaded.
    #[error("Failed to load theme file {path}: {reason}")]
    ThemeFile { path: PathBuf, reason: String },

    /// A scope selector in a built-in theme did not parse.
    #[error("Invalid scope selector {selector:?} in built-in theme: {reason}")]
    ThemeScope { selector: String, reason: String },

    /// The blocking construction task panicked or was cancelled.
    #[error("Tokenizer construction aborted: {0}")]
    ConstructionAborted(String),
}
