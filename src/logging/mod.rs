//! Tracing subscriber initialization.
//!
//! The presenter owns the terminal, so logs go to a file. Watch them with
//! `tail -f` in a second terminal.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Path has no file name component.
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Keeps the background log writer alive. Dropping it flushes pending lines.
#[must_use = "logs stop being written once the guard is dropped"]
#[derive(Debug)]
pub struct LogGuard {
    _worker: WorkerGuard,
}

/// `RUST_LOG` if set and valid, otherwise [`DEFAULT_FILTER`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Split a log path into the directory to create and the file name.
fn split_log_path(log_path: &Path) -> Result<(PathBuf, String), LoggingError> {
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok((directory, file_name.to_string()))
}

/// Initialize the global tracing subscriber with file-based logging.
///
/// Creates the log directory if needed. Output has no ANSI colors.
///
/// # Errors
///
/// Fails on an unusable path, when the directory cannot be created, or when
/// a global subscriber is already installed.
pub fn init(log_path: &Path) -> Result<LogGuard, LoggingError> {
    let (directory, file_name) = split_log_path(log_path)?;

    std::fs::create_dir_all(&directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.clone(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(&directory, &file_name);
    let (writer, worker) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)?;

    Ok(LogGuard { _worker: worker })
}
