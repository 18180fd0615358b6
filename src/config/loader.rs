//! Configuration file loading with precedence handling.

use crate::highlight::DEFAULT_THEME;
use crate::typing::TERMINAL_CURSOR;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "SCROLLSYNC_CONFIG";
/// Environment variable overriding the theme.
pub const THEME_ENV: &str = "SCROLLSYNC_THEME";
/// Environment variable forcing reduced motion on (`1`/`true`) or off (`0`/`false`).
pub const REDUCED_MOTION_ENV: &str = "SCROLLSYNC_REDUCED_MOTION";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },
}

/// TOML configuration file structure.
///
/// All fields are optional; missing ones fall back to defaults.
/// Lives at `~/.config/scrollsync/config.toml` by default.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Theme name or path to a `.tmTheme` file.
    #[serde(default)]
    pub theme: Option<String>,

    /// Reveal everything at once, no typing animation.
    #[serde(default)]
    pub reduced_motion: Option<bool>,

    /// Draw a cursor after the partially typed text.
    #[serde(default)]
    pub show_cursor: Option<bool>,

    /// Cursor glyph, exactly one character.
    #[serde(default)]
    pub cursor_char: Option<char>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub theme: String,
    pub reduced_motion: bool,
    pub show_cursor: bool,
    pub cursor_char: char,
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            reduced_motion: false,
            show_cursor: true,
            cursor_char: TERMINAL_CURSOR,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// `~/.local/state/scrollsync/scrollsync.log` on Linux, the platform state
/// directory elsewhere, or the current directory when there is none.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("scrollsync").join("scrollsync.log")
    } else {
        PathBuf::from("scrollsync.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist.
///
/// # Errors
///
/// Returns error if the file exists but cannot be read or parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file");
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path, `None` without a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scrollsync").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `SCROLLSYNC_CONFIG` environment variable
/// 3. Default path `~/.config/scrollsync/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Apply environment variable overrides.
///
/// Checks `SCROLLSYNC_THEME` and `SCROLLSYNC_REDUCED_MOTION`. An unrecognized
/// reduced-motion value is ignored with a warning.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(theme) = std::env::var(THEME_ENV) {
        config.theme = theme;
    }

    if let Ok(raw) = std::env::var(REDUCED_MOTION_ENV) {
        match parse_flag(&raw) {
            Some(value) => config.reduced_motion = value,
            None => tracing::warn!(value = %raw, "Ignoring {REDUCED_MOTION_ENV}"),
        }
    }

    config
}

/// Merge config file into defaults.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        theme: config.theme.unwrap_or(defaults.theme),
        reduced_motion: config.reduced_motion.unwrap_or(defaults.reduced_motion),
        show_cursor: config.show_cursor.unwrap_or(defaults.show_cursor),
        cursor_char: config.cursor_char.unwrap_or(defaults.cursor_char),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Values taken from command-line flags. `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub theme: Option<String>,
    pub reduced_motion: Option<bool>,
    pub show_cursor: Option<bool>,
}

/// Apply CLI argument overrides, the highest precedence source.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(reduced_motion) = cli.reduced_motion {
        config.reduced_motion = reduced_motion;
    }
    if let Some(show_cursor) = cli.show_cursor {
        config.show_cursor = show_cursor;
    }
    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
