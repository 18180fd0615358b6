//! Highlighting themes.
//!
//! Three sources are understood:
//! - `terminal-dark` (default): a built-in dark palette matched to the
//!   presenter's background
//! - any two-face embedded theme name (`dracula`, `nord`, `gruvbox-dark`, ...)
//! - a path to a `.tmTheme` file, loaded when the tokenizer is built

use crate::model::error::HighlightError;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::LazyLock;
use syntect::highlighting::{
    Color, FontStyle, ScopeSelectors, StyleModifier, Theme, ThemeItem, ThemeSet, ThemeSettings,
};
use two_face::theme::{EmbeddedLazyThemeSet, EmbeddedThemeName};

/// Name of the built-in theme.
pub const DEFAULT_THEME: &str = "terminal-dark";

/// Foreground used for tokens without a color and for inserted newlines.
pub const DEFAULT_FOREGROUND: &str = "#c8c8d8";

/// Panel background of the built-in theme.
pub const DEFAULT_BACKGROUND: &str = "#0a0a0f";

/// Scope table of the built-in theme: selectors and foreground color.
const TERMINAL_DARK_SCOPES: &[(&str, &str)] = &[
    ("comment, punctuation.definition.comment", "#6272a4"),
    ("string, string.quoted", "#f1fa8c"),
    ("constant.numeric, constant.language", "#ffb86c"),
    ("keyword, storage.type, storage.modifier", "#ff79c6"),
    ("entity.name.function, support.function", "#50fa7b"),
    ("variable, variable.other, variable.parameter", "#bd93f9"),
    ("entity.name.type, entity.name.class, support.type", "#8be9fd"),
    ("punctuation, meta.brace", "#c8c8d8"),
    ("entity.name.tag", "#ff79c6"),
    ("entity.other.attribute-name", "#50fa7b"),
];

/// Comments are italic in the built-in theme.
const ITALIC_SCOPES: &str = "comment";

/// Embedded two-face themes accepted by name.
pub const EMBEDDED_THEMES: &[&str] = &[
    "base16-ocean-dark",
    "base16-ocean-light",
    "coldark-dark",
    "dracula",
    "github",
    "gruvbox-dark",
    "gruvbox-light",
    "monokai",
    "nord",
    "one-half-dark",
    "solarized-dark",
    "solarized-light",
    "two-dark",
    "visual-studio-dark-plus",
    "zenburn",
];

static EMBEDDED_THEME_SET: LazyLock<EmbeddedLazyThemeSet> = LazyLock::new(two_face::theme::extra);

fn embedded_theme_name(name: &str) -> Option<EmbeddedThemeName> {
    match name {
        "base16-ocean-dark" => Some(EmbeddedThemeName::Base16OceanDark),
        "base16-ocean-light" => Some(EmbeddedThemeName::Base16OceanLight),
        "coldark-dark" => Some(EmbeddedThemeName::ColdarkDark),
        "dracula" => Some(EmbeddedThemeName::Dracula),
        "github" => Some(EmbeddedThemeName::Github),
        "gruvbox-dark" => Some(EmbeddedThemeName::GruvboxDark),
        "gruvbox-light" => Some(EmbeddedThemeName::GruvboxLight),
        "monokai" => Some(EmbeddedThemeName::MonokaiExtended),
        "nord" => Some(EmbeddedThemeName::Nord),
        "one-half-dark" => Some(EmbeddedThemeName::OneHalfDark),
        "solarized-dark" => Some(EmbeddedThemeName::SolarizedDark),
        "solarized-light" => Some(EmbeddedThemeName::SolarizedLight),
        "two-dark" => Some(EmbeddedThemeName::TwoDark),
        "visual-studio-dark-plus" => Some(EmbeddedThemeName::VisualStudioDarkPlus),
        "zenburn" => Some(EmbeddedThemeName::Zenburn),
        _ => None,
    }
}

/// Where the tokenizer's theme comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ThemeSource {
    #[default]
    TerminalDark,
    Embedded(&'static str),
    File(PathBuf),
}

impl ThemeSource {
    /// Interpret a configured theme value.
    ///
    /// Values ending in `.tmTheme` or containing a path separator are files.
    /// Unknown names fall back to the built-in theme.
    pub fn parse(value: &str) -> Self {
        if value == DEFAULT_THEME {
            return ThemeSource::TerminalDark;
        }
        if let Some(name) = EMBEDDED_THEMES.iter().find(|n| **n == value) {
            return ThemeSource::Embedded(*name);
        }
        if value.ends_with(".tmTheme") || value.contains(std::path::MAIN_SEPARATOR) {
            return ThemeSource::File(PathBuf::from(value));
        }
        tracing::warn!(theme = value, fallback = DEFAULT_THEME, "Unknown theme name");
        ThemeSource::TerminalDark
    }

    /// Whether `value` names a built-in or embedded theme.
    pub fn is_known_name(value: &str) -> bool {
        value == DEFAULT_THEME || EMBEDDED_THEMES.iter().any(|n| *n == value)
    }

    /// Build the syntect theme. File themes touch the filesystem.
    pub fn load(&self) -> Result<Theme, HighlightError> {
        match self {
            ThemeSource::TerminalDark => terminal_dark_theme(),
            ThemeSource::Embedded(name) => {
                let embedded = embedded_theme_name(name)
                    .unwrap_or(EmbeddedThemeName::Base16OceanDark);
                Ok(EMBEDDED_THEME_SET.get(embedded).clone())
            }
            ThemeSource::File(path) => {
                ThemeSet::get_theme(path).map_err(|e| HighlightError::ThemeFile {
                    path: path.clone(),
                    reason: e.to_string(),
                })
            }
        }
    }
}

/// Parse a `#rrggbb` string into an opaque syntect color.
pub fn parse_hex(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
        a: 0xFF,
    })
}

/// Format a syntect color as `#rrggbb`, or `None` when fully transparent.
pub fn to_hex(color: Color) -> Option<String> {
    if color.a == 0 {
        return None;
    }
    Some(format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b))
}

fn selectors(raw: &str) -> Result<ScopeSelectors, HighlightError> {
    ScopeSelectors::from_str(raw).map_err(|e| HighlightError::ThemeScope {
        selector: raw.to_string(),
        reason: format!("{e:?}"),
    })
}

fn builtin_color(hex: &str) -> Result<Color, HighlightError> {
    parse_hex(hex).ok_or_else(|| HighlightError::ThemeScope {
        selector: hex.to_string(),
        reason: "not a #rrggbb color".to_string(),
    })
}

/// The built-in `terminal-dark` theme.
pub fn terminal_dark_theme() -> Result<Theme, HighlightError> {
    let mut scopes = TERMINAL_DARK_SCOPES
        .iter()
        .map(|(selector, hex)| {
            Ok(ThemeItem {
                scope: selectors(selector)?,
                style: StyleModifier {
                    foreground: Some(builtin_color(hex)?),
                    background: None,
                    font_style: None,
                },
            })
        })
        .collect::<Result<Vec<_>, HighlightError>>()?;

    scopes.push(ThemeItem {
        scope: selectors(ITALIC_SCOPES)?,
        style: StyleModifier {
            foreground: None,
            background: None,
            font_style: Some(FontStyle::ITALIC),
        },
    });

    Ok(Theme {
        name: Some(DEFAULT_THEME.to_string()),
        settings: ThemeSettings {
            foreground: Some(builtin_color(DEFAULT_FOREGROUND)?),
            background: Some(builtin_color(DEFAULT_BACKGROUND)?),
            ..ThemeSettings::default()
        },
        scopes,
        ..Theme::default()
    })
}
