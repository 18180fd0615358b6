//! Language tag normalization.
//!
//! Content authors write whatever tag they like (`ts`, `TSX`, `zsh`, ...).
//! Tags are folded onto a fixed set of supported languages; anything outside
//! that set highlights as [`Language::DEFAULT`].

use std::fmt;

/// A language the highlighting pipeline has grammar support for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    TypeScript,
    JavaScript,
    Tsx,
    Jsx,
    Css,
    Html,
    Json,
    Swift,
    Bash,
    Shell,
}

impl Language {
    /// Fallback for unknown tags.
    pub const DEFAULT: Language = Language::TypeScript;

    pub const ALL: [Language; 10] = [
        Language::TypeScript,
        Language::JavaScript,
        Language::Tsx,
        Language::Jsx,
        Language::Css,
        Language::Html,
        Language::Json,
        Language::Swift,
        Language::Bash,
        Language::Shell,
    ];

    /// Canonical lower-case name.
    pub fn name(self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::JavaScript => "javascript",
            Language::Tsx => "tsx",
            Language::Jsx => "jsx",
            Language::Css => "css",
            Language::Html => "html",
            Language::Json => "json",
            Language::Swift => "swift",
            Language::Bash => "bash",
            Language::Shell => "shell",
        }
    }

    /// File extensions tried, in order, when looking up a syntect grammar.
    pub(crate) fn syntax_extensions(self) -> &'static [&'static str] {
        match self {
            Language::TypeScript => &["ts"],
            Language::JavaScript => &["js"],
            Language::Tsx => &["tsx", "ts"],
            Language::Jsx => &["jsx", "js"],
            Language::Css => &["css"],
            Language::Html => &["html"],
            Language::Json => &["json"],
            Language::Swift => &["swift"],
            Language::Bash | Language::Shell => &["sh", "bash"],
        }
    }

    fn from_canonical(name: &str) -> Option<Language> {
        Language::ALL.into_iter().find(|lang| lang.name() == name)
    }

    /// Whether `tag` is recognized without falling back.
    pub fn is_supported(tag: &str) -> bool {
        let lowered = tag.to_lowercase();
        alias(&lowered).is_some() || Language::from_canonical(&lowered).is_some()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn alias(lowered: &str) -> Option<Language> {
    match lowered {
        "ts" => Some(Language::TypeScript),
        "js" => Some(Language::JavaScript),
        "sh" | "zsh" => Some(Language::Bash),
        _ => None,
    }
}

/// Map an arbitrary language tag onto a supported language.
///
/// Total: unknown tags return [`Language::DEFAULT`].
pub fn normalize_language(tag: &str) -> Language {
    let lowered = tag.to_lowercase();
    alias(&lowered)
        .or_else(|| Language::from_canonical(&lowered))
        .unwrap_or_else(|| {
            tracing::debug!(tag, fallback = %Language::DEFAULT, "Unsupported language tag");
            Language::DEFAULT
        })
}
