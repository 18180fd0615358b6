//! Highlighted output types.

use serde::Serialize;

/// Font style carried by a token. Only italics survive highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Italic,
}

impl FontStyle {
    pub fn as_css(self) -> &'static str {
        match self {
            FontStyle::Italic => "italic",
        }
    }
}

/// A run of characters sharing one color and style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightedToken {
    pub content: String,
    /// `#rrggbb`
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
}

/// One source line, as ordered tokens plus its plain text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HighlightedLine {
    pub tokens: Vec<HighlightedToken>,
    pub content: String,
}

impl HighlightedLine {
    /// Build a line, deriving `content` from the tokens.
    pub fn from_tokens(tokens: Vec<HighlightedToken>) -> Self {
        let content = tokens.iter().map(|t| t.content.as_str()).collect();
        Self { tokens, content }
    }
}

/// The atomic unit the typing renderer reveals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColoredChar {
    #[serde(rename = "char")]
    pub ch: char,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
}

impl ColoredChar {
    pub fn is_newline(&self) -> bool {
        self.ch == '\n'
    }
}
