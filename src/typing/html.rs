//! HTML fragments for highlighted tokens and typing frames.

use super::renderer::TypingFrame;
use crate::highlight::{HighlightedLine, HighlightedToken};
use std::fmt::Write as _;

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// One token as an inline-styled span.
pub fn token_to_html(token: &HighlightedToken) -> String {
    let mut style = format!("color: {}", token.color);
    if let Some(font_style) = token.font_style {
        let _ = write!(style, "; font-style: {}", font_style.as_css());
    }
    format!(
        r#"<span style="{style}">{}</span>"#,
        escape_html(&token.content)
    )
}

pub fn line_to_html(line: &HighlightedLine) -> String {
    line.tokens.iter().map(token_to_html).collect()
}

/// A typing frame as markup.
///
/// The outer span carries the full text in `aria-label`; the visible prefix
/// sits in an `aria-hidden` span with a `<br>` per line break. The cursor
/// span follows when the frame has one.
pub fn frame_to_html(frame: &TypingFrame<'_>) -> String {
    let mut out = format!(
        r#"<span class="typing-animation" aria-label="{}">"#,
        escape_html(frame.accessible_label())
    );
    out.push_str(r#"<span class="typing-animation__text" aria-hidden="true">"#);
    for (i, line) in frame.lines().enumerate() {
        if i > 0 {
            out.push_str("<br>");
        }
        out.push_str(&escape_html(line));
    }
    out.push_str("</span>");
    if let Some(cursor) = frame.cursor() {
        let _ = write!(
            out,
            r#"<span class="typing-animation__cursor" aria-hidden="true">{}</span>"#,
            escape_html(cursor.encode_utf8(&mut [0; 4]))
        );
    }
    out.push_str("</span>");
    out
}
