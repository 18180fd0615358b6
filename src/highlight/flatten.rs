//! Token flattening for the typing renderer.

use super::theme::DEFAULT_FOREGROUND;
use super::token::{ColoredChar, HighlightedLine};

/// Expand highlighted lines into one [`ColoredChar`] per character.
///
/// Consecutive lines are joined by exactly one newline character colored with
/// [`DEFAULT_FOREGROUND`]; nothing follows the last line.
pub fn flatten(lines: &[HighlightedLine]) -> Vec<ColoredChar> {
    let capacity = lines
        .iter()
        .map(|l| l.content.chars().count() + 1)
        .sum::<usize>();
    let mut chars = Vec::with_capacity(capacity);

    for (index, line) in lines.iter().enumerate() {
        if index > 0 {
            chars.push(ColoredChar {
                ch: '\n',
                color: DEFAULT_FOREGROUND.to_string(),
                font_style: None,
            });
        }
        for token in &line.tokens {
            chars.extend(token.content.chars().map(|ch| ColoredChar {
                ch,
                color: token.color.clone(),
                font_style: token.font_style,
            }));
        }
    }

    chars
}

/// Plain text of a flattened sequence.
pub fn plain_text(chars: &[ColoredChar]) -> String {
    chars.iter().map(|c| c.ch).collect()
}
