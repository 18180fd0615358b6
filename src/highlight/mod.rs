//! Source code highlighting: language tags in, colored characters out.

pub mod flatten;
pub mod language;
pub mod pipeline;
pub mod theme;
pub mod token;

pub use flatten::{flatten, plain_text};
pub use language::{normalize_language, Language};
pub use pipeline::{highlight_code, HighlightPipeline, Tokenizer};
pub use theme::{ThemeSource, DEFAULT_FOREGROUND, DEFAULT_THEME};
pub use token::{ColoredChar, FontStyle, HighlightedLine, HighlightedToken};
