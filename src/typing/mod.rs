//! Typing reveal: which prefix of a text is visible at a given progress.

pub mod html;
pub mod renderer;

pub use html::{escape_html, frame_to_html, line_to_html, token_to_html};
pub use renderer::{
    render, render_colored, visible_len, ColoredFrame, TypingFrame, TypingRenderer, HTML_CURSOR,
    TERMINAL_CURSOR,
};
