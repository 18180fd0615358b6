//! Tests for the presenter application.

use super::*;
use crate::highlight::{plain_text, DEFAULT_FOREGROUND};
use crate::model::content::parse_project_toml;
use crate::scroll::{Direction, QUIET_PERIOD};
use crossterm::event::{KeyCode, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use std::path::Path;

const PROJECT: &str = r#"
title = "Answer Service"
description = "Computing the answer, one section at a time."
category = "library"
startDate = "2024-03-01"
technologies = ["TypeScript"]

[[sections]]
id = "intro"
title = "Introduction"
content = """
The problem.

Why it matters.

What we tried first.

What we learned.
"""

[[sections]]
id = "build"
title = "Building it"
content = """
The core is one constant.

It is logged once.
"""

[sections.codeBlock]
code = "const answer = 42;\nconsole.log(answer);"
language = "ts"
filename = "answer.ts"

[[sections]]
id = "ship"
title = "Shipping"
content = "Deployed behind a cache."

[sections.visual]
type = "diagram"
content = "client -> api -> cache"
"#;

fn project() -> Project {
    parse_project_toml(PROJECT, Path::new("answer.toml")).unwrap()
}

fn id(raw: &str) -> SectionId {
    SectionId::new(raw).unwrap()
}

/// Visuals without running the highlighter: every char in the default color.
fn plain_visuals(project: &Project) -> Visuals {
    project
        .sections
        .iter()
        .filter_map(|s| {
            s.typed_source().map(|(code, _)| {
                let chars = code
                    .chars()
                    .map(|ch| ColoredChar {
                        ch,
                        color: DEFAULT_FOREGROUND.to_string(),
                        font_style: None,
                    })
                    .collect();
                (s.id.clone(), chars)
            })
        })
        .collect()
}

fn options() -> PresenterOptions {
    PresenterOptions {
        renderer: TypingRenderer::new(true, '▋'),
        styles: PanelStyles::with_color_config(ColorConfig::disabled()),
    }
}

fn create_test_app() -> PresenterApp<TestBackend> {
    let project = project();
    let visuals = plain_visuals(&project);
    let terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
    PresenterApp::new(terminal, project, visuals, ScrollStore::new(), options()).unwrap()
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn wheel(kind: MouseEventKind) -> MouseEvent {
    MouseEvent {
        kind,
        column: 10,
        row: 5,
        modifiers: KeyModifiers::NONE,
    }
}

fn screen_text(app: &PresenterApp<TestBackend>) -> String {
    let buffer = app.terminal().backend().buffer();
    let area = buffer.area;
    let mut text = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn tui_error_from_io_error() {
    let err: TuiError = io::Error::other("test error").into();
    assert!(matches!(err, TuiError::Io(_)));
}

#[test]
fn narrative_uses_sixty_percent_of_width() {
    let app = create_test_app();
    assert_eq!(app.layout().width(), 58);
}

#[test]
fn start_at_top_selects_first_section() {
    let mut app = create_test_app();
    app.start_at(None);
    assert_eq!(app.offset(), 0);
    assert_eq!(app.store().current_section(), Some(id("intro")));
}

#[test]
fn start_at_named_section() {
    let mut app = create_test_app();
    app.start_at(Some(&id("build")));
    assert_eq!(app.store().current_section(), Some(id("build")));
}

#[test]
fn start_at_unknown_section_falls_back_to_top() {
    let mut app = create_test_app();
    app.start_at(Some(&id("missing")));
    assert_eq!(app.offset(), 0);
}

#[test]
fn line_keys_scroll_and_set_direction() {
    let mut app = create_test_app();
    app.start_at(None);

    assert!(!app.handle_key(key(KeyCode::Char('j'))));
    assert_eq!(app.offset(), 1);
    assert_eq!(app.store().snapshot().direction, Some(Direction::Down));

    app.handle_key(key(KeyCode::Up));
    assert_eq!(app.offset(), 0);
    assert_eq!(app.store().snapshot().direction, Some(Direction::Up));
}

#[test]
fn scrolling_above_top_is_a_no_op() {
    let mut app = create_test_app();
    app.start_at(None);
    let before = app.store().snapshot();
    app.handle_key(key(KeyCode::Char('k')));
    assert_eq!(app.offset(), 0);
    assert_eq!(app.store().snapshot(), before);
}

#[test]
fn bottom_and_top_jumps() {
    let mut app = create_test_app();
    app.start_at(None);

    app.handle_key(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT));
    let state = app.store().snapshot();
    assert_eq!(app.offset(), app.layout().line_count());
    assert_eq!(state.current_section, Some(id("ship")));
    assert_eq!(state.progress, 1.0);
    assert_eq!(state.global_progress, 1.0);

    app.handle_key(key(KeyCode::Char('g')));
    assert_eq!(app.offset(), 0);
    assert_eq!(app.store().current_section(), Some(id("intro")));
    assert_eq!(
        app.store().snapshot().previous_section,
        Some(id("ship"))
    );
}

#[test]
fn page_keys_move_by_a_page() {
    let mut app = create_test_app();
    app.start_at(None);
    let max = app.layout().line_count();

    app.handle_key(key(KeyCode::PageDown));
    assert_eq!(app.offset(), 20.min(max));

    app.handle_key(key(KeyCode::PageUp));
    assert_eq!(app.offset(), 0);
}

#[test]
fn mouse_wheel_scrolls_three_lines() {
    let mut app = create_test_app();
    app.start_at(None);
    app.handle_mouse(wheel(MouseEventKind::ScrollDown));
    assert_eq!(app.offset(), 3);
    app.handle_mouse(wheel(MouseEventKind::ScrollUp));
    assert_eq!(app.offset(), 0);
}

#[test]
fn quit_keys() {
    let mut app = create_test_app();
    assert!(app.handle_key(key(KeyCode::Char('q'))));
    assert!(app.handle_key(key(KeyCode::Esc)));
    assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    assert!(!app.handle_key(key(KeyCode::Char('x'))));
}

#[test]
fn r_toggles_reduced_motion() {
    let mut app = create_test_app();
    app.handle_key(key(KeyCode::Char('r')));
    assert!(app.store().snapshot().reduced_motion);
    app.handle_key(key(KeyCode::Char('r')));
    assert!(!app.store().snapshot().reduced_motion);
}

#[test]
fn draw_shows_full_code_under_reduced_motion() {
    let mut app = create_test_app();
    app.start_at(Some(&id("build")));
    app.store().set_reduced_motion(true);
    app.draw().unwrap();

    let screen = screen_text(&app);
    assert!(screen.contains("answer.ts"), "{screen}");
    assert!(screen.contains("const answer = 42;"), "{screen}");
    assert!(screen.contains("console.log(answer);"), "{screen}");
    assert!(!screen.contains('▋'), "complete reveal has no cursor");
    assert!(screen.contains("Building it"));
}

#[test]
fn draw_shows_partial_code_with_cursor() {
    let mut app = create_test_app();
    app.start_at(Some(&id("build")));
    // Section just entered: progress is small, so little is typed.
    app.store().set_progress(0.0);
    app.draw().unwrap();

    let screen = screen_text(&app);
    assert!(screen.contains('▋'), "{screen}");
    assert!(!screen.contains("console.log"), "{screen}");
}

#[test]
fn draw_types_plain_visuals() {
    let mut app = create_test_app();
    app.start_at(Some(&id("ship")));
    app.store().set_reduced_motion(true);
    app.draw().unwrap();

    let screen = screen_text(&app);
    assert!(screen.contains("diagram"), "{screen}");
    assert!(screen.contains("client -> api -> cache"), "{screen}");
}

#[test]
fn resize_rewraps_and_clamps_offset() {
    let mut app = create_test_app();
    app.start_at(None);
    app.handle_key(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT));
    let bottom = app.offset();

    app.handle_resize(50, 40);
    assert_eq!(app.layout().width(), 28);
    assert!(app.offset() <= bottom.max(app.layout().line_count()));
    assert!(app.offset() <= app.layout().line_count());
}

#[test]
fn offsets_past_u16_range_are_kept() {
    let body = "A paragraph.\n\n".repeat(40_000);
    let raw = format!(
        "title = \"Long\"\ndescription = \"Long.\"\ncategory = \"library\"\nstartDate = \"2024-03-01\"\n\
         technologies = [\"Rust\"]\n\n[[sections]]\nid = \"long\"\ntitle = \"Long\"\n\
         content = \"\"\"\n{body}\"\"\"\n"
    );
    let project = parse_project_toml(&raw, Path::new("long.toml")).unwrap();
    let terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
    let mut app =
        PresenterApp::new(terminal, project, Visuals::new(), ScrollStore::new(), options())
            .unwrap();
    app.start_at(None);
    assert!(app.layout().line_count() > usize::from(u16::MAX));

    app.handle_key(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT));
    assert_eq!(app.offset(), app.layout().line_count());
    assert_eq!(app.store().snapshot().global_progress, 1.0);

    app.handle_key(key(KeyCode::Char('k')));
    assert_eq!(app.offset(), app.layout().line_count() - 1);
    assert!(app.store().snapshot().global_progress < 1.0);
}

#[tokio::test(start_paused = true)]
async fn scrolling_flag_clears_after_quiet_period() {
    let mut app = create_test_app();
    app.start_at(None);
    app.handle_key(key(KeyCode::Char('j')));
    assert!(app.store().snapshot().is_scrolling);

    tokio::time::sleep(QUIET_PERIOD * 2).await;
    assert!(!app.store().snapshot().is_scrolling);
}

#[tokio::test]
async fn prepare_visuals_highlights_typed_sections() {
    let project = project();
    let pipeline = HighlightPipeline::default();
    let visuals = prepare_visuals(&project, &pipeline).await.unwrap();

    assert_eq!(visuals.len(), 1, "only the code block is typed");
    let chars = &visuals[&id("build")];
    assert_eq!(
        plain_text(chars),
        "const answer = 42;\nconsole.log(answer);"
    );
}
