//! Terminal presenter (impure shell).
//!
//! Scrolling the narrative pane is the only input. Every offset change is
//! measured by the [`Viewport`] and pushed into the [`ScrollStore`]; the
//! visual panel and status bar are pure functions of the store snapshot and
//! its projections. Store changes that happen on their own, such as the
//! quiet-period timer clearing `is_scrolling`, wake the loop for a redraw.

pub mod narrative;
pub mod status;
pub mod styles;
pub mod visual;

pub use narrative::{wrap_text, NarrativeLayout, NarrativePane};
pub use status::StatusBar;
pub use styles::{hex_color, ColorConfig, PanelStyles};
pub use visual::{VisualContent, VisualPanel};

use crate::config::KeyBindings;
use crate::highlight::{ColoredChar, HighlightPipeline};
use crate::model::{HighlightError, KeyAction, Project, Section, SectionId};
use crate::scroll::{Projections, ScrollStore, Subscription, Viewport};
use crate::typing::TypingRenderer;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEvent, KeyEventKind,
        MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use futures::StreamExt;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout, Rect},
    Terminal,
};
use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Notify;
use tracing::{debug, info, warn};

/// Rows scrolled per mouse wheel notch.
pub const WHEEL_LINES: i64 = 3;

/// Share of the width given to the narrative pane, in percent.
const NARRATIVE_PERCENT: u16 = 60;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Highlighted characters per section, for sections with typed content.
pub type Visuals = HashMap<SectionId, Vec<ColoredChar>>;

/// Highlight and flatten every section's typed source.
///
/// # Errors
///
/// Fails only if the pipeline cannot build its tokenizer.
pub async fn prepare_visuals(
    project: &Project,
    pipeline: &HighlightPipeline,
) -> Result<Visuals, HighlightError> {
    let mut visuals = HashMap::new();
    for section in &project.sections {
        if let Some((code, language)) = section.typed_source() {
            let chars = pipeline.highlight_chars(code, language).await?;
            debug!(section = %section.id, chars = chars.len(), "Visual prepared");
            visuals.insert(section.id.clone(), chars);
        }
    }
    Ok(visuals)
}

/// Title for a section's visual panel.
fn visual_title(section: &Section) -> &str {
    if let Some(block) = &section.code_block {
        return block.filename.as_deref().unwrap_or(&block.language);
    }
    section.visual.as_ref().map_or("visual", |v| v.kind.label())
}

#[derive(Debug, Clone, Copy)]
struct PaneAreas {
    narrative: Rect,
    visual: Rect,
    status: Rect,
}

fn split_areas(area: Rect) -> PaneAreas {
    let [main, status] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
    let [narrative, visual] = Layout::horizontal([
        Constraint::Percentage(NARRATIVE_PERCENT),
        Constraint::Percentage(100 - NARRATIVE_PERCENT),
    ])
    .areas(main);
    PaneAreas {
        narrative,
        visual,
        status,
    }
}

/// Inner size of the bordered narrative pane for a terminal of `size`.
fn narrative_inner(width: u16, height: u16) -> (u16, u16) {
    let narrative = split_areas(Rect::new(0, 0, width.max(1), height)).narrative;
    (
        narrative.width.saturating_sub(2).max(1),
        narrative.height.saturating_sub(2).max(1),
    )
}

/// Presentation settings resolved from config and CLI.
#[derive(Debug, Clone, Copy)]
pub struct PresenterOptions {
    pub renderer: TypingRenderer,
    pub styles: PanelStyles,
}

/// Main presenter application
///
/// Generic over backend to support testing with TestBackend
pub struct PresenterApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    project: Project,
    visuals: Visuals,
    store: ScrollStore,
    redraw: Arc<Notify>,
    _redraw_subscription: Subscription,
    key_bindings: KeyBindings,
    options: PresenterOptions,
    layout: NarrativeLayout,
    viewport: Viewport,
    viewport_height: u16,
    offset: usize,
}

impl<B> PresenterApp<B>
where
    B: Backend,
{
    pub fn new(
        terminal: Terminal<B>,
        project: Project,
        visuals: Visuals,
        store: ScrollStore,
        options: PresenterOptions,
    ) -> Result<Self, TuiError> {
        let size = terminal.size()?;
        let (width, height) = narrative_inner(size.width, size.height);
        let layout = NarrativeLayout::build(&project, width);
        let viewport = layout.viewport(height);

        let redraw = Arc::new(Notify::new());
        let redraw_subscription = {
            let redraw = Arc::clone(&redraw);
            store.subscribe(move |_| redraw.notify_one())
        };
        Ok(Self {
            terminal,
            project,
            visuals,
            store,
            redraw,
            _redraw_subscription: redraw_subscription,
            key_bindings: KeyBindings::default(),
            options,
            layout,
            viewport,
            viewport_height: height,
            offset: 0,
        })
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn store(&self) -> &ScrollStore {
        &self.store
    }

    pub fn layout(&self) -> &NarrativeLayout {
        &self.layout
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    fn max_offset(&self) -> usize {
        self.viewport.max_offset(f64::from(self.viewport_height)) as usize
    }

    /// Measure the current offset and push it into the store.
    fn observe(&mut self) {
        self.viewport.observe(
            &self.store,
            self.offset as f64,
            f64::from(self.viewport_height),
        );
    }

    /// Position the narrative at `section` (or the top) and seed the store.
    pub fn start_at(&mut self, section: Option<&SectionId>) {
        let target = match section {
            Some(id) => match self.viewport.offset_for(id, f64::from(self.viewport_height)) {
                Some(offset) => offset.ceil() as usize,
                None => {
                    warn!(section = %id, "Unknown start section, starting at the top");
                    0
                }
            },
            None => 0,
        };
        self.offset = target.min(self.max_offset());
        self.observe();
    }

    /// Scroll to an absolute offset. No-op if it does not change.
    pub fn scroll_to(&mut self, offset: usize) {
        let offset = offset.min(self.max_offset());
        if offset == self.offset {
            return;
        }
        self.offset = offset;
        self.observe();
    }

    pub fn scroll_by(&mut self, delta: i64) {
        let target = self
            .offset
            .saturating_add_signed(delta as isize)
            .min(self.max_offset());
        self.scroll_to(target);
    }

    fn page(&self) -> i64 {
        i64::from(self.viewport_height.saturating_sub(1).max(1))
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        match action {
            KeyAction::Quit => return true,
            KeyAction::ScrollDown | KeyAction::ScrollUp => {
                if let Some(delta) = action.line_delta() {
                    self.scroll_by(delta);
                }
            }
            KeyAction::PageDown => self.scroll_by(self.page()),
            KeyAction::PageUp => self.scroll_by(-self.page()),
            KeyAction::ScrollToTop => self.scroll_to(0),
            KeyAction::ScrollToBottom => self.scroll_to(self.max_offset()),
            KeyAction::ToggleReducedMotion => {
                let reduced = !self.store.snapshot().reduced_motion;
                info!(reduced_motion = reduced, "Reduced motion toggled");
                self.store.set_reduced_motion(reduced);
            }
        }
        false
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_LINES),
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_LINES),
            _ => {}
        }
    }

    /// Re-wrap the narrative for a new terminal size, keeping the offset.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        debug!("Handling resize to {}x{}", width, height);
        let (inner_width, inner_height) = narrative_inner(width, height);
        if inner_width != self.layout.width() {
            self.layout = NarrativeLayout::build(&self.project, inner_width);
        }
        self.viewport_height = inner_height;
        self.viewport = self.layout.viewport(inner_height);
        self.offset = self.offset.min(self.max_offset());
        self.observe();
    }

    /// Returns true if app should quit
    fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                false
            }
            Event::Resize(width, height) => {
                self.handle_resize(width, height);
                false
            }
            _ => false,
        }
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let state = self.store.snapshot();
        let projections = Projections::of(&state);
        let progress = projections.typing_progress;

        let section = state
            .current_section
            .as_ref()
            .and_then(|id| self.project.section(id));
        let renderer = self.options.renderer;
        let content = match section {
            Some(section) => match (self.visuals.get(&section.id), &section.visual) {
                (Some(chars), _) => VisualContent::Colored(renderer.render_colored(chars, progress)),
                (None, Some(visual)) => {
                    VisualContent::Plain(renderer.render(&visual.content, progress))
                }
                (None, None) => VisualContent::Empty,
            },
            None => VisualContent::Empty,
        };
        let visual_title = section.map_or("visual", visual_title);
        let section_title = section.map(|s| s.title.as_str());

        let styles = &self.options.styles;
        let layout = &self.layout;
        let project_title = self.project.title.as_str();
        let offset = self.offset;

        self.terminal.draw(|frame| {
            let areas = split_areas(frame.area());
            frame.render_widget(
                NarrativePane::new(
                    layout,
                    offset,
                    state.current_section.as_ref(),
                    project_title,
                    styles,
                ),
                areas.narrative,
            );
            frame.render_widget(
                VisualPanel::new(content, visual_title, styles),
                areas.visual,
            );
            frame.render_widget(
                StatusBar::new(&state, projections, section_title, styles),
                areas.status,
            );
        })?;

        Ok(())
    }

    /// Run the event loop until the user quits.
    ///
    /// Redraws after every input event and whenever the store changes.
    pub async fn run(&mut self) -> Result<(), TuiError> {
        let mut events = EventStream::new();
        let redraw = Arc::clone(&self.redraw);

        self.draw()?;
        loop {
            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(event)) => {
                        if self.handle_event(event) {
                            return Ok(());
                        }
                    }
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(()),
                },
                () = redraw.notified() => {}
            }
            self.draw()?;
        }
    }
}

/// Set up the terminal, run the presenter, and restore the terminal.
///
/// The terminal is restored even when the loop fails.
pub async fn run_presenter(
    project: Project,
    visuals: Visuals,
    store: ScrollStore,
    options: PresenterOptions,
    start_section: Option<SectionId>,
) -> Result<(), TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = async {
        let mut app = PresenterApp::new(terminal, project, visuals, store, options)?;
        app.start_at(start_section.as_ref());
        app.run().await
    }
    .await;

    restore_terminal()?;
    result
}

fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "presenter_tests.rs"]
mod tests;
