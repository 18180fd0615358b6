//! Syntax highlighting pipeline using syntect + two-face.
//!
//! The tokenizer (syntax definitions plus a resolved theme) is expensive to
//! build, so a [`HighlightPipeline`] builds it lazily on first use, on the
//! blocking pool, and keeps it for the rest of the process. Concurrent first
//! calls share a single in-flight construction and all observe its result.
//! A failed construction is reported to every waiting caller and leaves the
//! pipeline empty, so a later call starts a fresh attempt.

use super::flatten::flatten;
use super::language::{normalize_language, Language};
use super::theme::{to_hex, ThemeSource, DEFAULT_FOREGROUND};
use super::token::{ColoredChar, FontStyle, HighlightedLine, HighlightedToken};
use crate::model::error::HighlightError;
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle as SyntectFontStyle, Style, Theme};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use tracing::{debug, warn};

/// Syntax definitions and theme, ready to highlight.
pub struct Tokenizer {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("theme", &self.theme.name)
            .field("syntaxes", &self.syntaxes.syntaxes().len())
            .finish()
    }
}

impl Tokenizer {
    /// Load the syntax set and theme. Blocking.
    pub fn build(source: &ThemeSource) -> Result<Self, HighlightError> {
        let theme = source.load()?;
        let syntaxes = two_face::syntax::extra_newlines();
        Ok(Self { syntaxes, theme })
    }

    /// Grammar for `language`, falling back to the default language's grammar
    /// and then to plain text.
    fn syntax_for(&self, language: Language) -> &SyntaxReference {
        language
            .syntax_extensions()
            .iter()
            .chain(Language::DEFAULT.syntax_extensions())
            .find_map(|ext| self.syntaxes.find_syntax_by_extension(ext))
            .unwrap_or_else(|| {
                warn!(%language, "No grammar available, highlighting as plain text");
                self.syntaxes.find_syntax_plain_text()
            })
    }

    /// Highlight `code` line by line.
    ///
    /// Produces one [`HighlightedLine`] per `\n`-separated line (so an empty
    /// string yields one empty line). `\r\n` endings are accepted.
    pub fn highlight(&self, code: &str, language: Language) -> Vec<HighlightedLine> {
        let syntax = self.syntax_for(language);
        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        code.split('\n')
            .map(|raw| {
                let line = raw.strip_suffix('\r').unwrap_or(raw);
                let with_ending = format!("{line}\n");
                match highlighter.highlight_line(&with_ending, &self.syntaxes) {
                    Ok(regions) => HighlightedLine::from_tokens(
                        regions
                            .into_iter()
                            .filter_map(|(style, text)| to_token(style, text))
                            .collect(),
                    ),
                    Err(err) => {
                        warn!(error = %err, "Highlighting failed for line, using plain text");
                        plain_line(line)
                    }
                }
            })
            .collect()
    }
}

fn to_token(style: Style, text: &str) -> Option<HighlightedToken> {
    let content = text.strip_suffix('\n').unwrap_or(text);
    if content.is_empty() {
        return None;
    }
    Some(HighlightedToken {
        content: content.to_string(),
        color: to_hex(style.foreground).unwrap_or_else(|| DEFAULT_FOREGROUND.to_string()),
        font_style: style
            .font_style
            .contains(SyntectFontStyle::ITALIC)
            .then_some(FontStyle::Italic),
    })
}

fn plain_line(line: &str) -> HighlightedLine {
    if line.is_empty() {
        return HighlightedLine::default();
    }
    HighlightedLine::from_tokens(vec![HighlightedToken {
        content: line.to_string(),
        color: DEFAULT_FOREGROUND.to_string(),
        font_style: None,
    }])
}

type Construction = Shared<BoxFuture<'static, Result<Arc<Tokenizer>, HighlightError>>>;

#[derive(Default)]
struct TokenizerSlot {
    ready: Option<Arc<Tokenizer>>,
    /// Attempt number and the shared construction future.
    in_flight: Option<(u64, Construction)>,
    attempts: u64,
}

/// Highlighter with a lazily built, memoized tokenizer.
pub struct HighlightPipeline {
    source: ThemeSource,
    slot: Mutex<TokenizerSlot>,
    constructions: Arc<AtomicUsize>,
}

impl Default for HighlightPipeline {
    fn default() -> Self {
        Self::new(ThemeSource::default())
    }
}

impl HighlightPipeline {
    pub fn new(source: ThemeSource) -> Self {
        Self {
            source,
            slot: Mutex::new(TokenizerSlot::default()),
            constructions: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn theme_source(&self) -> &ThemeSource {
        &self.source
    }

    /// How many tokenizer constructions have been started.
    pub fn construction_count(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }

    /// Whether the tokenizer has been built.
    pub fn is_ready(&self) -> bool {
        self.slot.lock().ready.is_some()
    }

    /// The shared tokenizer, building it on first use.
    pub async fn tokenizer(&self) -> Result<Arc<Tokenizer>, HighlightError> {
        let (attempt, construction) = {
            let mut slot = self.slot.lock();
            if let Some(ready) = &slot.ready {
                return Ok(Arc::clone(ready));
            }
            match &slot.in_flight {
                Some((attempt, construction)) => (*attempt, construction.clone()),
                None => {
                    slot.attempts += 1;
                    let attempt = slot.attempts;
                    let construction = self.start_construction(attempt);
                    slot.in_flight = Some((attempt, construction.clone()));
                    (attempt, construction)
                }
            }
        };

        let result = construction.await;

        let mut slot = self.slot.lock();
        if matches!(&slot.in_flight, Some((current, _)) if *current == attempt) {
            slot.in_flight = None;
            if let Ok(tokenizer) = &result {
                slot.ready = Some(Arc::clone(tokenizer));
            }
        }
        result
    }

    fn start_construction(&self, attempt: u64) -> Construction {
        let source = self.source.clone();
        let constructions = Arc::clone(&self.constructions);
        async move {
            constructions.fetch_add(1, Ordering::SeqCst);
            debug!(?source, attempt, "Building tokenizer");
            let built = tokio::task::spawn_blocking(move || Tokenizer::build(&source))
                .await
                .map_err(|e| HighlightError::ConstructionAborted(e.to_string()))?;
            match built {
                Ok(tokenizer) => {
                    debug!(attempt, "Tokenizer ready");
                    Ok(Arc::new(tokenizer))
                }
                Err(err) => {
                    warn!(error = %err, attempt, "Tokenizer construction failed");
                    Err(err)
                }
            }
        }
        .boxed()
        .shared()
    }

    /// Highlight `code` written in `language`.
    ///
    /// Unknown languages highlight under [`Language::DEFAULT`]. Only tokenizer
    /// construction can fail.
    pub async fn highlight(
        &self,
        code: &str,
        language: &str,
    ) -> Result<Vec<HighlightedLine>, HighlightError> {
        let tokenizer = self.tokenizer().await?;
        Ok(tokenizer.highlight(code, normalize_language(language)))
    }

    /// Highlight and flatten in one step.
    pub async fn highlight_chars(
        &self,
        code: &str,
        language: &str,
    ) -> Result<Vec<ColoredChar>, HighlightError> {
        Ok(flatten(&self.highlight(code, language).await?))
    }
}

static DEFAULT_PIPELINE: LazyLock<HighlightPipeline> = LazyLock::new(HighlightPipeline::default);

/// Highlight with the process-wide pipeline (built-in theme).
pub async fn highlight_code(
    code: &str,
    language: &str,
) -> Result<Vec<HighlightedLine>, HighlightError> {
    DEFAULT_PIPELINE.highlight(code, language).await
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
