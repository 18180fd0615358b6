//! scrollsync - Entry Point

use clap::Parser;
use scrollsync::config::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    CliOverrides,
};
use scrollsync::highlight::{HighlightPipeline, ThemeSource};
use scrollsync::model::{load_project, AppError, SectionId};
use scrollsync::scroll::ScrollStore;
use scrollsync::typing::TypingRenderer;
use scrollsync::view::{prepare_visuals, run_presenter, ColorConfig, PanelStyles, PresenterOptions};
use std::path::PathBuf;
use tracing::info;

/// Scroll through a case study while its code types itself out
#[derive(Parser, Debug)]
#[command(name = "scrollsync")]
#[command(version)]
#[command(about = "Scroll-synchronized typing presenter for case-study content files")]
pub struct Args {
    /// Path to a project content file (.toml or .json)
    pub project: PathBuf,

    /// Start with this section at the reading line
    #[arg(short, long)]
    pub section: Option<String>,

    /// Highlighting theme: built-in name or path to a .tmTheme file
    #[arg(long)]
    pub theme: Option<String>,

    /// Show every visual fully typed, without animation
    #[arg(long)]
    pub reduced_motion: bool,

    /// Hide the typing cursor
    #[arg(long)]
    pub no_cursor: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            theme: self.theme.clone(),
            reduced_motion: self.reduced_motion.then_some(true),
            show_cursor: self.no_cursor.then_some(false),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = load_config_with_precedence(args.config.clone()).map_err(AppError::from)?;
        let merged = merge_config(config_file);
        let with_env = apply_env_overrides(merged);
        apply_cli_overrides(with_env, args.cli_overrides())
    };

    let _log_guard = scrollsync::logging::init(&config.log_file_path).map_err(AppError::from)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let start_section = args
        .section
        .as_deref()
        .map(SectionId::new)
        .transpose()?;

    let project = load_project(&args.project).map_err(AppError::from)?;

    let pipeline = HighlightPipeline::new(ThemeSource::parse(&config.theme));
    let visuals = prepare_visuals(&project, &pipeline)
        .await
        .map_err(AppError::from)?;

    let store = ScrollStore::global().clone();
    store.set_reduced_motion(config.reduced_motion);

    let options = PresenterOptions {
        renderer: TypingRenderer::new(config.show_cursor, config.cursor_char),
        styles: PanelStyles::with_color_config(ColorConfig::from_env_and_args(args.no_color)),
    };

    run_presenter(project, visuals, store, options, start_section)
        .await
        .map_err(AppError::from)?;

    Ok(())
}
