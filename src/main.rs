//! Folio - A tabbed markdown page browser for the terminal.
//!
//! # Usage
//!
//! ```bash
//! folio                       # pages from assets/pages
//! folio ~/portfolio/pages --themes ~/portfolio/themes
//! folio --no-theming --title "Jane Doe"
//! ```

use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;

use folio::app::{App, Model};
use folio::config::{global_config_path, load_config_flags, local_override_path, parse_flag_tokens};
use folio::content::{
    BuiltinThemes, DirPageRepository, DirThemeRepository, PageRepository, ThemeRepository,
};
use folio::markdown::{ComrakRenderer, ThemeSource};
use folio::perf;
use folio::ui::LayoutConfig;

const DEFAULT_PAGES_DIR: &str = "assets/pages";
const DEFAULT_THEMES_DIR: &str = "assets/themes";
const DEFAULT_TITLE: &str = "folio";

/// A tabbed markdown page browser for the terminal
#[derive(Parser, Debug)]
#[command(name = "folio", version, about, long_about = None)]
struct Cli {
    /// Directory of `<order> - <name>.md` pages
    #[arg(value_name = "PAGES_DIR", default_value = DEFAULT_PAGES_DIR)]
    pages: PathBuf,

    /// Directory with one subdirectory per theme (default: assets/themes, else built-in)
    #[arg(long, value_name = "DIR")]
    themes: Option<PathBuf>,

    /// Theme to start with
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Disable theme switching
    #[arg(long)]
    no_theming: bool,

    /// Label shown before the tabs
    #[arg(long, value_name = "TEXT")]
    title: Option<String>,

    /// Enable performance logging
    #[arg(long)]
    perf: bool,

    /// Write state machine and render debug events to a file
    #[arg(long, value_name = "PATH")]
    render_debug_log: Option<PathBuf>,
}

fn theme_setup(themes_dir: Option<PathBuf>) -> Result<(Vec<String>, ThemeSource)> {
    let dir = themes_dir.or_else(|| {
        let default = Path::new(DEFAULT_THEMES_DIR);
        default.is_dir().then(|| default.to_path_buf())
    });
    match dir {
        Some(dir) => {
            let themes = DirThemeRepository::new(&dir)
                .load_themes()
                .context("Failed to load themes")?;
            Ok((themes, ThemeSource::Directory(dir)))
        }
        None => Ok((BuiltinThemes.load_themes()?, ThemeSource::Builtin)),
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let cli_flags = parse_flag_tokens(&raw_args);
    let global_flags = load_config_flags(&global_config_path())?;
    let local_flags = load_config_flags(&local_override_path())?;
    let effective = global_flags.union(&local_flags).union(&cli_flags);

    perf::set_enabled(effective.perf);
    let render_debug_log_path = effective
        .render_debug_log
        .clone()
        .or_else(|| std::env::var_os("FOLIO_RENDER_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(render_debug_log_path.as_deref()) {
        tracing::warn!(
            path = ?render_debug_log_path,
            "failed to initialize render debug log: {err}"
        );
    }

    let load_scope = perf::scope("startup.load");
    let pages = DirPageRepository::new(&cli.pages)
        .load_pages()
        .with_context(|| format!("Failed to load pages from {}", cli.pages.display()))?;
    let (themes, source) = theme_setup(effective.themes_dir.clone())?;
    drop(load_scope);

    let mut model = Model::new(pages, themes, Rc::new(ComrakRenderer::new(source)))?
        .with_theming(!effective.no_theming);
    if let Some(theme) = effective.theme.as_deref() {
        model = model.with_initial_theme(theme);
    }

    let layout = LayoutConfig::default()
        .with_brand(Some(effective.title.unwrap_or_else(|| DEFAULT_TITLE.to_string())));

    App::new(model)
        .with_layout(layout)
        .run()
        .context("Application error")
}
