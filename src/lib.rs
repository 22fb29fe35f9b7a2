// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. content::PageRepository)
    clippy::module_name_repetitions
)]

//! # Folio
//!
//! A tabbed markdown page browser for the terminal.
//!
//! Folio shows an ordered set of markdown pages as tabs:
//! - Cycle pages with the arrow keys, `h`/`l` or `tab`
//! - Switch between themes with `t`
//! - Scroll each page inside a viewport that follows terminal resizes
//!
//! ## Architecture
//!
//! Folio uses The Elm Architecture (TEA) pattern:
//! - **Model**: Navigation state
//! - **Message**: Resize, key and mouse wheel events
//! - **Update**: Pure state transitions returning effects
//! - **View**: A pure compositor, drawn with ratatui
//!
//! ## Modules
//!
//! - [`app`]: Navigation state machine and event loop
//! - [`content`]: Page and theme repositories
//! - [`markdown`]: Markdown to styled text
//! - [`ui`]: Viewport, layout and compositor
//! - [`input`]: Key bindings
//! - [`config`]: Saved default flags

pub mod app;
pub mod config;
pub mod content;
pub mod error;
pub mod input;
pub mod markdown;
pub mod perf;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Effect, Message, Model, update};
    pub use crate::content::{Page, PageRepository, ThemeRepository};
    pub use crate::error::{LoadError, RenderError};
    pub use crate::input::Key;
    pub use crate::markdown::{ComrakRenderer, MarkdownRenderer, StyledText, ThemeSource};
    pub use crate::ui::viewport::Viewport;
}
