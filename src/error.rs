//! Error taxonomy.
//!
//! [`LoadError`] is fatal and aborts startup before the event loop begins.
//! [`RenderError`] is recoverable: the viewport keeps its previous content.
//! Unrecognized keys are not errors at all, they resolve to
//! [`Key::Unknown`](crate::input::Key::Unknown).

use std::path::PathBuf;

use thiserror::Error;

/// Failure while loading pages or themes.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("page file `{file}` does not match `<order> - <name>.md`")]
    InvalidPageName { file: String },

    #[error("pages `{first}` and `{second}` share order {order}")]
    DuplicateOrder {
        order: u32,
        first: String,
        second: String,
    },

    #[error("no pages found in {0}")]
    NoPages(String),

    #[error("no themes found in {0}")]
    NoThemes(String),
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure while rendering a page with a theme.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown theme `{0}`")]
    UnknownTheme(String),

    #[error("failed to read theme `{theme}`: {source}")]
    ThemeIo {
        theme: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid theme `{theme}`: {source}")]
    ThemeParse {
        theme: String,
        #[source]
        source: serde_json::Error,
    },
}
