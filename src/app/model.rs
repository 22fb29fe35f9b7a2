use std::fmt;
use std::rc::Rc;

use crate::content::Page;
use crate::error::LoadError;
use crate::markdown::MarkdownRenderer;
use crate::ui::viewport::Viewport;

/// Lifecycle of the navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No terminal size observed yet
    Uninitialized,
    /// Viewport sized and content rendered
    Ready,
    /// Absorbing: no further events are processed
    Quitting,
}

/// The complete navigation state.
///
/// All state lives here. Pages, themes and the renderer are shared and never
/// change after startup; everything else is replaced on every event by
/// [`update`](super::update).
#[derive(Clone)]
pub struct Model {
    pub pages: Rc<[Page]>,
    pub themes: Rc<[String]>,
    pub renderer: Rc<dyn MarkdownRenderer>,
    /// Index into `pages`, always in range
    pub active_page: usize,
    /// Index into `themes`, always in range
    pub active_theme: usize,
    /// Arrow glyph of the last page switch
    pub last_key: &'static str,
    pub help_expanded: bool,
    pub viewport: Viewport,
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub quitting: bool,
    /// Whether the theme can be switched and is shown in the footer
    pub theming: bool,
}

impl Model {
    /// Create the startup state: first page, first theme, viewport not ready.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NoPages`] or [`LoadError::NoThemes`] when either
    /// collection is empty, since no valid index exists.
    pub fn new(
        pages: Vec<Page>,
        themes: Vec<String>,
        renderer: Rc<dyn MarkdownRenderer>,
    ) -> Result<Self, LoadError> {
        if pages.is_empty() {
            return Err(LoadError::NoPages("page collection".to_string()));
        }
        if themes.is_empty() {
            return Err(LoadError::NoThemes("theme collection".to_string()));
        }
        Ok(Self {
            pages: pages.into(),
            themes: themes.into(),
            renderer,
            active_page: 0,
            active_theme: 0,
            last_key: "",
            help_expanded: false,
            viewport: Viewport::default(),
            terminal_width: 0,
            terminal_height: 0,
            quitting: false,
            theming: true,
        })
    }

    /// Enable or disable theme switching.
    #[must_use]
    pub const fn with_theming(mut self, enabled: bool) -> Self {
        self.theming = enabled;
        self
    }

    /// Start on the named theme. Unknown names keep the first theme.
    #[must_use]
    pub fn with_initial_theme(mut self, name: &str) -> Self {
        match self.themes.iter().position(|theme| theme == name) {
            Some(index) => self.active_theme = index,
            None => tracing::warn!(theme = name, "unknown theme, using {}", self.themes[0]),
        }
        self
    }

    pub const fn phase(&self) -> Phase {
        if self.quitting {
            Phase::Quitting
        } else if self.viewport.is_ready() {
            Phase::Ready
        } else {
            Phase::Uninitialized
        }
    }

    pub fn active_page(&self) -> &Page {
        &self.pages[self.active_page]
    }

    pub fn active_theme_name(&self) -> &str {
        &self.themes[self.active_theme]
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("pages", &self.pages.len())
            .field("themes", &self.themes)
            .field("active_page", &self.active_page)
            .field("active_theme", &self.active_theme)
            .field("last_key", &self.last_key)
            .field("help_expanded", &self.help_expanded)
            .field("viewport", &self.viewport)
            .field("terminal_width", &self.terminal_width)
            .field("terminal_height", &self.terminal_height)
            .field("quitting", &self.quitting)
            .field("theming", &self.theming)
            .finish_non_exhaustive()
    }
}
