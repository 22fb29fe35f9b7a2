//! Navigation state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete navigation state
//! - [`Message`]: All events the state machine consumes
//! - [`update`]: Pure function for state transitions, returning [`Effect`]s
//! - [`App::run`]: Main event loop with rendering

mod event_loop;
mod model;
mod update;

pub use model::{Model, Phase};
pub use update::{Effect, Message, update};

use crate::ui::LayoutConfig;

/// Main application struct that owns the state and runs the event loop.
#[derive(Debug)]
pub struct App {
    model: Model,
    layout: LayoutConfig,
}

impl App {
    /// Create a new application around the startup state.
    pub fn new(model: Model) -> Self {
        Self {
            model,
            layout: LayoutConfig::default(),
        }
    }

    /// Replace the compositor styling.
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }
}
