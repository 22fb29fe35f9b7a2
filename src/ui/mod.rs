//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and visible range management
//! - [`layout`]: Frame geometry, decoration lines and [`LayoutConfig`]
//! - [`compose`]: The pure view compositor

pub mod compose;
pub mod layout;
pub mod viewport;

mod render;

pub use compose::{View, compose};
pub use layout::LayoutConfig;
pub use render::{content_area, render};
