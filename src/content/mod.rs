//! Page and theme repositories.
//!
//! Both are loaded once at startup and stay immutable for the life of the
//! process. Any failure here is a fatal [`LoadError`](crate::error::LoadError).

pub mod pages;
pub mod themes;

pub use pages::{DirPageRepository, Page, PageRepository};
pub use themes::{BuiltinThemes, DirThemeRepository, ThemeRepository};
