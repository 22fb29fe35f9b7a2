//! Markdown rendering.
//!
//! Turns raw markdown into [`StyledText`]: wrapped lines of styled spans that
//! the viewport can scroll over. The app only depends on the
//! [`MarkdownRenderer`] trait; [`ComrakRenderer`] is the production
//! implementation.

mod blocks;
pub mod theme;

use std::fs;
use std::path::PathBuf;

use ratatui::text::Line;

use crate::error::RenderError;
use crate::perf;
pub use theme::ThemeStyle;

/// Name of the style file inside a theme directory.
pub const THEME_FILE_NAME: &str = "theme.json";

/// Rendered, wrapped, styled lines.
pub type StyledText = Vec<Line<'static>>;

/// Pure markdown → styled text conversion.
pub trait MarkdownRenderer {
    /// Render `markdown` wrapped to `wrap_width` columns using theme `theme`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the theme cannot be resolved.
    fn render(
        &self,
        markdown: &str,
        wrap_width: u16,
        theme: &str,
    ) -> Result<StyledText, RenderError>;
}

/// Where theme ids are resolved to styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeSource {
    /// The compiled-in `dark` and `light` styles.
    Builtin,
    /// `<dir>/<id>/theme.json`, read on every render.
    Directory(PathBuf),
}

impl ThemeSource {
    /// Resolve a theme id to its style.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the id is unknown or its file is unreadable
    /// or invalid.
    pub fn resolve(&self, theme: &str) -> Result<ThemeStyle, RenderError> {
        match self {
            Self::Builtin => {
                ThemeStyle::builtin(theme).ok_or_else(|| RenderError::UnknownTheme(theme.to_string()))
            }
            Self::Directory(dir) => {
                let path = dir.join(theme).join(THEME_FILE_NAME);
                let json = fs::read_to_string(&path).map_err(|source| RenderError::ThemeIo {
                    theme: theme.to_string(),
                    source,
                })?;
                ThemeStyle::from_json(&json).map_err(|source| RenderError::ThemeParse {
                    theme: theme.to_string(),
                    source,
                })
            }
        }
    }
}

/// Renderer backed by the comrak CommonMark parser.
#[derive(Debug, Clone)]
pub struct ComrakRenderer {
    source: ThemeSource,
}

impl ComrakRenderer {
    pub const fn new(source: ThemeSource) -> Self {
        Self { source }
    }
}

impl Default for ComrakRenderer {
    fn default() -> Self {
        Self::new(ThemeSource::Builtin)
    }
}

impl MarkdownRenderer for ComrakRenderer {
    fn render(
        &self,
        markdown: &str,
        wrap_width: u16,
        theme: &str,
    ) -> Result<StyledText, RenderError> {
        let _scope = perf::scope("markdown.render");
        let style = self.source.resolve(theme)?;
        let lines = blocks::render_lines(markdown, usize::from(wrap_width), &style);
        perf::log_event(
            "markdown.render",
            format!(
                "theme={theme} wrap={wrap_width} bytes={} lines={}",
                markdown.len(),
                lines.len()
            ),
        );
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_renders_known_themes() {
        let renderer = ComrakRenderer::default();
        let dark = renderer.render("# Hi", 40, "dark").unwrap();
        let light = renderer.render("# Hi", 40, "light").unwrap();
        assert_eq!(dark.len(), 1);
        assert_ne!(dark[0].spans[0].style, light[0].spans[0].style);
    }

    #[test]
    fn test_builtin_unknown_theme_is_error() {
        let renderer = ComrakRenderer::default();
        let err = renderer.render("# Hi", 40, "nope").unwrap_err();
        assert!(matches!(err, RenderError::UnknownTheme(name) if name == "nope"));
    }

    #[test]
    fn test_directory_theme_is_read_from_json() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("mono")).unwrap();
        fs::write(
            dir.path().join("mono").join(THEME_FILE_NAME),
            r#"{ "h1": { "fg": "magenta" } }"#,
        )
        .unwrap();

        let renderer = ComrakRenderer::new(ThemeSource::Directory(dir.path().to_path_buf()));
        let lines = renderer.render("# Hi", 40, "mono").unwrap();
        assert_eq!(
            lines[0].spans[0].style.fg,
            Some(ratatui::style::Color::Magenta)
        );
    }

    #[test]
    fn test_directory_theme_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let renderer = ComrakRenderer::new(ThemeSource::Directory(dir.path().to_path_buf()));
        let err = renderer.render("text", 40, "ghost").unwrap_err();
        assert!(matches!(err, RenderError::ThemeIo { .. }));
    }

    #[test]
    fn test_directory_theme_invalid_json_is_parse_error() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("broken")).unwrap();
        fs::write(dir.path().join("broken").join(THEME_FILE_NAME), "{ nope").unwrap();
        let renderer = ComrakRenderer::new(ThemeSource::Directory(dir.path().to_path_buf()));
        let err = renderer.render("text", 40, "broken").unwrap_err();
        assert!(matches!(err, RenderError::ThemeParse { .. }));
    }

    #[test]
    fn test_wrap_width_bounds_line_width() {
        let renderer = ComrakRenderer::default();
        let lines = renderer
            .render(&"word ".repeat(100), 20, "dark")
            .unwrap();
        assert!(lines.iter().all(|line| line.width() <= 20));
    }
}
