//! Theme identifiers.
//!
//! A theme directory holds one subdirectory per theme; the subdirectory name
//! is the theme id. The style itself is resolved later by the renderer.

use std::fs;
use std::path::PathBuf;

use crate::error::LoadError;

/// Source of the sorted, deduplicated theme id list.
pub trait ThemeRepository {
    /// # Errors
    ///
    /// Returns [`LoadError`] if the source cannot be read or holds no themes.
    fn load_themes(&self) -> Result<Vec<String>, LoadError>;
}

/// Theme ids taken from subdirectory names.
#[derive(Debug, Clone)]
pub struct DirThemeRepository {
    root: PathBuf,
}

impl DirThemeRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ThemeRepository for DirThemeRepository {
    fn load_themes(&self) -> Result<Vec<String>, LoadError> {
        let entries = fs::read_dir(&self.root).map_err(|err| LoadError::io(&self.root, err))?;

        let mut themes = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| LoadError::io(&self.root, err))?;
            let file_type = entry
                .file_type()
                .map_err(|err| LoadError::io(entry.path(), err))?;
            if file_type.is_dir() {
                themes.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        themes.sort();
        themes.dedup();

        if themes.is_empty() {
            return Err(LoadError::NoThemes(self.root.display().to_string()));
        }
        tracing::debug!(?themes, "loaded themes");
        Ok(themes)
    }
}

/// The compiled-in catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinThemes;

impl BuiltinThemes {
    pub const IDS: [&'static str; 2] = ["dark", "light"];
}

impl ThemeRepository for BuiltinThemes {
    fn load_themes(&self) -> Result<Vec<String>, LoadError> {
        Ok(Self::IDS.iter().map(ToString::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_dir_themes_sorted_from_subdirectories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("light")).unwrap();
        fs::create_dir(dir.path().join("dark")).unwrap();
        fs::create_dir(dir.path().join("dracula")).unwrap();
        fs::write(dir.path().join("README.md"), "not a theme").unwrap();

        let themes = DirThemeRepository::new(dir.path()).load_themes().unwrap();
        assert_eq!(themes, vec!["dark", "dracula", "light"]);
    }

    #[test]
    fn test_dir_themes_empty_is_fatal() {
        let dir = tempdir().unwrap();
        let err = DirThemeRepository::new(dir.path()).load_themes().unwrap_err();
        assert!(matches!(err, LoadError::NoThemes(_)));
    }

    #[test]
    fn test_builtin_themes_are_sorted() {
        let themes = BuiltinThemes.load_themes().unwrap();
        let mut sorted = themes.clone();
        sorted.sort();
        assert_eq!(themes, sorted);
        assert_eq!(themes, vec!["dark", "light"]);
    }
}
