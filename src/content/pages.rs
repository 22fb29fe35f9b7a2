//! Markdown pages loaded from a directory.
//!
//! Every regular file in the pages directory is a page named
//! `<order> - <name>.md`, e.g. `1 - Intro.md`. Subdirectories are ignored.

use std::fs;
use std::path::PathBuf;

use crate::error::LoadError;

const NAME_DELIMITER: &str = " - ";
const PAGE_EXTENSION: &str = ".md";

/// One tab worth of markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub name: String,
    /// Raw markdown
    pub content: String,
    pub order: u32,
}

impl Page {
    pub fn new(order: u32, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            order,
        }
    }
}

/// Source of the ordered page collection.
pub trait PageRepository {
    /// Load every page, sorted ascending by order.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the source cannot be read, an item breaks the
    /// naming convention, two pages share an order, or there are no pages.
    fn load_pages(&self) -> Result<Vec<Page>, LoadError>;
}

/// Pages read from a directory of markdown files.
#[derive(Debug, Clone)]
pub struct DirPageRepository {
    root: PathBuf,
}

impl DirPageRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PageRepository for DirPageRepository {
    fn load_pages(&self) -> Result<Vec<Page>, LoadError> {
        let entries = fs::read_dir(&self.root).map_err(|err| LoadError::io(&self.root, err))?;

        let mut pages = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| LoadError::io(&self.root, err))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|err| LoadError::io(&path, err))?;
            if file_type.is_dir() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().into_owned();
            let (order, name) = parse_page_file_name(&file_name)
                .ok_or_else(|| LoadError::InvalidPageName { file: file_name.clone() })?;
            let content = fs::read_to_string(&path).map_err(|err| LoadError::io(&path, err))?;
            tracing::debug!(order, name = %name, bytes = content.len(), "loaded page");
            pages.push(Page::new(order, name, content));
        }

        if pages.is_empty() {
            return Err(LoadError::NoPages(self.root.display().to_string()));
        }
        sort_pages(pages)
    }
}

/// Split `"<order> - <name>.md"` into its order and display name.
pub fn parse_page_file_name(file_name: &str) -> Option<(u32, String)> {
    let stem = file_name.strip_suffix(PAGE_EXTENSION)?;
    let (order, name) = stem.split_once(NAME_DELIMITER)?;
    if order.is_empty() || !order.chars().all(|c| c.is_ascii_digit()) || name.is_empty() {
        return None;
    }
    Some((order.parse().ok()?, name.to_string()))
}

/// Sort pages by order, rejecting duplicate orders.
///
/// # Errors
///
/// Returns [`LoadError::DuplicateOrder`] if two pages share an order.
pub fn sort_pages(mut pages: Vec<Page>) -> Result<Vec<Page>, LoadError> {
    pages.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
    if let Some(pair) = pages.windows(2).find(|pair| pair[0].order == pair[1].order) {
        return Err(LoadError::DuplicateOrder {
            order: pair[0].order,
            first: pair[0].name.clone(),
            second: pair[1].name.clone(),
        });
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_page_file_name_accepts_convention() {
        assert_eq!(
            parse_page_file_name("1 - Intro.md"),
            Some((1, "Intro".to_string()))
        );
        assert_eq!(
            parse_page_file_name("3 - Get in touch.md"),
            Some((3, "Get in touch".to_string()))
        );
    }

    #[test]
    fn test_parse_page_file_name_rejects_violations() {
        assert_eq!(parse_page_file_name("Intro.md"), None);
        assert_eq!(parse_page_file_name("1 - Intro.txt"), None);
        assert_eq!(parse_page_file_name("a - Intro.md"), None);
        assert_eq!(parse_page_file_name("1-Intro.md"), None);
        assert_eq!(parse_page_file_name("1 - .md"), None);
    }

    #[test]
    fn test_load_pages_sorted_by_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("3 - Contact.md"), "# Contact").unwrap();
        fs::write(dir.path().join("1 - Intro.md"), "# Intro").unwrap();
        fs::write(dir.path().join("2 - Skills.md"), "# Skills").unwrap();

        let pages = DirPageRepository::new(dir.path()).load_pages().unwrap();
        let names: Vec<_> = pages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Intro", "Skills", "Contact"]);
        assert_eq!(pages[0].content, "# Intro");
        assert_eq!(pages[2].order, 3);
    }

    #[test]
    fn test_load_pages_ignores_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("drafts")).unwrap();
        fs::write(dir.path().join("1 - Intro.md"), "hi").unwrap();

        let pages = DirPageRepository::new(dir.path()).load_pages().unwrap();
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_load_pages_invalid_name_is_fatal() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("1 - Intro.md"), "hi").unwrap();
        fs::write(dir.path().join("notes.md"), "oops").unwrap();

        let err = DirPageRepository::new(dir.path()).load_pages().unwrap_err();
        assert!(matches!(err, LoadError::InvalidPageName { file } if file == "notes.md"));
    }

    #[test]
    fn test_load_pages_duplicate_order_is_fatal() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("1 - Intro.md"), "a").unwrap();
        fs::write(dir.path().join("1 - About.md"), "b").unwrap();

        let err = DirPageRepository::new(dir.path()).load_pages().unwrap_err();
        assert!(matches!(err, LoadError::DuplicateOrder { order: 1, .. }));
    }

    #[test]
    fn test_load_pages_empty_dir_is_fatal() {
        let dir = tempdir().unwrap();
        let err = DirPageRepository::new(dir.path()).load_pages().unwrap_err();
        assert!(matches!(err, LoadError::NoPages(_)));
    }

    #[test]
    fn test_load_pages_missing_dir_is_io_error() {
        let dir = tempdir().unwrap();
        let err = DirPageRepository::new(dir.path().join("missing"))
            .load_pages()
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
