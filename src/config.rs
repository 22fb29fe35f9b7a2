//! Default flags read from rc files.
//!
//! Flags can be kept in a global config file and a local `.foliorc`
//! override. Both are only read, never written. Each file holds flag tokens,
//! one or more per line; blank lines and `#` comments are ignored.
//! `--title=<text>` takes the rest of its line so titles may contain spaces.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const APP_DIR: &str = "folio";
const LOCAL_FILE: &str = ".foliorc";
const TITLE_PREFIX: &str = "--title=";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub perf: bool,
    pub no_theming: bool,
    pub theme: Option<String>,
    pub themes_dir: Option<PathBuf>,
    pub title: Option<String>,
    pub render_debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets. Switches are OR-ed, options from `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            perf: self.perf || other.perf,
            no_theming: self.no_theming || other.no_theming,
            theme: other.theme.clone().or_else(|| self.theme.clone()),
            themes_dir: other
                .themes_dir
                .clone()
                .or_else(|| self.themes_dir.clone()),
            title: other.title.clone().or_else(|| self.title.clone()),
            render_debug_log: other
                .render_debug_log
                .clone()
                .or_else(|| self.render_debug_log.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join(APP_DIR).join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join(APP_DIR)
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join(APP_DIR).join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join(APP_DIR)
                .join("config");
        }
    }

    PathBuf::from(LOCAL_FILE)
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(LOCAL_FILE)
}

/// Load flags from `path`. A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| {
            if line.starts_with(TITLE_PREFIX) {
                vec![line.to_string()]
            } else {
                line.split_whitespace().map(ToOwned::to_owned).collect()
            }
        })
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Extract known flags from raw tokens, ignoring everything else.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut iter = tokens.iter();
    while let Some(token) = iter.next() {
        match token.as_str() {
            "--perf" => flags.perf = true,
            "--no-theming" => flags.no_theming = true,
            "--theme" => flags.theme = iter.next().cloned(),
            "--themes" => flags.themes_dir = iter.next().map(PathBuf::from),
            "--title" => flags.title = iter.next().cloned(),
            "--render-debug-log" => flags.render_debug_log = iter.next().map(PathBuf::from),
            other => {
                if let Some(value) = other.strip_prefix("--theme=") {
                    flags.theme = Some(value.to_string());
                } else if let Some(value) = other.strip_prefix("--themes=") {
                    flags.themes_dir = Some(PathBuf::from(value));
                } else if let Some(value) = other.strip_prefix(TITLE_PREFIX) {
                    flags.title = Some(value.to_string());
                } else if let Some(value) = other.strip_prefix("--render-debug-log=") {
                    flags.render_debug_log = Some(PathBuf::from(value));
                }
            }
        }
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let flags = parse_flag_tokens(&tokens(&[
            "folio",
            "--perf",
            "--no-theming",
            "--theme",
            "light",
            "--themes=assets/themes",
            "--title",
            "my portfolio",
            "--render-debug-log=render.log",
            "assets/pages",
        ]));
        assert!(flags.perf);
        assert!(flags.no_theming);
        assert_eq!(flags.theme.as_deref(), Some("light"));
        assert_eq!(flags.themes_dir, Some(PathBuf::from("assets/themes")));
        assert_eq!(flags.title.as_deref(), Some("my portfolio"));
        assert_eq!(flags.render_debug_log, Some(PathBuf::from("render.log")));
    }

    #[test]
    fn test_parse_flag_tokens_ignores_unknown_and_dangling() {
        let flags = parse_flag_tokens(&tokens(&["--verbose", "pages", "--theme"]));
        assert_eq!(flags, ConfigFlags::default());
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            perf: true,
            theme: Some("light".to_string()),
            title: Some("saved".to_string()),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            no_theming: true,
            theme: Some("dark".to_string()),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.perf);
        assert!(merged.no_theming);
        assert_eq!(merged.theme.as_deref(), Some("dark"));
        assert_eq!(merged.title.as_deref(), Some("saved"));
    }

    #[test]
    fn test_load_reads_every_flag() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".foliorc");
        fs::write(
            &path,
            "--perf --no-theming\n--theme dark\n--themes themes\n--title=Jane Doe - portfolio\n--render-debug-log render.log\n",
        )
        .unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(
            loaded,
            ConfigFlags {
                perf: true,
                no_theming: true,
                theme: Some("dark".to_string()),
                themes_dir: Some(PathBuf::from("themes")),
                title: Some("Jane Doe - portfolio".to_string()),
                render_debug_log: Some(PathBuf::from("render.log")),
            }
        );
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let loaded = load_config_flags(&dir.path().join("absent")).unwrap();
        assert_eq!(loaded, ConfigFlags::default());
    }

    #[test]
    fn test_load_skips_comments_and_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".foliorc");
        fs::write(&path, "# comment\n\n--perf --theme light\n   \n").unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert!(loaded.perf);
        assert_eq!(loaded.theme.as_deref(), Some("light"));
    }
}
