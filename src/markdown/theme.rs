//! Theme style definitions applied by the markdown renderer.
//!
//! A theme is a set of [`StyleRule`]s, one per markdown element. Themes are
//! either built in (`dark`, `light`) or read from a `theme.json` file:
//!
//! ```json
//! {
//!   "h1": { "fg": "#CBA6F7", "bold": true, "underline": true },
//!   "inline_code": { "fg": "red", "bold": true }
//! }
//! ```
//!
//! Missing elements fall back to the terminal's default style.

use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

/// A terminal color parsed from a name (`red`, `lightblue`), an index (`245`)
/// or a hex triplet (`#RRGGBB`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct ThemeColor(pub Color);

impl TryFrom<String> for ThemeColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_str(&value)
            .map(Self)
            .map_err(|err| format!("invalid color `{value}`: {err}"))
    }
}

/// Style for one markdown element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleRule {
    pub fg: Option<ThemeColor>,
    pub bg: Option<ThemeColor>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub dim: bool,
    pub strikethrough: bool,
}

impl StyleRule {
    const fn fg(color: Color) -> Self {
        Self {
            fg: Some(ThemeColor(color)),
            bg: None,
            bold: false,
            italic: false,
            underline: false,
            dim: false,
            strikethrough: false,
        }
    }

    const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    const fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    const fn plain() -> Self {
        Self {
            fg: None,
            bg: None,
            bold: false,
            italic: false,
            underline: false,
            dim: false,
            strikethrough: false,
        }
    }

    /// Convert into a ratatui style.
    pub fn to_style(self) -> Style {
        let mut style = Style::default();
        if let Some(ThemeColor(fg)) = self.fg {
            style = style.fg(fg);
        }
        if let Some(ThemeColor(bg)) = self.bg {
            style = style.bg(bg);
        }
        let mut modifier = Modifier::empty();
        if self.bold {
            modifier |= Modifier::BOLD;
        }
        if self.italic {
            modifier |= Modifier::ITALIC;
        }
        if self.underline {
            modifier |= Modifier::UNDERLINED;
        }
        if self.dim {
            modifier |= Modifier::DIM;
        }
        if self.strikethrough {
            modifier |= Modifier::CROSSED_OUT;
        }
        style.add_modifier(modifier)
    }
}

/// Styles for every markdown element the renderer emits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeStyle {
    /// Base paragraph text
    pub text: StyleRule,
    /// Heading level 1
    pub h1: StyleRule,
    /// Heading level 2
    pub h2: StyleRule,
    /// Heading level 3 and deeper
    pub heading: StyleRule,
    /// Fenced and indented code blocks
    pub code_block: StyleRule,
    /// Inline code spans
    pub inline_code: StyleRule,
    /// Block quotes
    pub block_quote: StyleRule,
    /// Link text
    pub link: StyleRule,
    /// Emphasis (italic)
    pub emphasis: StyleRule,
    /// Strong (bold)
    pub strong: StyleRule,
    /// Strikethrough
    pub strikethrough: StyleRule,
    /// List bullets and numbers
    pub list_marker: StyleRule,
    /// Table borders and cells
    pub table: StyleRule,
    /// Horizontal rules
    pub rule: StyleRule,
}

impl ThemeStyle {
    /// Parse a theme from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, names an unknown element
    /// or contains a color that cannot be parsed.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Style tuned for dark terminals.
    pub const fn dark() -> Self {
        Self {
            text: StyleRule::plain(),
            h1: StyleRule::fg(Color::Cyan).bold().underline(),
            h2: StyleRule::fg(Color::Green).bold(),
            heading: StyleRule::fg(Color::Yellow).bold(),
            code_block: StyleRule::fg(Color::Indexed(245)),
            inline_code: StyleRule::fg(Color::Red).bold(),
            block_quote: StyleRule::fg(Color::Blue).italic(),
            link: StyleRule::fg(Color::LightBlue).underline(),
            emphasis: StyleRule::plain().italic(),
            strong: StyleRule::plain().bold(),
            strikethrough: StyleRule {
                strikethrough: true,
                ..StyleRule::plain()
            },
            list_marker: StyleRule::fg(Color::Yellow),
            table: StyleRule::fg(Color::Indexed(250)),
            rule: StyleRule::fg(Color::Indexed(240)),
        }
    }

    /// Style tuned for light terminals.
    pub const fn light() -> Self {
        Self {
            text: StyleRule::plain(),
            h1: StyleRule::fg(Color::Indexed(31)).bold().underline(),
            h2: StyleRule::fg(Color::Indexed(28)).bold(),
            heading: StyleRule::fg(Color::Indexed(136)).bold(),
            code_block: StyleRule::fg(Color::Indexed(240)),
            inline_code: StyleRule::fg(Color::Indexed(124)).bold(),
            block_quote: StyleRule::fg(Color::Indexed(25)).italic(),
            link: StyleRule::fg(Color::Indexed(25)).underline(),
            emphasis: StyleRule::plain().italic(),
            strong: StyleRule::plain().bold(),
            strikethrough: StyleRule {
                strikethrough: true,
                ..StyleRule::plain()
            },
            list_marker: StyleRule::fg(Color::Indexed(136)),
            table: StyleRule::fg(Color::Indexed(238)),
            rule: StyleRule::fg(Color::Indexed(245)),
        }
    }

    /// Look up a built-in theme by id.
    pub fn builtin(id: &str) -> Option<Self> {
        match id {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    /// Style for a heading of the given level.
    pub fn heading_style(&self, level: u8) -> Style {
        match level {
            1 => self.h1.to_style(),
            2 => self.h2.to_style(),
            _ => self.heading.to_style(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_headings_are_bold() {
        for theme in [ThemeStyle::dark(), ThemeStyle::light()] {
            for level in 1..=6 {
                assert!(
                    theme
                        .heading_style(level)
                        .add_modifier
                        .contains(Modifier::BOLD)
                );
            }
        }
    }

    #[test]
    fn test_h1_is_underlined() {
        let style = ThemeStyle::dark().heading_style(1);
        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_unknown_builtin_is_none() {
        assert!(ThemeStyle::builtin("solarized").is_none());
        assert!(ThemeStyle::builtin("dark").is_some());
    }

    #[test]
    fn test_from_json_parses_hex_and_named_colors() {
        let theme = ThemeStyle::from_json(
            r##"{ "h1": { "fg": "#CBA6F7", "bold": true }, "link": { "fg": "lightblue" } }"##,
        )
        .unwrap();
        assert_eq!(theme.h1.fg, Some(ThemeColor(Color::Rgb(0xCB, 0xA6, 0xF7))));
        assert!(theme.h1.bold);
        assert_eq!(theme.link.fg, Some(ThemeColor(Color::LightBlue)));
        assert_eq!(theme.h2, StyleRule::default());
    }

    #[test]
    fn test_from_json_rejects_bad_color() {
        let result = ThemeStyle::from_json(r#"{ "h1": { "fg": "not-a-color" } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_json_rejects_unknown_element() {
        let result = ThemeStyle::from_json(r#"{ "h7": { "bold": true } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_style_rule_maps_modifiers() {
        let rule = StyleRule {
            italic: true,
            dim: true,
            ..StyleRule::default()
        };
        let style = rule.to_style();
        assert!(style.add_modifier.contains(Modifier::ITALIC));
        assert!(style.add_modifier.contains(Modifier::DIM));
        assert!(!style.add_modifier.contains(Modifier::BOLD));
    }
}
