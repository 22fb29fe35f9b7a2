//! Frame geometry and decoration lines.
//!
//! The header and footer are rendered decorations whose heights feed back into
//! the viewport height, so [`decoration_heights`] measures the same text the
//! compositor draws.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use unicode_width::UnicodeWidthStr;

use crate::app::Model;

/// Columns taken by the left and right frame padding.
pub const FRAME_PADDING: u16 = 4;
/// Rows reserved for the tab row, help line and the gap between them.
pub const VERTICAL_MARGIN: u16 = 3;
/// Columns subtracted from the viewport width before wrapping markdown.
pub const WRAP_PADDING: u16 = 4;

const RULE: &str = "─";

/// Read-only styling and text for the compositor, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Label drawn before the tabs
    pub brand: Option<String>,
    pub brand_style: Style,
    pub active_tab: Style,
    pub inactive_tab: Style,
    /// Glyph between tabs, never after the last one
    pub separator: String,
    pub separator_style: Style,
    /// Page name inside the header rule
    pub title: Style,
    pub rule: Style,
    /// Scroll percentage and theme name in the footer
    pub info: Style,
    pub help_key: Style,
    pub help_desc: Style,
    pub help_separator: Style,
    pub goodbye: String,
    pub goodbye_style: Style,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let highlight = Color::Rgb(0xCB, 0xA6, 0xF7);
        let inactive = Color::Rgb(0x6C, 0x70, 0x86);
        let accent = Color::Rgb(0xF3, 0x8B, 0xA8);
        Self {
            brand: Some("folio".to_string()),
            brand_style: Style::default().fg(accent),
            active_tab: Style::default().fg(highlight).add_modifier(Modifier::BOLD),
            inactive_tab: Style::default().fg(inactive).add_modifier(Modifier::DIM),
            separator: " • ".to_string(),
            separator_style: Style::default().fg(Color::White),
            title: Style::default().fg(highlight).add_modifier(Modifier::BOLD),
            rule: Style::default().fg(inactive),
            info: Style::default().fg(inactive),
            help_key: Style::default().fg(Color::Gray),
            help_desc: Style::default().fg(Color::DarkGray),
            help_separator: Style::default().fg(Color::DarkGray),
            goodbye: "Thanks for stopping by!".to_string(),
            goodbye_style: Style::default().fg(accent),
        }
    }
}

impl LayoutConfig {
    /// Same text as the default, no styling.
    pub fn unstyled() -> Self {
        Self {
            brand_style: Style::default(),
            active_tab: Style::default(),
            inactive_tab: Style::default(),
            separator_style: Style::default(),
            title: Style::default(),
            rule: Style::default(),
            info: Style::default(),
            help_key: Style::default(),
            help_desc: Style::default(),
            help_separator: Style::default(),
            goodbye_style: Style::default(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_brand(mut self, brand: Option<String>) -> Self {
        self.brand = brand.filter(|brand| !brand.is_empty());
        self
    }

    #[must_use]
    pub fn with_goodbye(mut self, goodbye: impl Into<String>) -> Self {
        self.goodbye = goodbye.into();
        self
    }
}

/// Rule with the active page name set into it.
pub fn header_text(model: &Model, layout: &LayoutConfig) -> Text<'static> {
    let width = usize::from(model.viewport.width());
    let title = format!(" {} ", model.active_page().name);
    let lead = RULE.repeat(2);
    let tail = RULE.repeat(width.saturating_sub(2 + title.width()));
    let line = Line::from(vec![
        Span::styled(lead, layout.rule),
        Span::styled(title, layout.title),
        Span::styled(tail, layout.rule),
    ]);
    Text::from(fit_line(line, width))
}

/// Rule ending in the theme name (when theming) and the scroll percentage.
pub fn footer_text(model: &Model, layout: &LayoutConfig) -> Text<'static> {
    let width = usize::from(model.viewport.width());
    let percent = format!("{:3.0}%", model.viewport.scroll_percent() * 100.0);
    let mut info = Vec::new();
    if model.theming {
        info.push(Span::styled(
            format!(" {} ", model.active_theme_name()),
            layout.info,
        ));
    }
    info.push(Span::styled(percent, layout.info));

    let info_width: usize = info.iter().map(Span::width).sum();
    let mut spans = vec![Span::styled(
        RULE.repeat(width.saturating_sub(info_width)),
        layout.rule,
    )];
    spans.extend(info);
    Text::from(fit_line(Line::from(spans), width))
}

/// Heights of the header and footer decorations, each at least one row.
pub fn decoration_heights(model: &Model) -> (u16, u16) {
    let layout = LayoutConfig::unstyled();
    let measure = |text: Text<'_>| u16::try_from(text.height().max(1)).unwrap_or(u16::MAX);
    (
        measure(header_text(model, &layout)),
        measure(footer_text(model, &layout)),
    )
}

/// Truncate a line to at most `width` display columns.
pub fn fit_line(line: Line<'static>, width: usize) -> Line<'static> {
    if line.width() <= width {
        return line;
    }
    let mut remaining = width;
    let mut spans = Vec::new();
    for span in line.spans {
        if remaining == 0 {
            break;
        }
        let span_width = span.width();
        if span_width <= remaining {
            remaining -= span_width;
            spans.push(span);
            continue;
        }
        let mut kept = String::new();
        for ch in span.content.chars() {
            let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
            if ch_width > remaining {
                break;
            }
            remaining -= ch_width;
            kept.push(ch);
        }
        spans.push(Span::styled(kept, span.style));
        break;
    }
    Line::from(spans)
}
