//! View compositor: a pure mapping from state to the lines of a frame.

use ratatui::text::{Line, Span, Text};
use unicode_width::UnicodeWidthStr;

use crate::app::{Model, Phase};
use crate::input::{self, Binding};
use crate::ui::layout::{LayoutConfig, fit_line, footer_text, header_text};

const HELP_SEPARATOR: &str = " • ";
const HELP_COLUMN_GAP: &str = "    ";
const ELLIPSIS: &str = "…";

/// A composed frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Browse(BrowseView),
    /// Terminal frame once quitting
    Goodbye(Vec<Line<'static>>),
}

/// The regular frame, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseView {
    pub tabs: Line<'static>,
    pub header: Text<'static>,
    /// Visible slice of the viewport, never padded
    pub body: Vec<Line<'static>>,
    pub footer: Text<'static>,
    pub help: Text<'static>,
}

impl View {
    /// Flatten into one block of text.
    pub fn into_text(self) -> Text<'static> {
        match self {
            Self::Goodbye(lines) => Text::from(lines),
            Self::Browse(view) => {
                let mut lines = vec![view.tabs];
                lines.extend(view.header.lines);
                lines.extend(view.body);
                lines.extend(view.footer.lines);
                lines.extend(view.help.lines);
                Text::from(lines)
            }
        }
    }
}

/// Compose the frame for `model`.
pub fn compose(model: &Model, layout: &LayoutConfig) -> View {
    if model.phase() == Phase::Quitting {
        return View::Goodbye(goodbye_lines(layout));
    }

    let width = usize::from(model.viewport.width());
    View::Browse(BrowseView {
        tabs: tabs_line(model, layout),
        header: header_text(model, layout),
        body: model.viewport.visible_slice().to_vec(),
        footer: footer_text(model, layout),
        help: help_text(model, layout, width),
    })
}

/// Brand label followed by every page name, separated but not trailed.
pub fn tabs_line(model: &Model, layout: &LayoutConfig) -> Line<'static> {
    let mut spans = Vec::new();
    if let Some(brand) = &layout.brand {
        spans.push(Span::styled(format!("{brand} "), layout.brand_style));
    }
    let last = model.pages.len().saturating_sub(1);
    for (index, page) in model.pages.iter().enumerate() {
        let style = if index == model.active_page {
            layout.active_tab
        } else {
            layout.inactive_tab
        };
        spans.push(Span::styled(page.name.clone(), style));
        if index != last {
            spans.push(Span::styled(layout.separator.clone(), layout.separator_style));
        }
    }
    Line::from(spans)
}

/// Short help on one line, or full help in columns when expanded.
pub fn help_text(model: &Model, layout: &LayoutConfig, width: usize) -> Text<'static> {
    if model.help_expanded {
        full_help_text(&input::full_help(model.theming), layout, width)
    } else {
        Text::from(short_help_line(&input::short_help(model.theming), layout, width))
    }
}

fn short_help_line(bindings: &[&Binding], layout: &LayoutConfig, width: usize) -> Line<'static> {
    let mut spans = Vec::new();
    for (index, binding) in bindings.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(HELP_SEPARATOR, layout.help_separator));
        }
        spans.push(Span::styled(binding.help_key, layout.help_key));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(binding.help_desc, layout.help_desc));
    }
    fit_line(Line::from(spans), width)
}

fn full_help_text(columns: &[Vec<&Binding>], layout: &LayoutConfig, width: usize) -> Text<'static> {
    let rows = columns.iter().map(Vec::len).max().unwrap_or(0);
    let mut lines: Vec<Vec<Span<'static>>> = vec![Vec::new(); rows];
    let mut used = 0_usize;

    for (index, column) in columns.iter().enumerate() {
        let key_width = column.iter().map(|b| b.help_key.width()).max().unwrap_or(0);
        let desc_width = column.iter().map(|b| b.help_desc.width()).max().unwrap_or(0);
        let gap = if index == 0 { 0 } else { HELP_COLUMN_GAP.width() };
        let column_width = gap + key_width + 1 + desc_width;

        if used + column_width > width {
            if let Some(first) = lines.first_mut()
                && used + gap + ELLIPSIS.width() <= width
            {
                first.push(Span::styled(
                    format!("{}{ELLIPSIS}", " ".repeat(gap)),
                    layout.help_separator,
                ));
            }
            break;
        }

        for (row, line) in lines.iter_mut().enumerate() {
            if gap > 0 {
                line.push(Span::raw(HELP_COLUMN_GAP));
            }
            match column.get(row) {
                Some(binding) => {
                    let key_pad = " ".repeat(key_width - binding.help_key.width());
                    let desc_pad = " ".repeat(desc_width - binding.help_desc.width());
                    line.push(Span::styled(
                        format!("{}{key_pad}", binding.help_key),
                        layout.help_key,
                    ));
                    line.push(Span::raw(" "));
                    line.push(Span::styled(
                        format!("{}{desc_pad}", binding.help_desc),
                        layout.help_desc,
                    ));
                }
                None => line.push(Span::raw(" ".repeat(key_width + 1 + desc_width))),
            }
        }
        used += column_width;
    }

    Text::from(
        lines
            .into_iter()
            .map(|spans| {
                let mut line = Line::from(spans);
                trim_trailing_spaces(&mut line);
                line
            })
            .collect::<Vec<_>>(),
    )
}

fn trim_trailing_spaces(line: &mut Line<'static>) {
    while line
        .spans
        .last()
        .is_some_and(|span| span.content.chars().all(|c| c == ' '))
    {
        line.spans.pop();
    }
    if let Some(last) = line.spans.last_mut() {
        let trimmed = last.content.trim_end().to_string();
        last.content = trimmed.into();
    }
}

/// Rounded box around the goodbye message.
pub fn goodbye_lines(layout: &LayoutConfig) -> Vec<Line<'static>> {
    let inner = layout.goodbye.width() + 2;
    let style = layout.goodbye_style;
    vec![
        Line::styled(format!("╭{}╮", "─".repeat(inner)), style),
        Line::styled(format!("│ {} │", layout.goodbye), style),
        Line::styled(format!("╰{}╯", "─".repeat(inner)), style),
    ]
}

/// Text content of lines without styling.
pub fn plain_text(lines: &[Line<'_>]) -> String {
    lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
