//! Comrak AST walk producing wrapped, styled terminal lines.

use comrak::nodes::{AstNode, ListDelimType, ListType, NodeValue, TableAlignment};
use comrak::{Arena, Options, parse_document};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::ThemeStyle;

const CODE_RIGHT_PADDING: usize = 3;
/// Borders, padding and one content column.
const CODE_FRAME_MIN_WIDTH: usize = 4 + CODE_RIGHT_PADDING + 1;

/// Render markdown into lines no wider than `wrap_width` columns.
pub(super) fn render_lines(markdown: &str, wrap_width: usize, theme: &ThemeStyle) -> Vec<Line<'static>> {
    let arena = Arena::new();
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;

    let root = parse_document(&arena, markdown, &options);
    let mut writer = BlockWriter {
        theme,
        width: wrap_width.max(1),
        lines: Vec::new(),
    };
    let context = BlockContext {
        text: theme.text.to_style(),
        ..BlockContext::default()
    };
    writer.container(root, &context);
    writer.finish()
}

/// Prefixes and base style inherited from enclosing quotes and list items.
#[derive(Debug, Clone, Default)]
struct BlockContext {
    /// Prefix for the first emitted row (carries list markers)
    first: Vec<Span<'static>>,
    /// Prefix for every following row
    rest: Vec<Span<'static>>,
    /// Inside a tight list: no blank rows between blocks
    tight: bool,
    /// Base text style
    text: Style,
}

impl BlockContext {
    fn nested(&self, first: Span<'static>, rest: Span<'static>) -> Self {
        let mut next = self.clone();
        next.first.push(first);
        next.rest.push(rest);
        next
    }

    fn continuation(&self) -> Self {
        Self {
            first: self.rest.clone(),
            ..self.clone()
        }
    }

    fn prefix_width(&self) -> usize {
        spans_width(&self.first).max(spans_width(&self.rest))
    }
}

struct BlockWriter<'t> {
    theme: &'t ThemeStyle,
    width: usize,
    lines: Vec<Line<'static>>,
}

impl BlockWriter<'_> {
    fn finish(mut self) -> Vec<Line<'static>> {
        while self.lines.last().is_some_and(|line| line.spans.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }

    fn blank(&mut self) {
        if self.lines.last().is_some_and(|line| !line.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }

    fn end_block(&mut self, context: &BlockContext) {
        if !context.tight {
            self.blank();
        }
    }

    fn available(&self, context: &BlockContext) -> usize {
        self.width.saturating_sub(context.prefix_width()).max(1)
    }

    fn emit(&mut self, context: &BlockContext, rows: Vec<Vec<Span<'static>>>) {
        for (index, row) in rows.into_iter().enumerate() {
            let mut spans = if index == 0 {
                context.first.clone()
            } else {
                context.rest.clone()
            };
            spans.extend(row);
            self.lines.push(Line::from(fit_spans(spans, self.width)));
        }
    }

    fn container<'a>(&mut self, node: &'a AstNode<'a>, context: &BlockContext) {
        let mut current = context.clone();
        let mut any = false;
        for child in node.children() {
            self.block(child, &current);
            current = context.continuation();
            any = true;
        }
        if !any && !context.first.is_empty() {
            self.emit(context, vec![Vec::new()]);
        }
    }

    fn block<'a>(&mut self, node: &'a AstNode<'a>, context: &BlockContext) {
        match &node.data.borrow().value {
            NodeValue::Heading(heading) => {
                let style = context.text.patch(self.theme.heading_style(heading.level));
                let mut spans = vec![Span::styled(
                    format!("{} ", "#".repeat(usize::from(heading.level))),
                    style,
                )];
                spans.extend(collect_inline(node, style, self.theme));
                let rows = wrap_spans(spans, self.available(context));
                self.emit(context, rows);
                self.end_block(context);
            }

            NodeValue::Paragraph => {
                let spans = collect_inline(node, context.text, self.theme);
                let rows = wrap_spans(spans, self.available(context));
                self.emit(context, rows);
                self.end_block(context);
            }

            NodeValue::CodeBlock(code_block) => {
                let info = code_block.info.to_string();
                let literal = code_block.literal.to_string();
                let rows = self.code_block_rows(&info, &literal, context);
                self.emit(context, rows);
                self.end_block(context);
            }

            NodeValue::HtmlBlock(html) => {
                let literal = html.literal.trim_end_matches('\n').to_string();
                let rows = wrap_spans(
                    vec![Span::styled(literal, context.text)],
                    self.available(context),
                );
                self.emit(context, rows);
                self.end_block(context);
            }

            NodeValue::List(list) => {
                let count = node.children().count();
                let last_number = list.start + count.saturating_sub(1);
                let number_width = last_number.to_string().len();
                let delimiter = match list.delimiter {
                    ListDelimType::Paren => ')',
                    ListDelimType::Period => '.',
                };
                let marker_style = self.theme.list_marker.to_style();

                for (index, item) in node.children().enumerate() {
                    let marker = match (task_state(item), list.list_type) {
                        (Some(true), _) => "✓ ".to_string(),
                        (Some(false), _) => "□ ".to_string(),
                        (None, ListType::Bullet) => "• ".to_string(),
                        (None, ListType::Ordered) => format!(
                            "{:>width$}{delimiter} ",
                            list.start + index,
                            width = number_width
                        ),
                    };
                    let padding = " ".repeat(marker.width());
                    let mut item_context =
                        context.nested(Span::styled(marker, marker_style), Span::raw(padding));
                    item_context.tight = list.tight;
                    self.container(item, &item_context);
                }
                self.end_block(context);
            }

            NodeValue::BlockQuote => {
                let bar_style = self.theme.block_quote.to_style();
                let mut quoted = context.nested(
                    Span::styled("│ ", bar_style),
                    Span::styled("│ ", bar_style),
                );
                quoted.text = context.text.patch(bar_style);
                quoted.tight = false;
                self.container(node, &quoted);
                self.end_block(context);
            }

            NodeValue::ThematicBreak => {
                let rule = "─".repeat(self.available(context));
                self.emit(
                    context,
                    vec![vec![Span::styled(rule, self.theme.rule.to_style())]],
                );
                self.end_block(context);
            }

            NodeValue::Table(table) => {
                let alignments = table.alignments.clone();
                let rows = self.table_rows(node, &alignments, context);
                self.emit(context, rows);
                self.end_block(context);
            }

            _ => self.container(node, context),
        }
    }

    fn code_block_rows(
        &self,
        info: &str,
        literal: &str,
        context: &BlockContext,
    ) -> Vec<Vec<Span<'static>>> {
        let style = self.theme.code_block.to_style();
        let available = self.available(context);
        if available < CODE_FRAME_MIN_WIDTH {
            return literal
                .lines()
                .map(|raw| vec![Span::styled(truncate_to_width(raw, available), style)])
                .collect();
        }
        // Frame: "│ " + content + padding + " │"
        let max_content = available - 4 - CODE_RIGHT_PADDING;
        let content_width = literal
            .lines()
            .map(UnicodeWidthStr::width)
            .max()
            .unwrap_or(0)
            .min(max_content);
        let frame_inner = content_width + 2 + CODE_RIGHT_PADDING;

        let title = info.split_whitespace().next().unwrap_or("code");
        let label = truncate_to_width(&format!(" {title} "), frame_inner);
        let top = format!(
            "┌{label}{}┐",
            "─".repeat(frame_inner.saturating_sub(label.width()))
        );

        let mut rows = vec![vec![Span::styled(top, style)]];
        for raw in literal.lines() {
            let text = truncate_to_width(raw, content_width);
            let padding = " ".repeat(content_width.saturating_sub(text.width()) + CODE_RIGHT_PADDING);
            rows.push(vec![
                Span::styled("│ ", style),
                Span::styled(text, style),
                Span::styled(format!("{padding} │"), style),
            ]);
        }
        rows.push(vec![Span::styled(
            format!("└{}┘", "─".repeat(frame_inner)),
            style,
        )]);
        rows
    }

    fn table_rows<'a>(
        &self,
        table: &'a AstNode<'a>,
        alignments: &[TableAlignment],
        context: &BlockContext,
    ) -> Vec<Vec<Span<'static>>> {
        let mut cells: Vec<Vec<String>> = Vec::new();
        let mut has_header = false;
        for row in table.children() {
            if matches!(row.data.borrow().value, NodeValue::TableRow(true)) {
                has_header = true;
            }
            let texts = row
                .children()
                .map(|cell| {
                    extract_text(cell)
                        .split_whitespace()
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect();
            cells.push(texts);
        }

        let columns = cells.iter().map(Vec::len).max().unwrap_or(0);
        if columns == 0 {
            return Vec::new();
        }
        let mut widths = vec![1_usize; columns];
        for row in &cells {
            for (index, cell) in row.iter().enumerate() {
                widths[index] = widths[index].max(cell.width());
            }
        }

        let border = self.theme.table.to_style();
        let header = border.add_modifier(Modifier::BOLD);

        // Row width is 1 + sum(width + 3).
        let max_width = self.available(context);
        if 1 + 4 * columns > max_width {
            // One cell per row when even single-column cells do not fit.
            return cells
                .iter()
                .enumerate()
                .flat_map(|(index, row)| {
                    let style = if has_header && index == 0 { header } else { context.text };
                    row.iter().map(move |cell| {
                        vec![Span::styled(truncate_to_width(cell, max_width), style)]
                    })
                })
                .collect();
        }
        while 1 + widths.iter().sum::<usize>() + 3 * columns > max_width {
            let Some((widest, _)) = widths.iter().enumerate().max_by_key(|(_, w)| **w) else {
                break;
            };
            if widths[widest] <= 1 {
                break;
            }
            widths[widest] -= 1;
        }

        let mut rows = vec![vec![Span::styled(table_border(&widths, '┌', '┬', '┐'), border)]];
        for (index, row) in cells.iter().enumerate() {
            let style = if has_header && index == 0 { header } else { border };
            rows.push(vec![Span::styled(
                table_row(row, &widths, alignments),
                style,
            )]);
            if has_header && index == 0 {
                rows.push(vec![Span::styled(table_border(&widths, '├', '┼', '┤'), border)]);
            }
        }
        rows.push(vec![Span::styled(table_border(&widths, '└', '┴', '┘'), border)]);
        rows
    }
}

/// `Some(checked)` when a list item is a task item.
fn task_state<'a>(item: &'a AstNode<'a>) -> Option<bool> {
    if let NodeValue::TaskItem(symbol) = &item.data.borrow().value {
        return Some(symbol.is_some());
    }
    item.children().next().and_then(|child| match &child.data.borrow().value {
        NodeValue::TaskItem(symbol) => Some(symbol.is_some()),
        _ => None,
    })
}

fn table_border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let mut out = String::new();
    out.push(left);
    for (index, width) in widths.iter().enumerate() {
        out.push_str(&"─".repeat(width + 2));
        if index + 1 < widths.len() {
            out.push(middle);
        }
    }
    out.push(right);
    out
}

fn table_row(cells: &[String], widths: &[usize], alignments: &[TableAlignment]) -> String {
    let mut out = String::from("│");
    for (index, width) in widths.iter().enumerate() {
        let content = truncate_to_width(cells.get(index).map_or("", String::as_str), *width);
        let padding = width.saturating_sub(content.width());
        let (left, right) = match alignments.get(index).copied().unwrap_or(TableAlignment::None) {
            TableAlignment::Right => (padding, 0),
            TableAlignment::Center => (padding / 2, padding - padding / 2),
            TableAlignment::Left | TableAlignment::None => (0, padding),
        };
        out.push(' ');
        out.push_str(&" ".repeat(left));
        out.push_str(&content);
        out.push_str(&" ".repeat(right));
        out.push_str(" │");
    }
    out
}

fn collect_inline<'a>(node: &'a AstNode<'a>, style: Style, theme: &ThemeStyle) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for child in node.children() {
        collect_inline_recursive(child, style, theme, &mut spans);
    }
    spans
}

fn collect_inline_recursive<'a>(
    node: &'a AstNode<'a>,
    style: Style,
    theme: &ThemeStyle,
    spans: &mut Vec<Span<'static>>,
) {
    let nested = match &node.data.borrow().value {
        NodeValue::Text(text) => {
            spans.push(Span::styled(text.to_string(), style));
            return;
        }
        NodeValue::Code(code) => {
            spans.push(Span::styled(
                code.literal.to_string(),
                style.patch(theme.inline_code.to_style()),
            ));
            return;
        }
        NodeValue::HtmlInline(html) => {
            spans.push(Span::styled(html.to_string(), style));
            return;
        }
        NodeValue::Image(image) => {
            let alt = extract_text(node);
            let label = if alt.is_empty() {
                image.url.to_string()
            } else {
                alt
            };
            spans.push(Span::styled(
                format!("[Image: {label}]"),
                style.patch(theme.link.to_style()),
            ));
            return;
        }
        // Newlines are preserved rather than reflowed.
        NodeValue::SoftBreak | NodeValue::LineBreak => {
            spans.push(Span::styled("\n", style));
            return;
        }
        NodeValue::Emph => style.patch(theme.emphasis.to_style()),
        NodeValue::Strong => style.patch(theme.strong.to_style()),
        NodeValue::Strikethrough => style.patch(theme.strikethrough.to_style()),
        NodeValue::Link(_) => style.patch(theme.link.to_style()),
        _ => style,
    };
    for child in node.children() {
        collect_inline_recursive(child, nested, theme, spans);
    }
}

fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    extract_text_recursive(node, &mut text);
    text
}

fn extract_text_recursive<'a>(node: &'a AstNode<'a>, text: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(t) => text.push_str(t),
        NodeValue::Code(code) => text.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
        _ => {
            for child in node.children() {
                extract_text_recursive(child, text);
            }
        }
    }
}

/// Greedy word wrap over styled spans.
///
/// A span consisting of `"\n"` forces a row break. Words wider than `width`
/// are split across rows so no row exceeds `width` columns.
fn wrap_spans(spans: Vec<Span<'static>>, width: usize) -> Vec<Vec<Span<'static>>> {
    let width = width.max(1);
    let mut rows: Vec<Vec<Span<'static>>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut current_width = 0_usize;

    for token in spans.iter().flat_map(split_tokens) {
        if token.content == "\n" {
            finish_row(&mut rows, &mut current, &mut current_width);
            continue;
        }
        let token_width = token.width();
        let is_space = token.content.chars().all(char::is_whitespace);

        if is_space {
            // Drop leading whitespace at row starts.
            if current_width > 0 {
                current_width += token_width;
                current.push(token);
            }
            continue;
        }

        if current_width > 0 && current_width + token_width > width {
            finish_row(&mut rows, &mut current, &mut current_width);
        }

        if token_width <= width {
            current_width += token_width;
            current.push(token);
            continue;
        }

        for piece in split_by_width(&token.content, width) {
            if current_width > 0 {
                finish_row(&mut rows, &mut current, &mut current_width);
            }
            current_width = piece.width();
            current.push(Span::styled(piece, token.style));
        }
    }

    if !current.is_empty() || rows.is_empty() {
        finish_row(&mut rows, &mut current, &mut current_width);
    }
    rows
}

/// Close the current row, dropping trailing whitespace.
fn finish_row(
    rows: &mut Vec<Vec<Span<'static>>>,
    current: &mut Vec<Span<'static>>,
    current_width: &mut usize,
) {
    while current
        .last()
        .is_some_and(|span| span.content.chars().all(char::is_whitespace))
    {
        current.pop();
    }
    rows.push(std::mem::take(current));
    *current_width = 0;
}

fn split_tokens(span: &Span<'static>) -> Vec<Span<'static>> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut buf_is_space: Option<bool> = None;

    for ch in span.content.chars() {
        if ch == '\n' {
            if !buf.is_empty() {
                out.push(Span::styled(std::mem::take(&mut buf), span.style));
            }
            out.push(Span::styled("\n", span.style));
            buf_is_space = None;
            continue;
        }
        let is_space = ch.is_whitespace();
        if buf_is_space.is_some_and(|state| state != is_space) {
            out.push(Span::styled(std::mem::take(&mut buf), span.style));
        }
        buf.push(ch);
        buf_is_space = Some(is_space);
    }
    if !buf.is_empty() {
        out.push(Span::styled(buf, span.style));
    }
    out
}

fn split_by_width(text: &str, width: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_width = 0_usize;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if piece_width + ch_width > width && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            piece_width = 0;
        }
        piece.push(ch);
        piece_width += ch_width;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut width = 0_usize;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out
}

/// Cut a row to `width` columns.
fn fit_spans(spans: Vec<Span<'static>>, width: usize) -> Vec<Span<'static>> {
    if spans_width(&spans) <= width {
        return spans;
    }
    let mut out = Vec::new();
    let mut used = 0_usize;
    for span in spans {
        let room = width.saturating_sub(used);
        let span_width = span.width();
        if span_width <= room {
            used += span_width;
            out.push(span);
            continue;
        }
        let text = truncate_to_width(&span.content, room);
        if !text.is_empty() {
            out.push(Span::styled(text, span.style));
        }
        break;
    }
    out
}

fn spans_width(spans: &[Span<'_>]) -> usize {
    spans.iter().map(Span::width).sum()
}
