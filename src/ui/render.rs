use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;

use super::compose::{View, compose};
use super::layout::{FRAME_PADDING, LayoutConfig};

/// Area left after the horizontal frame padding.
pub fn content_area(area: Rect) -> Rect {
    area.inner(Margin {
        horizontal: FRAME_PADDING / 2,
        vertical: 0,
    })
}

/// Render the complete UI.
pub fn render(model: &Model, layout: &LayoutConfig, frame: &mut Frame) {
    let area = content_area(frame.area());

    match compose(model, layout) {
        View::Goodbye(lines) => {
            frame.render_widget(Paragraph::new(lines), area);
        }
        View::Browse(view) => {
            let header_height = u16::try_from(view.header.height()).unwrap_or(u16::MAX);
            let footer_height = u16::try_from(view.footer.height()).unwrap_or(u16::MAX);
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Length(header_height),
                    Constraint::Length(model.viewport.height()),
                    Constraint::Length(footer_height),
                    Constraint::Min(0),
                ])
                .split(area);

            frame.render_widget(Paragraph::new(view.tabs), chunks[0]);
            frame.render_widget(Paragraph::new(view.header), chunks[1]);
            frame.render_widget(Paragraph::new(view.body), chunks[2]);
            frame.render_widget(Paragraph::new(view.footer), chunks[3]);
            frame.render_widget(Paragraph::new(view.help), chunks[4]);
        }
    }
}
