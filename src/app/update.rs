use crate::app::Model;
use crate::input::Key;
use crate::perf;
use crate::ui::layout::{FRAME_PADDING, VERTICAL_MARGIN, WRAP_PADDING, decoration_heights};

/// All events the state machine consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Terminal resized to width × height
    Resize(u16, u16),
    /// A resolved key press
    KeyPress(Key),
    /// Mouse wheel, in lines (negative scrolls up)
    MouseWheel(isize),
}

/// Side effects requested by a transition, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Viewport content was re-rendered
    RerenderViewport,
    /// The terminal should be cleared before the next frame
    ClearScreen,
    /// Stop the event loop
    Quit,
}

/// Apply one event to the state.
///
/// Once the model is quitting every event is ignored.
pub fn update(mut model: Model, msg: Message) -> (Model, Vec<Effect>) {
    if model.quitting {
        return (model, Vec::new());
    }

    match msg {
        Message::Resize(width, height) => {
            resize(&mut model, width, height);
            (model, vec![Effect::RerenderViewport, Effect::ClearScreen])
        }
        Message::MouseWheel(delta) => {
            model.viewport.scroll(delta);
            (model, Vec::new())
        }
        Message::KeyPress(key) => key_press(model, key),
    }
}

fn resize(model: &mut Model, width: u16, height: u16) {
    model.terminal_width = width;
    model.terminal_height = height;

    let (header, footer) = decoration_heights(model);
    let viewport_width = width.saturating_sub(FRAME_PADDING);
    let viewport_height = height
        .saturating_sub(header)
        .saturating_sub(footer)
        .saturating_sub(VERTICAL_MARGIN);

    if model.viewport.is_ready() {
        model.viewport.resize(viewport_width, viewport_height);
    } else {
        model.viewport.initialize(viewport_width, viewport_height);
    }
    tracing::debug!(width, height, viewport_width, viewport_height, "resize");
    perf::log_event(
        "state.resize",
        format!("terminal={width}x{height} viewport={viewport_width}x{viewport_height}"),
    );

    // Resize always redraws; a failed render keeps the old content.
    rerender(model);
}

fn key_press(mut model: Model, key: Key) -> (Model, Vec<Effect>) {
    let mut content_changed = false;
    match key {
        Key::Quit => {
            model.quitting = true;
            return (model, vec![Effect::Quit]);
        }
        Key::Next => {
            model.active_page = (model.active_page + 1) % model.pages.len();
            model.last_key = "→";
            content_changed = true;
        }
        Key::Prev => {
            let count = model.pages.len();
            model.active_page = (model.active_page + count - 1) % count;
            model.last_key = "←";
            content_changed = true;
        }
        Key::ToggleHelp => model.help_expanded = !model.help_expanded,
        Key::ToggleTheme if model.theming => {
            model.active_theme = (model.active_theme + 1) % model.themes.len();
            content_changed = true;
        }
        _ => {}
    }

    let mut effects = Vec::new();
    if content_changed {
        tracing::debug!(
            page = model.active_page,
            theme = model.active_theme,
            "navigation changed"
        );
        if rerender(&mut model) {
            effects.push(Effect::RerenderViewport);
        }
    }

    if key.is_scroll() {
        model.viewport.handle_key(key);
    }
    (model, effects)
}

/// Re-render the active page into the viewport.
///
/// Deferred until the viewport is ready. Returns `false` when rendering
/// failed and the previous content stayed in place.
fn rerender(model: &mut Model) -> bool {
    if !model.viewport.is_ready() {
        return true;
    }
    let _scope = perf::scope("state.rerender");
    let wrap_width = model.viewport.width().saturating_sub(WRAP_PADDING);
    let page = &model.pages[model.active_page];
    let theme = &model.themes[model.active_theme];

    match model.renderer.render(&page.content, wrap_width, theme) {
        Ok(lines) => {
            model.viewport.set_content(lines);
            true
        }
        Err(err) => {
            tracing::warn!(page = %page.name, theme = %theme, "render failed: {err}");
            perf::log_event(
                "state.render.error",
                format!("page={} theme={theme} err={err}", page.name),
            );
            false
        }
    }
}
