//! Key bindings.
//!
//! Raw terminal events are resolved to a [`Key`] once, here, so the state
//! machine never compares key strings.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};

use crate::app::Message;

/// Lines scrolled per mouse wheel notch.
pub const MOUSE_SCROLL_LINES: isize = 3;

/// A resolved key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Quit,
    Next,
    Prev,
    ToggleHelp,
    ToggleTheme,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,
    Top,
    Bottom,
    Unknown,
}

/// Key names bound to one [`Key`], plus its help entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub key: Key,
    pub keys: &'static [&'static str],
    pub help_key: &'static str,
    pub help_desc: &'static str,
}

const fn binding(
    key: Key,
    keys: &'static [&'static str],
    help_key: &'static str,
    help_desc: &'static str,
) -> Binding {
    Binding {
        key,
        keys,
        help_key,
        help_desc,
    }
}

pub const BINDINGS: &[Binding] = &[
    binding(Key::Prev, &["left", "h"], "←/h", "Previous page"),
    binding(Key::Next, &["right", "l", "tab"], "→/l", "Next page"),
    binding(Key::ToggleHelp, &["?"], "?", "Toggle help"),
    binding(Key::Quit, &["q", "esc", "ctrl+c"], "q", "Quit"),
    binding(Key::ToggleTheme, &["t"], "t", "Toggle theme"),
    binding(Key::ScrollUp, &["up", "k"], "↑/k", "Up"),
    binding(Key::ScrollDown, &["down", "j"], "↓/j", "Down"),
    binding(Key::PageUp, &["pgup", "b"], "b/pgup", "Page up"),
    binding(Key::PageDown, &["pgdown", "space", "f"], "f/pgdn", "Page down"),
    binding(Key::HalfPageUp, &["u", "ctrl+u"], "u", "½ page up"),
    binding(Key::HalfPageDown, &["d", "ctrl+d"], "d", "½ page down"),
    binding(Key::Top, &["home", "g"], "g/home", "Go to top"),
    binding(Key::Bottom, &["end", "G"], "G/end", "Go to bottom"),
];

/// Columns of the expanded help panel.
const FULL_HELP: &[&[Key]] = &[
    &[Key::Prev, Key::Next],
    &[Key::ScrollUp, Key::ScrollDown],
    &[Key::PageUp, Key::PageDown],
    &[Key::HalfPageUp, Key::HalfPageDown],
    &[Key::Top, Key::Bottom],
    &[Key::ToggleTheme],
    &[Key::Quit, Key::ToggleHelp],
];

impl Key {
    /// Resolve a textual key name (`"left"`, `"ctrl+c"`, `"?"`).
    pub fn from_name(name: &str) -> Self {
        BINDINGS
            .iter()
            .find(|binding| binding.keys.contains(&name))
            .map_or(Self::Unknown, |binding| binding.key)
    }

    /// Resolve a terminal key event.
    pub fn from_event(event: &KeyEvent) -> Self {
        key_name(event).map_or(Self::Unknown, |name| Self::from_name(&name))
    }

    /// Keys handled by the viewport rather than the navigation logic.
    pub const fn is_scroll(self) -> bool {
        matches!(
            self,
            Self::ScrollUp
                | Self::ScrollDown
                | Self::PageUp
                | Self::PageDown
                | Self::HalfPageUp
                | Self::HalfPageDown
                | Self::Top
                | Self::Bottom
        )
    }

    pub fn binding(self) -> Option<&'static Binding> {
        BINDINGS.iter().find(|binding| binding.key == self)
    }
}

/// Textual name of a key event, e.g. `"ctrl+c"`, `"pgdown"`, `"G"`.
///
/// Alt chords have no name and never match a binding.
pub fn key_name(event: &KeyEvent) -> Option<String> {
    if event.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }
    let name = match event.code {
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) if event.modifiers.contains(KeyModifiers::CONTROL) => {
            format!("ctrl+{}", c.to_ascii_lowercase())
        }
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::BackTab => "shift+tab".to_string(),
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::PageUp => "pgup".to_string(),
        KeyCode::PageDown => "pgdown".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::F(n) => format!("f{n}"),
        _ => return None,
    };
    Some(name)
}

/// Translate a terminal event into a state machine message.
///
/// Key releases and repeats are dropped; only presses count.
pub fn message_for_event(event: &Event) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            Some(Message::KeyPress(Key::from_event(key)))
        }
        Event::Resize(width, height) => Some(Message::Resize(*width, *height)),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => Some(Message::MouseWheel(-MOUSE_SCROLL_LINES)),
            MouseEventKind::ScrollDown => Some(Message::MouseWheel(MOUSE_SCROLL_LINES)),
            _ => None,
        },
        _ => None,
    }
}

/// Bindings shown in the collapsed help line.
pub fn short_help(theming: bool) -> Vec<&'static Binding> {
    let keys: &[Key] = if theming {
        &[Key::Quit, Key::ToggleHelp, Key::ToggleTheme]
    } else {
        &[Key::Quit, Key::ToggleHelp]
    };
    keys.iter().filter_map(|key| key.binding()).collect()
}

/// Columns of bindings shown when help is expanded.
pub fn full_help(theming: bool) -> Vec<Vec<&'static Binding>> {
    FULL_HELP
        .iter()
        .map(|column| {
            column
                .iter()
                .filter(|key| theming || **key != Key::ToggleTheme)
                .filter_map(|key| key.binding())
                .collect::<Vec<_>>()
        })
        .filter(|column| !column.is_empty())
        .collect()
}
