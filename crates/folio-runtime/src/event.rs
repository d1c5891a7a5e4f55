#![forbid(unsafe_code)]

//! Input events delivered to the model.
//!
//! A thin mapping over the backend's event stream: key presses, mouse
//! activity, resizes, and bracketed paste. Backend events with no UI meaning
//! (focus changes, key releases) are dropped at the boundary.

pub use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// An input event as seen by [`Model::update`](crate::program::Model).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Paste(String),
}

impl Event {
    /// Map a backend event, dropping those the UI ignores.
    #[must_use]
    pub fn from_backend(ev: crossterm::event::Event) -> Option<Self> {
        use crossterm::event::Event as Be;
        match ev {
            Be::Key(k) if matches!(k.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                Some(Event::Key(k))
            }
            Be::Key(_) => None,
            Be::Mouse(m) => Some(Event::Mouse(m)),
            Be::Resize(w, h) => Some(Event::Resize(w, h)),
            Be::Paste(s) => Some(Event::Paste(s)),
            Be::FocusGained | Be::FocusLost => None,
        }
    }

    /// Whether this is a press of the given character (no modifiers beyond shift).
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self, Event::Key(k)
            if k.code == KeyCode::Char(c)
                && !k.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT))
    }

    /// Whether this is a press of the given key code.
    #[must_use]
    pub fn is_key(&self, code: KeyCode) -> bool {
        matches!(self, Event::Key(k) if k.code == code)
    }

    /// Whether this is Ctrl+C.
    #[must_use]
    pub fn is_ctrl_c(&self) -> bool {
        matches!(self, Event::Key(k)
            if k.code == KeyCode::Char('c') && k.modifiers.contains(KeyModifiers::CONTROL))
    }
}
