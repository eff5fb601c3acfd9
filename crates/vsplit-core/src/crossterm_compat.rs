#![forbid(unsafe_code)]

//! Conversion from crossterm input events.

use crossterm::event as ct;

use crate::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};

impl Event {
    /// Convert a crossterm event. Events the split component has no use for
    /// (paste, horizontal scroll) map to `None`.
    #[must_use]
    pub fn from_crossterm(event: ct::Event) -> Option<Self> {
        match event {
            ct::Event::Key(key) => Some(Self::Key(KeyEvent {
                code: key_code(key.code),
                modifiers: modifiers(key.modifiers),
                kind: match key.kind {
                    ct::KeyEventKind::Press => KeyEventKind::Press,
                    ct::KeyEventKind::Repeat => KeyEventKind::Repeat,
                    ct::KeyEventKind::Release => KeyEventKind::Release,
                },
            })),
            ct::Event::Mouse(mouse) => {
                let kind = match mouse.kind {
                    ct::MouseEventKind::Down(b) => MouseEventKind::Down(button(b)),
                    ct::MouseEventKind::Up(b) => MouseEventKind::Up(button(b)),
                    ct::MouseEventKind::Drag(b) => MouseEventKind::Drag(button(b)),
                    ct::MouseEventKind::Moved => MouseEventKind::Moved,
                    ct::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
                    ct::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
                    ct::MouseEventKind::ScrollLeft | ct::MouseEventKind::ScrollRight => {
                        return None;
                    }
                };
                Some(Self::Mouse(
                    MouseEvent::new(kind, mouse.column, mouse.row)
                        .with_modifiers(modifiers(mouse.modifiers)),
                ))
            }
            ct::Event::Resize(width, height) => Some(Self::Resize { width, height }),
            ct::Event::FocusGained => Some(Self::Focus(true)),
            ct::Event::FocusLost => Some(Self::Focus(false)),
            ct::Event::Paste(_) => None,
        }
    }
}

fn key_code(code: ct::KeyCode) -> KeyCode {
    match code {
        ct::KeyCode::Char(c) => KeyCode::Char(c),
        ct::KeyCode::Enter => KeyCode::Enter,
        ct::KeyCode::Esc => KeyCode::Escape,
        ct::KeyCode::Tab => KeyCode::Tab,
        ct::KeyCode::Up => KeyCode::Up,
        ct::KeyCode::Down => KeyCode::Down,
        ct::KeyCode::Left => KeyCode::Left,
        ct::KeyCode::Right => KeyCode::Right,
        ct::KeyCode::Home => KeyCode::Home,
        ct::KeyCode::End => KeyCode::End,
        _ => KeyCode::Other,
    }
}

fn button(b: ct::MouseButton) -> MouseButton {
    match b {
        ct::MouseButton::Left => MouseButton::Left,
        ct::MouseButton::Right => MouseButton::Right,
        ct::MouseButton::Middle => MouseButton::Middle,
    }
}

fn modifiers(m: ct::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if m.contains(ct::KeyModifiers::SHIFT) {
        out |= Modifiers::SHIFT;
    }
    if m.contains(ct::KeyModifiers::ALT) {
        out |= Modifiers::ALT;
    }
    if m.contains(ct::KeyModifiers::CONTROL) {
        out |= Modifiers::CTRL;
    }
    if m.contains(ct::KeyModifiers::SUPER) {
        out |= Modifiers::SUPER;
    }
    out
}
