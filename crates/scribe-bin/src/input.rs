//! crossterm event conversion.
//!
//! Only key presses (and repeats), left/middle/right mouse buttons, wheel
//! motion and resizes are carried over. Mouse events on the status row are
//! dropped so a click there never lands in the document.

use core_events::{InputEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use crossterm::event::{
    Event as CEvent, KeyCode as CKeyCode, KeyEventKind, KeyModifiers as CMods,
    MouseButton as CButton, MouseEventKind as CMouseKind,
};

pub(crate) fn map_mods(m: CMods) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if m.contains(CMods::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if m.contains(CMods::ALT) {
        out |= KeyModifiers::ALT;
    }
    if m.contains(CMods::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}

fn map_code(code: CKeyCode) -> Option<KeyCode> {
    Some(match code {
        CKeyCode::Char(c) => KeyCode::Char(c),
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Tab => KeyCode::Tab,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        _ => return None,
    })
}

fn map_button(b: CButton) -> MouseButton {
    match b {
        CButton::Left => MouseButton::Left,
        CButton::Middle => MouseButton::Middle,
        CButton::Right => MouseButton::Right,
    }
}

/// Convert one terminal event. `text_rows` is the height of the text area.
pub fn convert(event: CEvent, text_rows: u16) -> Option<InputEvent> {
    match event {
        CEvent::Key(key) => {
            if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                return None;
            }
            let code = map_code(key.code)?;
            Some(InputEvent::Key(KeyEvent::new(code, map_mods(key.modifiers))))
        }
        CEvent::Mouse(m) => {
            let kind = match m.kind {
                CMouseKind::ScrollDown => return Some(InputEvent::Scroll(1)),
                CMouseKind::ScrollUp => return Some(InputEvent::Scroll(-1)),
                CMouseKind::ScrollLeft | CMouseKind::ScrollRight => return None,
                CMouseKind::Down(b) => MouseEventKind::Down(map_button(b)),
                CMouseKind::Up(b) => MouseEventKind::Up(map_button(b)),
                CMouseKind::Drag(b) => MouseEventKind::Drag(map_button(b)),
                CMouseKind::Moved => MouseEventKind::Moved,
            };
            if m.row >= text_rows {
                return None;
            }
            Some(InputEvent::Mouse(MouseEvent {
                kind,
                column: m.column,
                row: m.row,
                mods: map_mods(m.modifiers),
            }))
        }
        CEvent::Resize(w, h) => Some(InputEvent::Resize(w, h)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent as CKeyEvent, KeyEventState, MouseEvent as CMouseEvent};

    fn mouse(kind: CMouseKind, column: u16, row: u16) -> CEvent {
        CEvent::Mouse(CMouseEvent {
            kind,
            column,
            row,
            modifiers: CMods::NONE,
        })
    }

    #[test]
    fn ctrl_char_keeps_modifier() {
        let ev = CEvent::Key(CKeyEvent::new(CKeyCode::Char('s'), CMods::CONTROL));
        assert_eq!(convert(ev, 10), Some(InputEvent::Key(KeyEvent::ctrl('s'))));
    }

    #[test]
    fn key_release_is_ignored() {
        let ev = CEvent::Key(CKeyEvent {
            code: CKeyCode::Char('a'),
            modifiers: CMods::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(convert(ev, 10), None);
    }

    #[test]
    fn unbound_keys_are_dropped() {
        let ev = CEvent::Key(CKeyEvent::new(CKeyCode::F(5), CMods::NONE));
        assert_eq!(convert(ev, 10), None);
    }

    #[test]
    fn wheel_maps_to_single_notches() {
        assert_eq!(convert(mouse(CMouseKind::ScrollDown, 0, 0), 10), Some(InputEvent::Scroll(1)));
        assert_eq!(convert(mouse(CMouseKind::ScrollUp, 0, 0), 10), Some(InputEvent::Scroll(-1)));
    }

    #[test]
    fn clicks_on_status_row_are_dropped() {
        let press = CMouseKind::Down(CButton::Left);
        assert_eq!(convert(mouse(press, 3, 10), 10), None);
        assert_eq!(
            convert(mouse(press, 3, 9), 10),
            Some(InputEvent::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 3,
                row: 9,
                mods: KeyModifiers::empty(),
            }))
        );
    }

    #[test]
    fn resize_passes_full_surface() {
        assert_eq!(convert(CEvent::Resize(120, 40), 10), Some(InputEvent::Resize(120, 40)));
    }
}
