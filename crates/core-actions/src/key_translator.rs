//! Stateless input -> `Action` mapping.
//!
//! | Input                     | Action                   |
//! |---------------------------|--------------------------|
//! | printable char, no Ctrl/Alt | `Insert(c)`            |
//! | Enter / Tab / Backspace   | line break / `'\t'` / `Delete` |
//! | arrows                    | `Move(dir)`              |
//! | Ctrl `+` or `=` / Ctrl `-`| font increase / decrease |
//! | Ctrl Z / Y                | undo / redo              |
//! | Ctrl S / P                | save / report cursor     |
//! | Ctrl Q / C                | quit                     |
//! | left button press         | `Click`                  |
//! | wheel                     | `Scroll`                 |
//! | resize                    | `Resize`                 |
//!
//! Everything else maps to `None`.

use crate::{Action, Direction};
use core_events::{InputEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind};

pub fn translate(event: &InputEvent) -> Option<Action> {
    match event {
        InputEvent::Key(key) => translate_key(key),
        InputEvent::Mouse(m) => match m.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Action::Click {
                x: u32::from(m.column),
                y: u32::from(m.row),
            }),
            _ => None,
        },
        InputEvent::Resize(w, h) => Some(Action::Resize {
            width: u32::from(*w),
            height: u32::from(*h),
        }),
        InputEvent::Scroll(0) => None,
        InputEvent::Scroll(notches) => Some(Action::Scroll(*notches)),
    }
}

fn translate_key(key: &KeyEvent) -> Option<Action> {
    if key.mods.contains(KeyModifiers::CTRL) {
        return match key.code {
            KeyCode::Char(c) => ctrl_shortcut(c.to_ascii_lowercase()),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char(_) if key.mods.contains(KeyModifiers::ALT) => None,
        KeyCode::Char(c) if c.is_control() => None,
        KeyCode::Char(c) => Some(Action::Insert(c)),
        KeyCode::Enter => Some(Action::InsertLineBreak),
        KeyCode::Tab => Some(Action::Insert('\t')),
        KeyCode::Backspace => Some(Action::Delete),
        KeyCode::Left => Some(Action::Move(Direction::Left)),
        KeyCode::Right => Some(Action::Move(Direction::Right)),
        KeyCode::Up => Some(Action::Move(Direction::Up)),
        KeyCode::Down => Some(Action::Move(Direction::Down)),
        KeyCode::Esc => None,
    }
}

fn ctrl_shortcut(c: char) -> Option<Action> {
    match c {
        '+' | '=' => Some(Action::FontIncrease),
        '-' => Some(Action::FontDecrease),
        'z' => Some(Action::Undo),
        'y' => Some(Action::Redo),
        's' => Some(Action::Save),
        'p' => Some(Action::ReportCursor),
        'q' | 'c' => Some(Action::Quit),
        _ => None,
    }
}
