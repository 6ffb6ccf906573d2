#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{DispatchResult, EditorSettings, dispatch, translate};
use core_events::{InputEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use core_model::{EditorModel, Viewport};
use core_state::EditorState;
use core_text::{FontDescriptor, MonospaceMetrics};

/// Session with unit glyphs (1x1) in a `width` x `height` text area that
/// reserves one column for the scrollbar.
pub fn session(text: &str, width: u32, height: u32) -> EditorModel {
    let mut state = EditorState::new(FontDescriptor::new("Mono", 10));
    state.load_text(text);
    EditorModel::new(
        state,
        Viewport::new(width, height, 1),
        Box::new(MonospaceMetrics::new(0.1, 0.1)),
    )
}

/// Translate and dispatch one event; untranslatable events are clean no-ops.
pub fn feed(model: &mut EditorModel, event: InputEvent) -> DispatchResult {
    match translate(&event) {
        Some(action) => dispatch(action, model, &EditorSettings::default()),
        None => DispatchResult::clean(),
    }
}

pub fn type_text(model: &mut EditorModel, text: &str) {
    for c in text.chars() {
        let code = if c == '\n' { KeyCode::Enter } else { KeyCode::Char(c) };
        feed(model, key(code));
    }
}

pub fn key(code: KeyCode) -> InputEvent {
    InputEvent::Key(KeyEvent::plain(code))
}

pub fn ctrl(c: char) -> InputEvent {
    InputEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CTRL))
}

pub fn click(column: u16, row: u16) -> InputEvent {
    InputEvent::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        mods: KeyModifiers::empty(),
    })
}

/// Visible text rows of the current frame (line-break markers omitted).
pub fn rows(model: &EditorModel) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for g in model.frame().glyphs {
        let row = g.y as usize;
        while out.len() <= row {
            out.push(String::new());
        }
        if let Some(c) = g.content.glyph() {
            out[row].push(c);
        }
    }
    out
}
