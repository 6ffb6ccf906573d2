//! Navigator calls and surface events.

use super::DispatchResult;
use core_model::{Direction, EditorModel};

pub(crate) fn move_cursor(model: &mut EditorModel, dir: Direction) -> DispatchResult {
    if model.move_cursor(dir) {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

pub(crate) fn click(model: &mut EditorModel, x: u32, y: u32) -> DispatchResult {
    let cell = model.on_click(x, y);
    tracing::trace!(target: "actions.dispatch", op = "click", x, y, cursor = %cell, "motion");
    DispatchResult::dirty()
}

/// One notch scrolls one line height.
pub(crate) fn scroll(model: &mut EditorModel, notches: i32) -> DispatchResult {
    let delta = i64::from(notches) * i64::from(model.layout().line_height);
    if model.on_scroll(delta) {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

pub(crate) fn resize(model: &mut EditorModel, width: u32, height: u32) -> DispatchResult {
    model.on_resize(width, height);
    DispatchResult::dirty()
}
