//! Recorded edits: insert, backspace and font resize.

use super::DispatchResult;
use core_model::EditorModel;
use core_text::CellContent;

pub(crate) fn insert_char(model: &mut EditorModel, c: char) -> DispatchResult {
    model.insert(CellContent::Glyph(c));
    tracing::trace!(target: "actions.dispatch", op = "insert", ch = %c.escape_debug(), cursor = %model.state().cursor, "edit");
    DispatchResult::dirty()
}

pub(crate) fn insert_line_break(model: &mut EditorModel) -> DispatchResult {
    model.insert_line_break();
    tracing::trace!(target: "actions.dispatch", op = "insert_line_break", cursor = %model.state().cursor, "edit");
    DispatchResult::dirty()
}

pub(crate) fn delete(model: &mut EditorModel) -> DispatchResult {
    let before = model.state().document.len();
    model.delete();
    let removed = model.state().document.len() != before;
    tracing::trace!(target: "actions.dispatch", op = "delete", removed, cursor = %model.state().cursor, "edit");
    if removed {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

pub(crate) fn font_increase(model: &mut EditorModel, step: u16) -> DispatchResult {
    if model.increase_font(step) {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

pub(crate) fn font_decrease(model: &mut EditorModel, step: u16) -> DispatchResult {
    if model.decrease_font(step) {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}
