//! Undo / Redo handling.

use super::DispatchResult;
use core_model::EditorModel;

pub(crate) fn handle_undo(model: &mut EditorModel) -> DispatchResult {
    if model.undo() {
        tracing::trace!(target: "actions.dispatch", op = "undo", undo_depth = model.state().history().undo_depth(), "undo");
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

pub(crate) fn handle_redo(model: &mut EditorModel) -> DispatchResult {
    if model.redo() {
        tracing::trace!(target: "actions.dispatch", op = "redo", redo_depth = model.state().history().redo_depth(), "redo");
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}
