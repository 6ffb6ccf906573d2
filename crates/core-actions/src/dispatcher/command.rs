//! Save and cursor report.

use super::DispatchResult;
use crate::io_ops::save_document;
use core_model::EditorModel;

pub(crate) fn save(model: &mut EditorModel) -> DispatchResult {
    let state = model.state_mut();
    match save_document(state) {
        Ok(path) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            state.set_message(format!("Saved {name}"));
        }
        Err(e) => state.set_message(format!("Save failed: {e}")),
    }
    DispatchResult::dirty()
}

pub(crate) fn report_cursor(model: &mut EditorModel) -> DispatchResult {
    let caret = model.cursor_box();
    let cell = model.state().cursor;
    tracing::info!(target: "actions.report", x = caret.x, y = caret.y, %cell, "cursor_position");
    model
        .state_mut()
        .set_message(format!("{}, {}", caret.x, caret.y));
    DispatchResult::dirty()
}
