//! Dispatcher applying `Action` to the editing session.
//!
//! Sub-modules:
//! * `edit`    - inserts, backspace and font resizes (recorded commands)
//! * `motion`  - arrow keys, clicks, wheel and resize
//! * `undo`    - undo / redo
//! * `command` - save, cursor report and quit
//!
//! Every action is one command execution or one navigator call; the model
//! relayouts and snaps before the handler returns.

use crate::Action;
use core_model::EditorModel;

mod command;
mod edit;
mod motion;
mod undo;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// A repaint is needed.
    pub dirty: bool,
    pub quit: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
        }
    }
}

/// Configuration the dispatcher needs at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorSettings {
    /// Font size delta for `FontIncrease` / `FontDecrease`.
    pub font_step: u16,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self { font_step: 4 }
    }
}

/// Apply an action to the session. Returns `DispatchResult` describing whether
/// a render is needed (`dirty`) or the editor should exit (`quit`).
pub fn dispatch(action: Action, model: &mut EditorModel, settings: &EditorSettings) -> DispatchResult {
    tracing::trace!(target: "actions.dispatch", action = action.as_str(), "dispatch");
    let before = ScreenStamp::capture(model);
    // Status messages last until the next user command.
    if !matches!(action, Action::Resize { .. } | Action::Scroll(_)) {
        model.state_mut().message = None;
    }
    let mut result = match action {
        Action::Insert(c) => edit::insert_char(model, c),
        Action::InsertLineBreak => edit::insert_line_break(model),
        Action::Delete => edit::delete(model),
        Action::FontIncrease => edit::font_increase(model, settings.font_step),
        Action::FontDecrease => edit::font_decrease(model, settings.font_step),
        Action::Move(dir) => motion::move_cursor(model, dir),
        Action::Click { x, y } => motion::click(model, x, y),
        Action::Scroll(notches) => motion::scroll(model, notches),
        Action::Resize { width, height } => motion::resize(model, width, height),
        Action::Undo => undo::handle_undo(model),
        Action::Redo => undo::handle_redo(model),
        Action::Save => command::save(model),
        Action::ReportCursor => command::report_cursor(model),
        Action::Quit => DispatchResult::quit(),
    };
    // A blocked move or delete still snaps the window and clears the message.
    if !result.dirty && ScreenStamp::capture(model) != before {
        result.dirty = true;
    }
    result
}

/// Session state visible on screen besides the document itself.
#[derive(Debug, PartialEq, Eq)]
struct ScreenStamp {
    offset: u32,
    message: Option<String>,
    undo_depth: usize,
    redo_depth: usize,
}

impl ScreenStamp {
    fn capture(model: &EditorModel) -> Self {
        let state = model.state();
        Self {
            offset: model.viewport().offset(),
            message: state.message.clone(),
            undo_depth: state.history().undo_depth(),
            redo_depth: state.history().redo_depth(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Direction;
    use core_model::Viewport;
    use core_state::EditorState;
    use core_text::{FontDescriptor, MonospaceMetrics};

    fn model(text: &str) -> EditorModel {
        let mut state = EditorState::new(FontDescriptor::new("Mono", 10));
        state.load_text(text);
        EditorModel::new(
            state,
            Viewport::new(20, 5, 1),
            Box::new(MonospaceMetrics::new(0.1, 0.1)),
        )
    }

    fn run(model: &mut EditorModel, action: Action) -> DispatchResult {
        dispatch(action, model, &EditorSettings::default())
    }

    #[test]
    fn insert_and_delete_round_trip() {
        let mut m = model("");
        assert!(run(&mut m, Action::Insert('a')).dirty);
        run(&mut m, Action::InsertLineBreak);
        run(&mut m, Action::Insert('b'));
        assert_eq!(m.state().document.text(), "a\nb");
        run(&mut m, Action::Delete);
        run(&mut m, Action::Delete);
        assert_eq!(m.state().document.text(), "a");
    }

    #[test]
    fn delete_at_start_is_recorded_but_changes_nothing() {
        let mut m = model("ab");
        let r = run(&mut m, Action::Delete);
        // The undo depth on the status line moved.
        assert!(r.dirty);
        assert!(!m.state().dirty);
        assert_eq!(m.state().document.text(), "ab");
        assert_eq!(m.state().history().undo_depth(), 1);
    }

    #[test]
    fn blocked_move_after_wheel_repaints_snapped_window() {
        let mut m = model("a\nb\nc\nd\ne\nf\ng\nh");
        run(&mut m, Action::Scroll(3));
        assert_eq!(m.viewport().offset(), 3);
        let r = run(&mut m, Action::Move(Direction::Left));
        assert!(m.state().cursor.is_sentinel());
        assert_eq!(m.viewport().offset(), 0);
        assert!(r.dirty);
    }

    #[test]
    fn blocked_move_repaints_when_it_clears_a_message() {
        let mut m = model("ab");
        m.state_mut().set_message("Saved ab");
        let r = run(&mut m, Action::Move(Direction::Left));
        assert!(m.state().message.is_none());
        assert!(r.dirty);
    }

    #[test]
    fn moves_report_clean_when_blocked() {
        let mut m = model("ab");
        assert!(!run(&mut m, Action::Move(Direction::Left)).dirty);
        assert!(run(&mut m, Action::Move(Direction::Right)).dirty);
        assert!(!run(&mut m, Action::Move(Direction::Down)).dirty);
    }

    #[test]
    fn font_actions_use_configured_step() {
        let mut m = model("x");
        let settings = EditorSettings { font_step: 3 };
        dispatch(Action::FontIncrease, &mut m, &settings);
        assert_eq!(m.state().font.size, 13);
        dispatch(Action::FontDecrease, &mut m, &settings);
        dispatch(Action::FontDecrease, &mut m, &settings);
        dispatch(Action::FontDecrease, &mut m, &settings);
        assert_eq!(m.state().font.size, 4);
        let r = dispatch(Action::FontDecrease, &mut m, &settings);
        assert_eq!(m.state().font.size, 1);
        assert!(r.dirty);
        let r = dispatch(Action::FontDecrease, &mut m, &settings);
        assert_eq!(m.state().font.size, 1);
        assert!(!r.dirty);
    }

    #[test]
    fn undo_redo_through_dispatch() {
        let mut m = model("");
        run(&mut m, Action::Insert('q'));
        assert!(run(&mut m, Action::Undo).dirty);
        assert_eq!(m.state().document.text(), "");
        assert!(!run(&mut m, Action::Undo).dirty);
        assert!(run(&mut m, Action::Redo).dirty);
        assert_eq!(m.state().document.text(), "q");
    }

    #[test]
    fn quit_sets_flag() {
        let mut m = model("");
        assert!(run(&mut m, Action::Quit).quit);
    }

    #[test]
    fn message_cleared_by_next_command_but_not_by_scroll() {
        let mut m = model("abc");
        m.state_mut().set_message("hello");
        run(&mut m, Action::Scroll(1));
        assert_eq!(m.state().message.as_deref(), Some("hello"));
        run(&mut m, Action::Move(Direction::Right));
        assert!(m.state().message.is_none());
    }
}
