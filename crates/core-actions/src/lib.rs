//! Input translation and action dispatch.
//!
//! `key_translator::translate` turns one [`core_events::InputEvent`] into at
//! most one [`Action`]; `dispatcher::dispatch` applies it to an
//! [`core_model::EditorModel`]. `io_ops` holds the file load/save helpers the
//! dispatcher and the binary share.

pub mod dispatcher;
pub mod io_ops;
pub mod key_translator;

pub use core_model::Direction;
pub use dispatcher::{DispatchResult, EditorSettings, dispatch};
pub use key_translator::translate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Insert a printable character (or tab) at the cursor.
    Insert(char),
    /// Insert the configured line terminator.
    InsertLineBreak,
    /// Backspace.
    Delete,
    Move(Direction),
    FontIncrease,
    FontDecrease,
    Undo,
    Redo,
    Save,
    /// Log the caret's visual position.
    ReportCursor,
    Quit,
    /// Mouse press at text-area coordinates.
    Click { x: u32, y: u32 },
    /// Wheel notches; each notch is one line height.
    Scroll(i32),
    /// New text-area size.
    Resize { width: u32, height: u32 },
}

impl Action {
    /// Short stable name for structured logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Insert(_) => "insert",
            Action::InsertLineBreak => "insert_line_break",
            Action::Delete => "delete",
            Action::Move(_) => "move",
            Action::FontIncrease => "font_increase",
            Action::FontDecrease => "font_decrease",
            Action::Undo => "undo",
            Action::Redo => "redo",
            Action::Save => "save",
            Action::ReportCursor => "report_cursor",
            Action::Quit => "quit",
            Action::Click { .. } => "click",
            Action::Scroll(_) => "scroll",
            Action::Resize { .. } => "resize",
        }
    }
}
