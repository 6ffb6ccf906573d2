//! Editor state: document, cursor, font, file metadata and the command history.
//!
//! Every document mutation goes through an [`Operation`] run by the
//! [`History`] so that it can be undone. The only exception is loading, which
//! replays the file as unrecorded inserts and then clears the history.
//!
//! Invariants (hold after every public call):
//! * `cursor` references a cell currently linked into `document`.
//! * `font.size > 0`.
//! * `dirty` is true iff the document changed since the last load/save (font
//!   changes do not count).
//!
//! Layout positions are not stored here; `core-model` recomputes them after
//! every call that returns.

use core_text::{CellContent, CellId, Document, FontDescriptor, LineEnding, contents_from_str};
use std::path::PathBuf;
use tracing::debug;

pub mod undo;
pub use undo::{EditTarget, History, Operation, OperationKind};

pub struct EditorState {
    pub document: Document,
    pub cursor: CellId,
    pub font: FontDescriptor,
    /// Terminator inserted when the user types Enter.
    pub line_ending: LineEnding,
    pub file_name: Option<PathBuf>,
    pub dirty: bool,
    /// One-line status message, shown until the next command replaces or
    /// clears it.
    pub message: Option<String>,
    history: History,
}

impl EditorState {
    pub fn new(font: FontDescriptor) -> Self {
        Self {
            document: Document::new(),
            cursor: CellId::SENTINEL,
            font,
            line_ending: LineEnding::Lf,
            file_name: None,
            dirty: false,
            message: None,
            history: History::new(),
        }
    }

    /// Test helper: state holding `text` with the cursor at the end.
    pub fn with_text(font: FontDescriptor, text: &str) -> Self {
        let mut state = Self::new(font);
        state.load_text(text);
        state.cursor = state.document.last();
        state
    }

    pub fn set_message<S: Into<String>>(&mut self, msg: S) {
        self.message = Some(msg.into());
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    fn split(&mut self) -> (&mut History, EditTarget<'_>) {
        (
            &mut self.history,
            EditTarget {
                document: &mut self.document,
                cursor: &mut self.cursor,
                font_size: &mut self.font.size,
            },
        )
    }

    /// Execute and record an operation.
    pub fn execute(&mut self, op: Operation) -> OperationKind {
        let before = self.document.len();
        let (history, mut target) = self.split();
        let kind = history.execute(op, &mut target);
        self.mark_if_changed(kind, before);
        kind
    }

    /// Every effective insert or delete changes the cell count by one; an
    /// inert delete at the start leaves it alone and keeps the state clean.
    fn mark_if_changed(&mut self, kind: OperationKind, before: usize) {
        if kind.edits_document() && self.document.len() != before {
            self.dirty = true;
        }
    }

    pub fn undo(&mut self) -> Option<OperationKind> {
        let before = self.document.len();
        let (history, mut target) = self.split();
        let kind = history.undo(&mut target)?;
        self.mark_if_changed(kind, before);
        Some(kind)
    }

    pub fn redo(&mut self) -> Option<OperationKind> {
        let before = self.document.len();
        let (history, mut target) = self.split();
        let kind = history.redo(&mut target)?;
        self.mark_if_changed(kind, before);
        Some(kind)
    }

    /// Record an insertion of `content` at the cursor.
    pub fn insert(&mut self, content: CellContent) -> OperationKind {
        self.execute(Operation::insert(self.cursor, content))
    }

    /// Record a deletion of the cell under the cursor (backspace).
    pub fn delete(&mut self) -> OperationKind {
        self.execute(Operation::delete(self.cursor))
    }

    /// Record a font size change.
    pub fn resize_font(&mut self, size: u16) -> OperationKind {
        self.execute(Operation::font_resize(size))
    }

    /// Replace the document with `text` fed through unrecorded inserts. The
    /// cursor ends at the start of the document and the state is clean.
    pub fn load_text(&mut self, text: &str) {
        self.document = Document::new();
        self.cursor = CellId::SENTINEL;
        self.history.clear();
        {
            let (_, mut target) = self.split();
            for content in contents_from_str(text) {
                Operation::insert(*target.cursor, content).apply(&mut target);
            }
        }
        self.cursor = CellId::SENTINEL;
        self.dirty = false;
        debug!(target: "state", cells = self.document.len(), "document_loaded");
    }
}
