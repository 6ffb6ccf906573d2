use core_text::{CellContent, CellId, Document};
use tracing::trace;

/// Mutable slice of editor state an [`Operation`] acts on.
///
/// Borrowed field-by-field out of `EditorState` so the history (which lives in
/// the same struct) can run operations without aliasing itself.
pub struct EditTarget<'a> {
    pub document: &'a mut Document,
    pub cursor: &'a mut CellId,
    pub font_size: &'a mut u16,
}

/// Discriminant of an [`Operation`], reported back from undo/redo so callers
/// can decide between a scroll snap and a scroll reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Insert,
    Delete,
    FontResize,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Insert => "insert",
            OperationKind::Delete => "delete",
            OperationKind::FontResize => "font_resize",
        }
    }

    /// True when the operation changes document content.
    pub fn edits_document(&self) -> bool {
        !matches!(self, OperationKind::FontResize)
    }
}

/// A reversible edit. Each variant holds only the handles and scalars needed
/// to run itself forward again or to invert itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// `cell` is allocated on first execution and relinked (never reallocated)
    /// by redo, so later history entries that refer to it stay valid.
    Insert {
        content: CellContent,
        before: CellId,
        cell: Option<CellId>,
    },
    /// `removed` stays `None` when the cursor sat on the sentinel; undo/redo of
    /// such an entry do nothing.
    Delete {
        target: CellId,
        before: CellId,
        removed: Option<CellId>,
    },
    /// `old` is captured when the operation first runs.
    FontResize { old: u16, new: u16 },
}

impl Operation {
    pub fn insert(cursor: CellId, content: CellContent) -> Self {
        Operation::Insert {
            content,
            before: cursor,
            cell: None,
        }
    }

    pub fn delete(cursor: CellId) -> Self {
        Operation::Delete {
            target: cursor,
            before: cursor,
            removed: None,
        }
    }

    pub fn font_resize(new: u16) -> Self {
        Operation::FontResize { old: new, new }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Insert { .. } => OperationKind::Insert,
            Operation::Delete { .. } => OperationKind::Delete,
            Operation::FontResize { .. } => OperationKind::FontResize,
        }
    }

    /// First forward run.
    pub fn apply(&mut self, target: &mut EditTarget<'_>) {
        match self {
            Operation::Insert {
                content,
                before,
                cell,
            } => {
                *target.cursor = *before;
                *cell = Some(target.document.insert_after(target.cursor, *content));
            }
            Operation::Delete {
                target: victim,
                before,
                removed,
            } => {
                *target.cursor = *victim;
                *removed = target.document.remove_current(target.cursor);
                *before = *target.cursor;
            }
            Operation::FontResize { old, new } => {
                *old = *target.font_size;
                *target.font_size = *new;
            }
        }
    }

    /// Inverse action.
    pub fn revert(&mut self, target: &mut EditTarget<'_>) {
        match self {
            Operation::Insert { cell, .. } => {
                if let Some(cell) = *cell {
                    *target.cursor = cell;
                    target.document.remove_current(target.cursor);
                }
            }
            Operation::Delete {
                before, removed, ..
            } => {
                if let Some(cell) = *removed {
                    *target.cursor = *before;
                    target.document.reinsert(target.cursor, cell);
                }
            }
            Operation::FontResize { old, .. } => {
                *target.font_size = *old;
            }
        }
    }

    /// Forward action after an undo. Relinks the same cells `apply` produced.
    pub fn reapply(&mut self, target: &mut EditTarget<'_>) {
        match self {
            Operation::Insert { before, cell, .. } => {
                if let Some(cell) = *cell {
                    *target.cursor = *before;
                    target.document.reinsert(target.cursor, cell);
                }
            }
            Operation::Delete { removed, .. } => {
                if let Some(cell) = *removed {
                    *target.cursor = cell;
                    target.document.remove_current(target.cursor);
                }
            }
            Operation::FontResize { new, .. } => {
                *target.font_size = *new;
            }
        }
    }
}

/// Linear undo/redo stacks. No cap; entries live until `clear` or teardown.
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<Operation>,
    redo_stack: Vec<Operation>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Run `op` forward, record it, and drop the whole redo stack.
    pub fn execute(&mut self, mut op: Operation, target: &mut EditTarget<'_>) -> OperationKind {
        op.apply(target);
        let kind = op.kind();
        self.undo_stack.push(op);
        trace!(target: "state.undo", op = kind.as_str(), undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "execute");
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
        kind
    }

    /// Invert the most recent operation. `None` when there is nothing to undo.
    pub fn undo(&mut self, target: &mut EditTarget<'_>) -> Option<OperationKind> {
        let mut op = self.undo_stack.pop()?;
        op.revert(target);
        let kind = op.kind();
        self.redo_stack.push(op);
        trace!(target: "state.undo", op = kind.as_str(), undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "undo_pop");
        Some(kind)
    }

    /// Re-run the most recently undone operation. `None` when nothing to redo.
    pub fn redo(&mut self, target: &mut EditTarget<'_>) -> Option<OperationKind> {
        let mut op = self.redo_stack.pop()?;
        op.reapply(target);
        let kind = op.kind();
        self.undo_stack.push(op);
        trace!(target: "state.undo", op = kind.as_str(), undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "redo_pop");
        Some(kind)
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        trace!(target: "state.undo", "history_cleared");
    }
}
