//! Cursor motion helpers that need only the document order.
//!
//! These operate purely on a `Document` + cursor pair. Vertical motion depends
//! on layout positions and lives in `core-model::navigation`.

use crate::{CellId, Document};

/// Move to the predecessor. No-op at the start of the document. Returns
/// whether the cursor moved.
pub fn left(doc: &Document, cursor: &mut CellId) -> bool {
    if cursor.is_sentinel() {
        return false;
    }
    *cursor = doc.prev(*cursor);
    true
}

/// Move to the successor. No-op when the successor is the sentinel.
pub fn right(doc: &Document, cursor: &mut CellId) -> bool {
    let next = doc.next(*cursor);
    if next.is_sentinel() {
        return false;
    }
    *cursor = next;
    true
}
