//! Arena-backed circular document of character cells.
//!
//! Cells live in a `Vec` and refer to their neighbours by `CellId`. Slot 0 is the
//! sentinel: it never carries content and anchors both ends of the ring, so
//! walking `next` from the sentinel back to itself yields the document in order
//! and walking `prev` yields it reversed.
//!
//! Invariants:
//! * The sentinel is always linked and is never handed out by `remove_current`.
//! * A removed cell keeps its slot (and content) for the rest of the session.
//!   Undo/redo entries hold on to those ids and relink them later, so slots are
//!   never recycled.
//! * `len` counts linked non-sentinel cells.

use std::fmt;
use tracing::trace;

/// Stable handle to a cell slot inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(usize);

impl CellId {
    /// The sentinel anchoring both ends of the document ring.
    pub const SENTINEL: CellId = CellId(0);

    pub fn index(self) -> usize {
        self.0
    }

    pub fn is_sentinel(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Terminator a line-break cell was created from. Saving writes it back verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
    Cr,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::Cr => "\r",
        }
    }

    /// Parse the config spelling (`lf`, `crlf`, `cr`), case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "lf" => Some(LineEnding::Lf),
            "crlf" => Some(LineEnding::CrLf),
            "cr" => Some(LineEnding::Cr),
            _ => None,
        }
    }
}

/// What a cell holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellContent {
    Sentinel,
    Glyph(char),
    LineBreak(LineEnding),
}

impl CellContent {
    /// Classify a single typed character. `\n` and `\r` become line breaks.
    pub fn from_char(c: char) -> Self {
        match c {
            '\n' => CellContent::LineBreak(LineEnding::Lf),
            '\r' => CellContent::LineBreak(LineEnding::Cr),
            other => CellContent::Glyph(other),
        }
    }

    pub fn is_line_break(&self) -> bool {
        matches!(self, CellContent::LineBreak(_))
    }

    pub fn is_space(&self) -> bool {
        matches!(self, CellContent::Glyph(' '))
    }

    pub fn glyph(&self) -> Option<char> {
        match self {
            CellContent::Glyph(c) => Some(*c),
            _ => None,
        }
    }
}

/// Split loaded text into cell contents. A `\r\n` pair yields a single
/// `LineBreak(CrLf)` so that saving reproduces the original bytes.
pub fn contents_from_str(text: &str) -> impl Iterator<Item = CellContent> + '_ {
    let mut chars = text.chars().peekable();
    std::iter::from_fn(move || {
        let c = chars.next()?;
        if c == '\r' && chars.peek() == Some(&'\n') {
            chars.next();
            return Some(CellContent::LineBreak(LineEnding::CrLf));
        }
        Some(CellContent::from_char(c))
    })
}

#[derive(Debug, Clone)]
struct Cell {
    content: CellContent,
    prev: CellId,
    next: CellId,
    linked: bool,
}

/// Ordered sequence of cells forming a ring around the sentinel.
#[derive(Debug, Clone)]
pub struct Document {
    cells: Vec<Cell>,
    len: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            cells: vec![Cell {
                content: CellContent::Sentinel,
                prev: CellId::SENTINEL,
                next: CellId::SENTINEL,
                linked: true,
            }],
            len: 0,
        }
    }

    /// Build a document from text (test and bench helper; no history involved).
    pub fn from_text(text: &str) -> Self {
        let mut doc = Self::new();
        let mut cursor = CellId::SENTINEL;
        for content in contents_from_str(text) {
            doc.insert_after(&mut cursor, content);
        }
        doc
    }

    /// Number of linked content cells.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of arena slots ever allocated, sentinel included. Position tables
    /// are sized by this.
    pub fn slot_count(&self) -> usize {
        self.cells.len()
    }

    pub fn first(&self) -> CellId {
        self.next(CellId::SENTINEL)
    }

    pub fn last(&self) -> CellId {
        self.prev(CellId::SENTINEL)
    }

    pub fn next(&self, id: CellId) -> CellId {
        self.cells[id.0].next
    }

    pub fn prev(&self, id: CellId) -> CellId {
        self.cells[id.0].prev
    }

    pub fn content(&self, id: CellId) -> CellContent {
        self.cells[id.0].content
    }

    pub fn is_linked(&self, id: CellId) -> bool {
        self.cells.get(id.0).is_some_and(|c| c.linked)
    }

    /// Allocate a cell holding `content`, link it right after `cursor` and
    /// advance the cursor onto it.
    pub fn insert_after(&mut self, cursor: &mut CellId, content: CellContent) -> CellId {
        debug_assert!(
            !matches!(content, CellContent::Sentinel),
            "sentinel content is reserved"
        );
        let id = CellId(self.cells.len());
        self.cells.push(Cell {
            content,
            prev: id,
            next: id,
            linked: false,
        });
        self.link_after(*cursor, id);
        trace!(target: "text.document", after = %cursor, cell = %id, "insert_after");
        *cursor = id;
        id
    }

    /// Unlink the cell under the cursor. The cursor moves to the removed cell's
    /// predecessor. At the sentinel nothing happens and `None` is returned.
    pub fn remove_current(&mut self, cursor: &mut CellId) -> Option<CellId> {
        let target = *cursor;
        if target.is_sentinel() {
            return None;
        }
        debug_assert!(self.is_linked(target), "cursor must reference a linked cell");
        let prev = self.cells[target.0].prev;
        let next = self.cells[target.0].next;
        self.cells[prev.0].next = next;
        self.cells[next.0].prev = prev;
        let cell = &mut self.cells[target.0];
        cell.linked = false;
        cell.prev = target;
        cell.next = target;
        self.len -= 1;
        trace!(target: "text.document", cell = %target, cursor = %prev, "remove_current");
        *cursor = prev;
        Some(target)
    }

    /// Relink a previously removed cell right after `cursor` and advance the
    /// cursor onto it. Used by undo-of-delete and redo-of-insert.
    pub fn reinsert(&mut self, cursor: &mut CellId, cell: CellId) {
        debug_assert!(!cell.is_sentinel(), "sentinel is never detached");
        debug_assert!(!self.is_linked(cell), "cell {cell} is already linked");
        self.link_after(*cursor, cell);
        trace!(target: "text.document", after = %cursor, cell = %cell, "reinsert");
        *cursor = cell;
    }

    fn link_after(&mut self, after: CellId, id: CellId) {
        debug_assert!(self.is_linked(after), "anchor {after} must be linked");
        let next = self.cells[after.0].next;
        {
            let cell = &mut self.cells[id.0];
            cell.prev = after;
            cell.next = next;
            cell.linked = true;
        }
        self.cells[after.0].next = id;
        self.cells[next.0].prev = id;
        self.len += 1;
    }

    /// Iterate linked content cells in document order.
    pub fn iter(&self) -> Cells<'_> {
        Cells {
            doc: self,
            at: self.first(),
        }
    }

    /// Document text with every line break rendered as `\n`.
    pub fn text(&self) -> String {
        self.iter()
            .map(|id| match self.content(id) {
                CellContent::Glyph(c) => c,
                _ => '\n',
            })
            .collect()
    }

    /// Document text with line breaks written as their original terminators.
    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity(self.len);
        for id in self.iter() {
            match self.content(id) {
                CellContent::Glyph(c) => out.push(c),
                CellContent::LineBreak(ending) => out.push_str(ending.as_str()),
                CellContent::Sentinel => {}
            }
        }
        out
    }

    /// Walk the ring both ways and confirm the links agree with each other and
    /// with `len`.
    pub fn is_consistent(&self) -> bool {
        let mut forward = Vec::with_capacity(self.len);
        let mut at = self.first();
        while !at.is_sentinel() {
            if forward.len() > self.len || !self.is_linked(at) {
                return false;
            }
            let next = self.next(at);
            if self.prev(next) != at {
                return false;
            }
            forward.push(at);
            at = next;
        }
        if forward.len() != self.len || self.prev(self.first()) != CellId::SENTINEL {
            return false;
        }
        let mut backward = Vec::with_capacity(self.len);
        let mut at = self.last();
        while !at.is_sentinel() {
            if backward.len() > self.len {
                return false;
            }
            backward.push(at);
            at = self.prev(at);
        }
        backward.reverse();
        forward == backward
    }
}

/// Iterator over linked cells in document order.
pub struct Cells<'a> {
    doc: &'a Document,
    at: CellId,
}

impl Iterator for Cells<'_> {
    type Item = CellId;

    fn next(&mut self) -> Option<CellId> {
        if self.at.is_sentinel() {
            return None;
        }
        let id = self.at;
        self.at = self.doc.next(id);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_a_ring_of_one() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.first(), CellId::SENTINEL);
        assert_eq!(doc.last(), CellId::SENTINEL);
        assert!(doc.is_consistent());
    }

    #[test]
    fn insert_after_advances_cursor() {
        let mut doc = Document::new();
        let mut cursor = CellId::SENTINEL;
        let a = doc.insert_after(&mut cursor, CellContent::Glyph('a'));
        assert_eq!(cursor, a);
        let b = doc.insert_after(&mut cursor, CellContent::Glyph('b'));
        assert_eq!(cursor, b);
        assert_eq!(doc.text(), "ab");
        assert_eq!(doc.prev(b), a);
        assert_eq!(doc.next(b), CellId::SENTINEL);
        assert!(doc.is_consistent());
    }

    #[test]
    fn insert_in_the_middle() {
        let mut doc = Document::from_text("ac");
        let mut cursor = doc.first();
        doc.insert_after(&mut cursor, CellContent::Glyph('b'));
        assert_eq!(doc.text(), "abc");
        assert!(doc.is_consistent());
    }

    #[test]
    fn remove_at_sentinel_is_noop() {
        let mut doc = Document::from_text("xy");
        let mut cursor = CellId::SENTINEL;
        assert_eq!(doc.remove_current(&mut cursor), None);
        assert_eq!(cursor, CellId::SENTINEL);
        assert_eq!(doc.text(), "xy");
    }

    #[test]
    fn remove_then_reinsert_restores_adjacency() {
        let mut doc = Document::from_text("abc");
        let b = doc.next(doc.first());
        let mut cursor = b;
        let removed = doc.remove_current(&mut cursor).unwrap();
        assert_eq!(removed, b);
        assert_eq!(cursor, doc.first());
        assert_eq!(doc.text(), "ac");
        assert!(!doc.is_linked(b));
        assert_eq!(doc.content(b), CellContent::Glyph('b'));

        doc.reinsert(&mut cursor, b);
        assert_eq!(cursor, b);
        assert_eq!(doc.text(), "abc");
        assert!(doc.is_consistent());
    }

    #[test]
    fn crlf_pairs_collapse_into_one_cell() {
        let doc = Document::from_text("a\r\nb\rc\n");
        assert_eq!(doc.len(), 6);
        assert_eq!(doc.text(), "a\nb\nc\n");
        assert_eq!(doc.serialize(), "a\r\nb\rc\n");
    }

    #[test]
    fn slots_are_never_recycled() {
        let mut doc = Document::from_text("ab");
        let mut cursor = doc.last();
        doc.remove_current(&mut cursor);
        let c = doc.insert_after(&mut cursor, CellContent::Glyph('c'));
        assert_eq!(c.index(), 3);
        assert_eq!(doc.slot_count(), 4);
    }

    #[test]
    fn line_ending_names() {
        assert_eq!(LineEnding::from_name("CRLF"), Some(LineEnding::CrLf));
        assert_eq!(LineEnding::from_name("lf"), Some(LineEnding::Lf));
        assert_eq!(LineEnding::from_name("nope"), None);
    }
}
