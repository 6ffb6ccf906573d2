//! Cursor movement that depends on layout.
//!
//! Left/right are order-only and live in `core_text::motion`; up/down and
//! click location read the [`LayoutTable`] of the latest pass. None of these
//! mutate the document. The caller relayouts and snaps the viewport after a
//! successful move.

use crate::layout::LayoutTable;
use core_text::{CellId, Document, motion};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// Move `cursor` one step in `dir`. Returns false when the move was a no-op.
pub fn step(doc: &Document, table: &LayoutTable, cursor: &mut CellId, dir: Direction) -> bool {
    let from = *cursor;
    let moved = match dir {
        Direction::Left => motion::left(doc, cursor),
        Direction::Right => motion::right(doc, cursor),
        Direction::Up => up(doc, table, cursor),
        Direction::Down => down(doc, table, cursor),
    };
    trace!(target: "model.nav", dir = dir.as_str(), %from, to = %cursor, moved, "step");
    moved
}

/// Distance from the caret column to the caret position after `id`.
fn distance(table: &LayoutTable, id: CellId, target_x: u32) -> u32 {
    table.trailing_edge(id).abs_diff(target_x)
}

/// Move to the closest position on the next visual line. No next line means
/// no move.
///
/// Lines are measured from the caret, which for a line-break cursor cell is
/// drawn at the start of the following line.
pub fn down(doc: &Document, table: &LayoutTable, cursor: &mut CellId) -> bool {
    let origin_y = table.cursor.y;
    let target_x = table.cursor.x;

    let mut temp = doc.next(*cursor);
    while !temp.is_sentinel() && table.y(temp) <= origin_y {
        temp = doc.next(temp);
    }
    if temp.is_sentinel() {
        return false;
    }

    loop {
        let next = doc.next(temp);
        if next.is_sentinel()
            || table.y(next) != table.y(temp)
            || doc.content(next).is_line_break()
        {
            break;
        }
        if distance(table, temp, target_x) < distance(table, next, target_x) {
            break;
        }
        temp = next;
    }
    settle(doc, cursor, temp)
}

/// Move to the closest position on the previous visual line. No previous
/// line means no move.
pub fn up(doc: &Document, table: &LayoutTable, cursor: &mut CellId) -> bool {
    let origin_y = table.cursor.y;
    let target_x = table.cursor.x;

    let mut temp = *cursor;
    while !temp.is_sentinel() && table.y(temp) >= origin_y {
        temp = doc.prev(temp);
    }
    if temp.is_sentinel() {
        return false;
    }

    loop {
        let prev = doc.prev(temp);
        if prev.is_sentinel()
            || table.y(prev) != table.y(temp)
            || doc.content(prev).is_line_break()
        {
            break;
        }
        if distance(table, temp, target_x) < distance(table, prev, target_x) {
            break;
        }
        temp = prev;
    }
    settle(doc, cursor, temp)
}

/// A caret after a line-break marker sits on the next line, so a scan that
/// ends on one (an empty line) lands on its predecessor instead.
fn settle(doc: &Document, cursor: &mut CellId, mut temp: CellId) -> bool {
    if doc.content(temp).is_line_break() {
        temp = doc.prev(temp);
    }
    let moved = temp != *cursor;
    *cursor = temp;
    moved
}

/// Cell the caret lands after for a click at `(x, y)` in document
/// coordinates (the caller adds the scroll offset).
///
/// The line is the first whose span `[y, y + line_height)` contains the
/// point; a point below every line resolves against the last cell. Within
/// the line the caret goes before the cell under the point when the click is
/// at least as close to its leading edge, after it otherwise.
pub fn locate_from_point(doc: &Document, table: &LayoutTable, x: u32, y: u32) -> CellId {
    let line_height = table.line_height;
    let mut p = doc.first();
    while !p.is_sentinel() {
        let top = table.y(p);
        if y >= top && y < top + line_height {
            break;
        }
        p = doc.next(p);
    }

    let line_y = table.y(p);
    while !p.is_sentinel() && table.y(p) == line_y && table.position(p).x <= x {
        p = doc.next(p);
    }
    let hit = doc.prev(p);

    let leading = table.position(hit).x.abs_diff(x);
    let trailing = table.trailing_edge(hit).abs_diff(x);
    let landed = if leading <= trailing {
        doc.prev(hit)
    } else {
        hit
    };
    trace!(target: "model.nav", x, y, %landed, "locate_from_point");
    landed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutEngine;
    use core_text::{FontDescriptor, MonospaceMetrics};

    fn laid_out(text: &str, width: u32, cursor_at: Option<usize>) -> (Document, CellId, LayoutTable) {
        let doc = Document::from_text(text);
        let cursor = match cursor_at {
            Some(n) => doc.iter().nth(n).unwrap(),
            None => CellId::SENTINEL,
        };
        let table = relayout(&doc, cursor, width);
        (doc, cursor, table)
    }

    fn relayout(doc: &Document, cursor: CellId, width: u32) -> LayoutTable {
        LayoutEngine::new().layout(
            doc,
            cursor,
            &FontDescriptor::new("Mono", 10),
            &MonospaceMetrics::new(0.1, 0.1),
            width,
        )
    }

    fn index_of(doc: &Document, id: CellId) -> Option<usize> {
        doc.iter().position(|c| c == id)
    }

    #[test]
    fn down_keeps_column() {
        // Lines "abcd¶" / "efgh"; caret after 'b' (x = 2).
        let (doc, mut cursor, table) = laid_out("abcd\nefgh", 20, Some(1));
        assert!(down(&doc, &table, &mut cursor));
        assert_eq!(index_of(&doc, cursor), Some(6)); // after 'f'
    }

    #[test]
    fn down_stops_before_line_break_of_short_line() {
        // "abcdef¶" / "gh¶" / "ij": caret after 'f' (x = 6) lands at end of "gh".
        let (doc, mut cursor, table) = laid_out("abcdef\ngh\nij", 20, Some(5));
        assert!(down(&doc, &table, &mut cursor));
        assert_eq!(doc.content(cursor).glyph(), Some('h'));
    }

    #[test]
    fn down_on_last_line_is_noop() {
        let (doc, mut cursor, table) = laid_out("X", 20, Some(0));
        assert!(!down(&doc, &table, &mut cursor));
        assert_eq!(index_of(&doc, cursor), Some(0));
    }

    #[test]
    fn up_keeps_column_and_noops_on_first_line() {
        let (doc, mut cursor, table) = laid_out("abcd\nefgh", 20, Some(7)); // after 'g'
        assert!(up(&doc, &table, &mut cursor));
        assert_eq!(doc.content(cursor).glyph(), Some('c'));
        let table = relayout(&doc, cursor, 20);
        assert!(!up(&doc, &table, &mut cursor));
        assert_eq!(doc.content(cursor).glyph(), Some('c'));
    }

    #[test]
    fn up_from_sentinel_is_noop() {
        let (doc, mut cursor, table) = laid_out("ab\ncd", 20, None);
        assert!(!up(&doc, &table, &mut cursor));
        assert!(cursor.is_sentinel());
    }

    #[test]
    fn up_into_empty_line_lands_at_its_start() {
        // "ab¶" / "¶" / "cd": caret after 'd'.
        let (doc, mut cursor, table) = laid_out("ab\n\ncd", 20, Some(5));
        assert!(up(&doc, &table, &mut cursor));
        assert_eq!(index_of(&doc, cursor), Some(2));
        let table = relayout(&doc, cursor, 20);
        assert_eq!((table.cursor.x, table.cursor.y), (0, 1));
    }

    #[test]
    fn down_from_line_start_uses_caret_line() {
        // Cursor on the first marker: caret drawn at the start of the empty line.
        let (doc, mut cursor, table) = laid_out("ab\n\ncd", 20, Some(2));
        assert!(down(&doc, &table, &mut cursor));
        assert_eq!(doc.content(cursor).glyph(), Some('c'));
    }

    #[test]
    fn down_crosses_soft_wrap() {
        // "ab " / "cd" at width 3; caret after 'a' (x = 1) goes after 'c'.
        let (doc, mut cursor, table) = laid_out("ab cd", 3, Some(0));
        assert!(down(&doc, &table, &mut cursor));
        assert_eq!(doc.content(cursor).glyph(), Some('c'));
    }

    #[test]
    fn click_lands_on_nearest_edge() {
        let (doc, _, table) = laid_out("abcd", 20, None);
        // x = 2 is the boundary between 'b' and 'c'.
        assert_eq!(doc.content(locate_from_point(&doc, &table, 2, 0)).glyph(), Some('b'));
        // x = 0 is the start of the document.
        assert!(locate_from_point(&doc, &table, 0, 0).is_sentinel());
    }

    #[test]
    fn click_past_line_end_lands_before_line_break() {
        let (doc, _, table) = laid_out("ab\ncd", 20, None);
        let hit = locate_from_point(&doc, &table, 15, 0);
        assert_eq!(doc.content(hit).glyph(), Some('b'));
    }

    #[test]
    fn click_below_last_line_resolves_against_last_cell() {
        let (doc, _, table) = laid_out("ab\ncd", 20, None);
        assert_eq!(locate_from_point(&doc, &table, 15, 40), doc.last());
    }

    #[test]
    fn click_on_empty_document_is_sentinel() {
        let (doc, _, table) = laid_out("", 20, None);
        assert!(locate_from_point(&doc, &table, 5, 5).is_sentinel());
    }

    #[test]
    fn step_dispatches_order_only_moves() {
        let (doc, mut cursor, table) = laid_out("abc", 20, Some(1));
        let start = cursor;
        assert!(step(&doc, &table, &mut cursor, Direction::Right));
        assert!(step(&doc, &table, &mut cursor, Direction::Left));
        assert_eq!(cursor, start);
    }
}
