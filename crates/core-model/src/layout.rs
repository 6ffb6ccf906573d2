//! Greedy word-wrapping layout.
//!
//! One full pass over the document assigns every linked cell an `(x, y)` in
//! device units and records the caret box. The pass is re-run after every
//! mutation, navigation, viewport change or font change; there is no
//! incremental update.
//!
//! Wrap rules, applied when `x + width >= available_width` for a cell that is
//! not at the start of a line (`x > 0`) and is not a space:
//! * Walk back from the predecessor looking for a space. If one is found the
//!   new line starts at the space's successor (the space hangs at the end of
//!   the previous line) and the scan resumes from there.
//! * If a cell already placed at `x == 0` in this pass is reached first, the
//!   word cannot be broken earlier and the break is forced at the overflowing
//!   cell.
//!
//! A space that reaches the limit never wraps by itself; it stays on the line
//! it ends. Line-break markers are placed at the end of the line they
//! terminate, then `y` advances.
//!
//! Invariants of a [`LayoutTable`]:
//! * Positions and widths are whole device units (the provider's `f64`s are
//!   rounded before any comparison).
//! * `y` is non-decreasing in document order.
//! * The first cell of every visual line has `x == 0`.

use core_text::{CellContent, CellId, Document, FontDescriptor, GlyphMetrics};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

/// Caret rectangle: a thin marker at the trailing edge of the cursor cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CursorBox {
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Result of a layout pass, indexed by cell slot. Read-only for navigation
/// and the display surface.
#[derive(Debug, Clone, Default)]
pub struct LayoutTable {
    positions: Vec<Point>,
    widths: Vec<u32>,
    pub line_height: u32,
    pub available_width: u32,
    pub cursor: CursorBox,
    /// Final `y` plus one line height.
    pub content_height: u32,
    pub lines: usize,
}

impl LayoutTable {
    fn sized(slots: usize, line_height: u32, available_width: u32) -> Self {
        Self {
            positions: vec![Point::default(); slots],
            widths: vec![0; slots],
            line_height,
            available_width,
            cursor: CursorBox {
                x: 0,
                y: 0,
                width: 1,
                height: line_height,
            },
            content_height: line_height,
            lines: 1,
        }
    }

    fn place(&mut self, id: CellId, at: Point, width: u32) {
        self.positions[id.index()] = at;
        self.widths[id.index()] = width;
    }

    /// Position of `id`. The sentinel (and any slot not placed by the last
    /// pass) reports the origin.
    pub fn position(&self, id: CellId) -> Point {
        self.positions.get(id.index()).copied().unwrap_or_default()
    }

    pub fn width(&self, id: CellId) -> u32 {
        self.widths.get(id.index()).copied().unwrap_or(0)
    }

    pub fn y(&self, id: CellId) -> u32 {
        self.position(id).y
    }

    /// Right edge of the cell, where a caret after it is drawn.
    pub fn trailing_edge(&self, id: CellId) -> u32 {
        self.position(id).x + self.width(id)
    }
}

/// Round a measured extent to whole device units.
pub fn device_units(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.round() as u32
    } else {
        0
    }
}

/// Rounded glyph widths for the current font, re-queried lazily after a font
/// change.
#[derive(Debug, Default)]
struct WidthCache {
    font: Option<FontDescriptor>,
    glyphs: HashMap<char, u32>,
    line_break: u32,
    line_height: u32,
}

impl WidthCache {
    fn prepare(&mut self, font: &FontDescriptor, metrics: &dyn GlyphMetrics) {
        if self.font.as_ref() == Some(font) {
            return;
        }
        debug!(target: "model.layout", family = font.family.as_str(), size = font.size, cached = self.glyphs.len(), "width_cache_reset");
        self.glyphs.clear();
        self.line_break = device_units(metrics.measure("", font).width);
        self.line_height = device_units(metrics.line_height(font));
        self.font = Some(font.clone());
    }

    fn width(&mut self, content: CellContent, metrics: &dyn GlyphMetrics) -> u32 {
        match content {
            CellContent::Glyph(c) => {
                if let Some(w) = self.glyphs.get(&c) {
                    return *w;
                }
                let Some(font) = self.font.as_ref() else {
                    return 0;
                };
                let mut buf = [0u8; 4];
                let w = device_units(metrics.measure(c.encode_utf8(&mut buf), font).width);
                self.glyphs.insert(c, w);
                w
            }
            CellContent::LineBreak(_) => self.line_break,
            CellContent::Sentinel => 0,
        }
    }
}

#[derive(Debug, Default)]
pub struct LayoutEngine {
    cache: WidthCache,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a full pass.
    pub fn layout(
        &mut self,
        doc: &Document,
        cursor: CellId,
        font: &FontDescriptor,
        metrics: &dyn GlyphMetrics,
        available_width: u32,
    ) -> LayoutTable {
        self.cache.prepare(font, metrics);
        let line_height = self.cache.line_height;
        let mut table = LayoutTable::sized(doc.slot_count(), line_height, available_width);

        let (mut x, mut y) = (0u32, 0u32);
        let mut p = doc.first();
        while !p.is_sentinel() {
            let content = doc.content(p);
            let mut width = self.cache.width(content, metrics);
            // Spaces hang past the edge and a marker always ends its own line.
            if x > 0
                && x + width >= available_width
                && !doc.prev(p).is_sentinel()
                && !content.is_space()
                && !content.is_line_break()
            {
                p = break_point(doc, &table, p);
                width = self.cache.width(doc.content(p), metrics);
                x = 0;
                y += line_height;
            }
            table.place(p, Point { x, y }, width);
            x += width;
            if doc.content(p).is_line_break() {
                y += line_height;
                x = 0;
            }
            if p == cursor {
                table.cursor.x = x;
                table.cursor.y = y;
            }
            p = doc.next(p);
        }

        table.content_height = y + line_height;
        table.lines = if line_height == 0 {
            1
        } else {
            (y / line_height) as usize + 1
        };
        debug!(
            target: "model.layout",
            cells = doc.len(),
            lines = table.lines,
            content_height = table.content_height,
            available_width,
            "layout_pass"
        );
        table
    }
}

/// Where the line that `overflow` does not fit on should restart.
fn break_point(doc: &Document, table: &LayoutTable, overflow: CellId) -> CellId {
    let mut p = doc.prev(overflow);
    while !p.is_sentinel() {
        if doc.content(p).is_space() {
            return doc.next(p);
        }
        if table.position(p).x == 0 {
            return overflow;
        }
        p = doc.prev(p);
    }
    overflow
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::MonospaceMetrics;
    use pretty_assertions::assert_eq;

    // Unit glyphs: font size 10 with advance/line 0.1 em -> 1x1 device units.
    fn unit() -> (FontDescriptor, MonospaceMetrics) {
        (
            FontDescriptor::new("Mono", 10),
            MonospaceMetrics::new(0.1, 0.1),
        )
    }

    fn lines_of(doc: &Document, table: &LayoutTable) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for id in doc.iter() {
            let row = table.y(id) as usize;
            while out.len() <= row {
                out.push(String::new());
            }
            match doc.content(id) {
                CellContent::Glyph(c) => out[row].push(c),
                _ => out[row].push('¶'),
            }
        }
        out
    }

    fn run(text: &str, width: u32) -> (Document, LayoutTable) {
        let doc = Document::from_text(text);
        let (font, metrics) = unit();
        let table = LayoutEngine::new().layout(&doc, doc.last(), &font, &metrics, width);
        (doc, table)
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let (doc, table) = run("abc", 10);
        assert_eq!(lines_of(&doc, &table), vec!["abc"]);
        assert_eq!(table.cursor, CursorBox { x: 3, y: 0, width: 1, height: 1 });
        assert_eq!(table.content_height, 1);
    }

    #[test]
    fn space_hangs_and_next_word_wraps() {
        // Width 3 fits two unit glyphs strictly inside the limit.
        let (doc, table) = run("ab cd", 3);
        assert_eq!(lines_of(&doc, &table), vec!["ab ", "cd"]);
        let space = doc.next(doc.next(doc.first()));
        assert_eq!(table.trailing_edge(space), 3);
        assert_eq!(table.content_height, 2);
    }

    #[test]
    fn wraps_whole_word_at_interior_space() {
        let (doc, table) = run("hello world", 8);
        assert_eq!(lines_of(&doc, &table), vec!["hello ", "world"]);
    }

    #[test]
    fn forced_mid_word_break_without_spaces() {
        let (doc, table) = run("abcdefgh", 5);
        assert_eq!(lines_of(&doc, &table), vec!["abcd", "efgh"]);
        let e = doc.iter().nth(4).unwrap();
        assert_eq!(table.position(e), Point { x: 0, y: 1 });
    }

    #[test]
    fn word_after_line_start_breaks_mid_word_when_it_began_the_line() {
        let (doc, table) = run("ab abcdefgh", 5);
        assert_eq!(lines_of(&doc, &table), vec!["ab ", "abcd", "efgh"]);
    }

    #[test]
    fn explicit_line_breaks_end_their_line() {
        let (doc, table) = run("ab\ncd\n", 10);
        assert_eq!(lines_of(&doc, &table), vec!["ab¶", "cd¶"]);
        let first_break = doc.iter().nth(2).unwrap();
        assert_eq!(table.position(first_break), Point { x: 2, y: 0 });
        // Cursor after the trailing newline sits at the start of a third line.
        assert_eq!((table.cursor.x, table.cursor.y), (0, 2));
        assert_eq!(table.content_height, 3);
    }

    #[test]
    fn marker_after_hanging_space_stays_on_its_line() {
        let (doc, table) = run("ab \ncd", 3);
        assert_eq!(lines_of(&doc, &table), vec!["ab ¶", "cd"]);
        let marker = doc.iter().nth(3).unwrap();
        assert_eq!(table.position(marker), Point { x: 3, y: 0 });
        assert_eq!(table.content_height, 2);
    }

    #[test]
    fn cursor_at_sentinel_is_origin() {
        let doc = Document::from_text("abc");
        let (font, metrics) = unit();
        let table = LayoutEngine::new().layout(&doc, CellId::SENTINEL, &font, &metrics, 10);
        assert_eq!((table.cursor.x, table.cursor.y), (0, 0));
    }

    #[test]
    fn cursor_follows_rewrapped_cell() {
        let doc = Document::from_text("ab cd");
        let c = doc.iter().nth(3).unwrap();
        let (font, metrics) = unit();
        let table = LayoutEngine::new().layout(&doc, c, &font, &metrics, 3);
        assert_eq!((table.cursor.x, table.cursor.y), (1, 1));
    }

    #[test]
    fn widths_are_rounded_before_comparison() {
        // 0.06 em * 10 = 0.6 -> rounds to 1 unit per glyph.
        let doc = Document::from_text("abcd");
        let font = FontDescriptor::new("Mono", 10);
        let metrics = MonospaceMetrics::new(0.06, 0.1);
        let table = LayoutEngine::new().layout(&doc, doc.last(), &font, &metrics, 100);
        assert_eq!(table.trailing_edge(doc.last()), 4);
    }

    #[test]
    fn font_change_invalidates_cached_widths() {
        let doc = Document::from_text("ab");
        let metrics = MonospaceMetrics::new(0.1, 0.1);
        let mut engine = LayoutEngine::new();
        let small = engine.layout(&doc, doc.last(), &FontDescriptor::new("Mono", 10), &metrics, 100);
        let big = engine.layout(&doc, doc.last(), &FontDescriptor::new("Mono", 20), &metrics, 100);
        assert_eq!(small.trailing_edge(doc.last()), 2);
        assert_eq!(big.trailing_edge(doc.last()), 4);
        assert_eq!(big.line_height, 2);
    }

    #[test]
    fn zero_width_viewport_puts_each_glyph_on_its_own_line() {
        let (doc, table) = run("abc", 0);
        assert_eq!(lines_of(&doc, &table), vec!["a", "b", "c"]);
    }
}
