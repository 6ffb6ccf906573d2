//! Editing session: state + layout + viewport behind explicit entry points.
//!
//! `EditorModel` is the only thing the front end talks to. Every entry point
//! leaves the session in a settled state:
//! * the layout table reflects the current document, cursor, font and width;
//! * the viewport's content height matches the last pass and its offset is in
//!   range;
//! * after edits, moves and clicks the caret is inside the scroll window;
//!   after a font change the offset is back at 0.
//!
//! There is no incremental relayout. Each settle runs a full pass, which keeps
//! the position table trivially consistent with document order.

use core_state::{EditorState, OperationKind};
use core_text::{CellContent, CellId, GlyphMetrics};
use tracing::debug;

pub mod frame;
pub mod layout;
pub mod navigation;
pub mod viewport;

pub use frame::{DisplayFrame, PlacedGlyph};
pub use layout::{CursorBox, LayoutEngine, LayoutTable, Point};
pub use navigation::Direction;
pub use viewport::{ScrollRange, Viewport};

pub struct EditorModel {
    state: EditorState,
    viewport: Viewport,
    engine: LayoutEngine,
    table: LayoutTable,
    metrics: Box<dyn GlyphMetrics>,
}

impl EditorModel {
    pub fn new(state: EditorState, viewport: Viewport, metrics: Box<dyn GlyphMetrics>) -> Self {
        let mut model = Self {
            state,
            viewport,
            engine: LayoutEngine::new(),
            table: LayoutTable::default(),
            metrics,
        };
        model.relayout();
        model
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Direct state access for file metadata. Callers that touch the document
    /// or cursor must call [`EditorModel::relayout`] afterwards.
    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn layout(&self) -> &LayoutTable {
        &self.table
    }

    pub fn cursor_box(&self) -> CursorBox {
        self.table.cursor
    }

    /// Full layout pass; also refreshes the viewport's scroll range.
    pub fn relayout(&mut self) {
        self.table = self.engine.layout(
            &self.state.document,
            self.state.cursor,
            &self.state.font,
            self.metrics.as_ref(),
            self.viewport.available_width(),
        );
        self.viewport.set_content_height(self.table.content_height);
    }

    fn relayout_and_snap(&mut self) {
        self.relayout();
        self.viewport.snap_to(&self.table.cursor);
    }

    fn settle(&mut self, kind: OperationKind) {
        match kind {
            OperationKind::FontResize => {
                self.relayout();
                self.viewport.reset();
            }
            OperationKind::Insert | OperationKind::Delete => self.relayout_and_snap(),
        }
    }

    /// Replace the document with `text` (unrecorded). Cursor returns to the
    /// start and the window to the top.
    pub fn load_text(&mut self, text: &str) {
        self.state.load_text(text);
        self.viewport.reset();
        self.relayout();
    }

    pub fn insert(&mut self, content: CellContent) {
        let kind = self.state.insert(content);
        self.settle(kind);
    }

    /// Insert the session's configured line terminator.
    pub fn insert_line_break(&mut self) {
        self.insert(CellContent::LineBreak(self.state.line_ending));
    }

    /// Backspace. At the start of the document this records an inert entry.
    pub fn delete(&mut self) {
        let kind = self.state.delete();
        self.settle(kind);
    }

    pub fn undo(&mut self) -> bool {
        match self.state.undo() {
            Some(kind) => {
                self.settle(kind);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.state.redo() {
            Some(kind) => {
                self.settle(kind);
                true
            }
            None => false,
        }
    }

    /// Grow the font by `step`. Returns false if the size would overflow.
    pub fn increase_font(&mut self, step: u16) -> bool {
        match self.state.font.size.checked_add(step) {
            Some(size) if step > 0 => {
                self.resize_font(size);
                true
            }
            _ => false,
        }
    }

    /// Shrink the font by `step`, only while the result stays positive.
    pub fn decrease_font(&mut self, step: u16) -> bool {
        match self.state.font.size.checked_sub(step) {
            Some(size) if size > 0 && step > 0 => {
                self.resize_font(size);
                true
            }
            _ => false,
        }
    }

    fn resize_font(&mut self, size: u16) {
        debug!(target: "model", from = self.state.font.size, to = size, "font_resize");
        let kind = self.state.resize_font(size);
        self.settle(kind);
    }

    /// Arrow-key motion. Relayouts and snaps even when the cursor did not
    /// move.
    pub fn move_cursor(&mut self, dir: Direction) -> bool {
        let moved = navigation::step(
            &self.state.document,
            &self.table,
            &mut self.state.cursor,
            dir,
        );
        self.relayout_and_snap();
        moved
    }

    /// Mouse press at window coordinates. Returns the new cursor cell.
    pub fn on_click(&mut self, x: u32, y: u32) -> CellId {
        let doc_y = y + self.viewport.offset();
        self.state.cursor = navigation::locate_from_point(&self.state.document, &self.table, x, doc_y);
        self.relayout_and_snap();
        self.state.cursor
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        debug!(target: "model.viewport", width, height, "resize");
        self.viewport.resize(width, height);
        self.relayout_and_snap();
    }

    /// Change the reserved scrollbar width (after a config re-clamp).
    pub fn set_scrollbar_width(&mut self, width: u32) {
        self.viewport.set_scrollbar_width(width);
        self.relayout_and_snap();
    }

    /// Scroll the window by `delta` device units without moving the cursor.
    pub fn on_scroll(&mut self, delta: i64) -> bool {
        self.viewport.scroll_by(delta)
    }

    pub fn frame(&self) -> DisplayFrame {
        let glyphs = self
            .state
            .document
            .iter()
            .map(|cell| {
                let at = self.table.position(cell);
                PlacedGlyph {
                    cell,
                    content: self.state.document.content(cell),
                    x: at.x,
                    y: at.y,
                    width: self.table.width(cell),
                }
            })
            .collect();
        DisplayFrame {
            glyphs,
            cursor: self.table.cursor,
            cursor_cell: self.state.cursor,
            scroll_range: self.viewport.range(),
            scroll_offset: self.viewport.offset(),
            available_width: self.table.available_width,
            viewport_height: self.viewport.height(),
            line_height: self.table.line_height,
            content_height: self.table.content_height,
        }
    }
}
