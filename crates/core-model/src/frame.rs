//! Read-only snapshot handed to the display surface.

use crate::layout::CursorBox;
use crate::viewport::ScrollRange;
use core_text::{CellContent, CellId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedGlyph {
    pub cell: CellId,
    pub content: CellContent,
    pub x: u32,
    pub y: u32,
    pub width: u32,
}

/// Everything a surface needs to paint one frame, in document coordinates.
/// Subtract `scroll_offset` from `y` to get window rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFrame {
    /// Every linked cell in document order.
    pub glyphs: Vec<PlacedGlyph>,
    pub cursor: CursorBox,
    pub cursor_cell: CellId,
    pub scroll_range: ScrollRange,
    pub scroll_offset: u32,
    pub available_width: u32,
    pub viewport_height: u32,
    pub line_height: u32,
    pub content_height: u32,
}

impl DisplayFrame {
    /// Glyphs whose line intersects the scroll window.
    pub fn visible(&self) -> impl Iterator<Item = &PlacedGlyph> {
        let top = self.scroll_offset;
        let bottom = top + self.viewport_height;
        let lh = self.line_height;
        self.glyphs
            .iter()
            .filter(move |g| g.y + lh > top && g.y < bottom)
    }
}
