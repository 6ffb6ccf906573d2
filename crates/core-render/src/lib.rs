//! Terminal painting for an editing session.
//!
//! Every frame is a full repaint. `compose` turns a [`core_model::DisplayFrame`]
//! plus a status string into a [`Frame`] grid, `writer` translates the grid
//! into crossterm commands, and [`Renderer`] ties both to an `EditorModel`.
//!
//! Grid invariants:
//! - Leader: width >= 1, holds the printable char.
//! - Continuation: width == 0, follows its leader for wide glyphs and never prints.
//! - Flags applied over a span mark leader and continuations alike.

use bitflags::bitflags;

pub mod compose;
pub mod renderer;
pub mod status;
pub mod writer;

pub use compose::{STATUS_ROWS, compose};
pub use renderer::Renderer;
pub use status::{StatusContext, build_status};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CellFlags: u8 {
        const REVERSE = 0b0000_0001;
        const CURSOR  = 0b0000_0010; // caret block
        const THUMB   = 0b0000_0100; // scrollbar thumb
        const STATUS  = 0b0000_1000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    /// Columns covered. `0` designates a continuation cell.
    pub width: u8,
    pub flags: CellFlags,
}

impl Cell {
    pub fn leader(ch: char, width: u16, flags: CellFlags) -> Self {
        Self {
            ch,
            width: width.clamp(1, u8::MAX as u16) as u8,
            flags,
        }
    }

    pub fn continuation(flags: CellFlags) -> Self {
        Self {
            ch: ' ',
            width: 0,
            flags,
        }
    }

    #[inline]
    pub fn is_leader(&self) -> bool {
        self.width > 0
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            width: 1,
            flags: CellFlags::empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<Cell>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width as usize) * (height as usize)],
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Place `ch` at (x,y) spanning `width` columns, clipped at the right edge.
    pub fn set_glyph(&mut self, x: u16, y: u16, ch: char, width: u16, flags: CellFlags) {
        if x >= self.width || y >= self.height {
            return;
        }
        let w = width.max(1).min(self.width - x);
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = Cell::leader(ch, w, flags);
        }
        for dx in 1..w {
            if let Some(idx) = self.index(x + dx, y) {
                self.cells[idx] = Cell::continuation(flags);
            }
        }
    }

    pub fn apply_flags_span(&mut self, x: u16, y: u16, span_width: u16, flags: CellFlags) {
        let span = span_width.min(self.width.saturating_sub(x));
        for dx in 0..span {
            if let Some(idx) = self.index(x + dx, y) {
                self.cells[idx].flags |= flags;
            }
        }
    }

    /// Leader cells of a row as (char, width, flags, start_x).
    pub fn row_leaders(&self, y: u16) -> impl Iterator<Item = (char, u16, CellFlags, u16)> + '_ {
        let width = if y < self.height { self.width } else { 0 };
        let start = y as usize * self.width as usize;
        let mut x = 0u16;
        std::iter::from_fn(move || {
            while x < width {
                let cell = &self.cells[start + x as usize];
                if cell.is_leader() {
                    let w = cell.width as u16;
                    let out = (cell.ch, w, cell.flags, x);
                    x = x.saturating_add(w);
                    return Some(out);
                }
                x += 1;
            }
            None
        })
    }

    /// Printed text of a row (testing / diagnostics).
    pub fn row_text(&self, y: u16) -> String {
        self.row_leaders(y).map(|(c, _, _, _)| c).collect()
    }
}
