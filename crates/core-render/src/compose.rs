//! Build a [`Frame`] from a session's display frame.
//!
//! Layout units are terminal cells: one column per unit of x, one row per
//! unit of y. The bottom `STATUS_ROWS` rows hold the status line; the columns
//! right of the text area hold the scrollbar.

use crate::{CellFlags, Frame};
use core_model::DisplayFrame;
use unicode_width::UnicodeWidthChar;

pub const STATUS_ROWS: u16 = 1;

const TRACK: char = '│';

fn to_u16(v: u32) -> u16 {
    v.min(u16::MAX as u32) as u16
}

pub fn compose(display: &DisplayFrame, status: &str, cols: u16, rows: u16) -> Frame {
    let mut frame = Frame::new(cols, rows);
    let text_rows = rows.saturating_sub(STATUS_ROWS);
    let text_cols = to_u16(display.available_width).min(cols);
    let top = display.scroll_offset;

    for g in display.visible() {
        let Some(c) = g.content.glyph() else {
            continue;
        };
        // Lines partially above the window are not painted.
        let Some(row) = g.y.checked_sub(top) else {
            continue;
        };
        if row >= text_rows as u32 || g.x >= text_cols as u32 {
            continue;
        }
        let shown = if c.is_control() { ' ' } else { c };
        frame.set_glyph(
            to_u16(g.x),
            to_u16(row),
            shown,
            to_u16(g.width.max(1)),
            CellFlags::empty(),
        );
    }

    paint_caret(&mut frame, display, text_cols, text_rows);
    paint_scrollbar(&mut frame, display, text_cols, text_rows);
    paint_status(&mut frame, status, rows);
    frame
}

fn paint_caret(frame: &mut Frame, display: &DisplayFrame, text_cols: u16, text_rows: u16) {
    if text_cols == 0 {
        return;
    }
    let caret = display.cursor;
    let col = to_u16(caret.x).min(text_cols - 1);
    let span = to_u16(caret.width.max(1)).min(text_cols - col);
    for dy in 0..caret.height.max(1) {
        let Some(row) = (caret.y + dy).checked_sub(display.scroll_offset) else {
            continue;
        };
        if row < text_rows as u32 {
            frame.apply_flags_span(col, to_u16(row), span, CellFlags::REVERSE | CellFlags::CURSOR);
        }
    }
}

/// Thumb placement on a track of `track` rows as (start, len).
pub fn thumb(offset: u32, max_offset: u32, viewport_height: u32, content_height: u32, track: u16) -> (u16, u16) {
    if track == 0 {
        return (0, 0);
    }
    if max_offset == 0 || content_height == 0 {
        return (0, track);
    }
    let track64 = track as u64;
    let len = (track64 * viewport_height as u64 / content_height as u64).clamp(1, track64);
    let start = (track64 - len) * offset.min(max_offset) as u64 / max_offset as u64;
    (start as u16, len as u16)
}

fn paint_scrollbar(frame: &mut Frame, display: &DisplayFrame, text_cols: u16, text_rows: u16) {
    let bar_width = frame.width.saturating_sub(text_cols);
    if bar_width == 0 {
        return;
    }
    let (start, len) = thumb(
        display.scroll_offset,
        display.scroll_range.max,
        display.viewport_height,
        display.content_height,
        text_rows,
    );
    for y in 0..text_rows {
        let on_thumb = y >= start && y < start + len;
        for x in text_cols..frame.width {
            if on_thumb {
                frame.set_glyph(x, y, ' ', 1, CellFlags::REVERSE | CellFlags::THUMB);
            } else {
                frame.set_glyph(x, y, TRACK, 1, CellFlags::empty());
            }
        }
    }
}

fn paint_status(frame: &mut Frame, status: &str, rows: u16) {
    if rows == 0 || frame.width == 0 {
        return;
    }
    let y = rows - 1;
    let flags = CellFlags::REVERSE | CellFlags::STATUS;
    let mut x = 0u16;
    for c in status.chars() {
        let w = c.width().unwrap_or(0) as u16;
        if w == 0 {
            continue;
        }
        if x + w > frame.width {
            break;
        }
        frame.set_glyph(x, y, c, w, flags);
        x += w;
    }
    frame.apply_flags_span(0, y, frame.width, flags);
}
