//! Vertical scroll window over the laid-out document.
//!
//! Offsets are in device units. The valid range is `0..=max` where
//! `max = content_height.saturating_sub(height)`; every setter clamps into it.

use crate::layout::CursorBox;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
    /// Reserved on the right edge for the scrollbar.
    scrollbar_width: u32,
    offset: u32,
    content_height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, scrollbar_width: u32) -> Self {
        Self {
            width,
            height,
            scrollbar_width,
            offset: 0,
            content_height: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn scrollbar_width(&self) -> u32 {
        self.scrollbar_width
    }

    /// Width text may wrap into.
    pub fn available_width(&self) -> u32 {
        self.width.saturating_sub(self.scrollbar_width)
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn range(&self) -> ScrollRange {
        ScrollRange {
            min: 0,
            max: self.content_height.saturating_sub(self.height),
        }
    }

    pub fn set_scrollbar_width(&mut self, scrollbar_width: u32) {
        self.scrollbar_width = scrollbar_width;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.clamp();
    }

    /// Record the latest layout's content height and pull the offset back
    /// into range.
    pub fn set_content_height(&mut self, content_height: u32) {
        self.content_height = content_height;
        self.clamp();
    }

    /// Returns true if the offset changed.
    pub fn scroll_to(&mut self, offset: u32) -> bool {
        let prev = self.offset;
        self.offset = offset.min(self.range().max);
        trace!(target: "model.viewport", from = prev, to = self.offset, "scroll_to");
        prev != self.offset
    }

    pub fn scroll_by(&mut self, delta: i64) -> bool {
        let target = (i64::from(self.offset) + delta).clamp(0, i64::from(u32::MAX));
        self.scroll_to(target as u32)
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Scroll the minimum amount that brings the caret fully into view.
    /// Returns true if the offset changed.
    pub fn snap_to(&mut self, cursor: &CursorBox) -> bool {
        match compute_scroll_intent(self.offset, cursor.y, cursor.height, self.height) {
            Some(offset) => {
                trace!(target: "model.viewport", from = self.offset, to = offset, cursor_y = cursor.y, "snap_to_cursor");
                self.offset = offset;
                true
            }
            None => false,
        }
    }

    fn clamp(&mut self) {
        let max = self.range().max;
        if self.offset > max {
            trace!(target: "model.viewport", from = self.offset, to = max, "offset_clamped");
            self.offset = max;
        }
    }
}

/// New offset that keeps `[top, top + line_height)` inside the window, or
/// `None` when it already is.
///
/// A caret below the window scrolls so its bottom touches the window bottom;
/// a caret above scrolls so its top touches the window top. Zero-height
/// windows never scroll.
pub fn compute_scroll_intent(
    offset: u32,
    top: u32,
    line_height: u32,
    height: u32,
) -> Option<u32> {
    if height == 0 {
        return None;
    }
    let bottom = top + line_height;
    if bottom > offset + height {
        Some(bottom - height)
    } else if top < offset {
        Some(top)
    } else {
        None
    }
}
