//! Glyph measurement interface.
//!
//! The editing core never renders text itself; it asks a [`GlyphMetrics`]
//! provider how wide and tall a glyph is for a given font and lays cells out
//! from those numbers. Two providers ship here:
//!
//! * [`MonospaceMetrics`] scales with the font size (advance and line height
//!   given as fractions of an em). Used by tests and benches.
//! * [`TerminalMetrics`] reports terminal cell widths (via `unicode-width`) and a
//!   one-row line height; font size has no effect because a terminal cannot
//!   scale its glyphs.
//!
//! Providers must be deterministic for a given `(glyph, font)` pair.

use unicode_width::UnicodeWidthStr;

/// Font family + size handed to the metrics provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDescriptor {
    pub family: String,
    pub size: u16,
}

impl FontDescriptor {
    pub fn new(family: impl Into<String>, size: u16) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    /// Same family, different size.
    pub fn with_size(&self, size: u16) -> Self {
        Self {
            family: self.family.clone(),
            size,
        }
    }
}

/// Measured extent of a glyph in device units (unrounded).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphSize {
    pub width: f64,
    pub height: f64,
}

pub trait GlyphMetrics {
    /// Measure `glyph`. The empty string stands for a line-break marker and
    /// should report zero width.
    fn measure(&self, glyph: &str, font: &FontDescriptor) -> GlyphSize;

    /// Height of one visual line.
    fn line_height(&self, font: &FontDescriptor) -> f64 {
        self.measure(" ", font).height
    }
}

/// Fixed-advance provider scaled by font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub advance_em: f64,
    pub line_em: f64,
}

impl MonospaceMetrics {
    pub fn new(advance_em: f64, line_em: f64) -> Self {
        Self {
            advance_em,
            line_em,
        }
    }
}

impl GlyphMetrics for MonospaceMetrics {
    fn measure(&self, glyph: &str, font: &FontDescriptor) -> GlyphSize {
        let size = f64::from(font.size);
        GlyphSize {
            width: self.advance_em * size * glyph.width() as f64,
            height: self.line_em * size,
        }
    }
}

/// Terminal cell provider: width in columns, height one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerminalMetrics;

impl GlyphMetrics for TerminalMetrics {
    fn measure(&self, glyph: &str, _font: &FontDescriptor) -> GlyphSize {
        // Control characters such as tab report width 0; give them one column
        // so the cursor can still be placed after them.
        let width = match glyph.width() {
            0 if !glyph.is_empty() => 1,
            w => w,
        };
        GlyphSize {
            width: width as f64,
            height: 1.0,
        }
    }

    fn line_height(&self, _font: &FontDescriptor) -> f64 {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monospace_scales_with_font_size() {
        let m = MonospaceMetrics::new(0.5, 1.2);
        let small = m.measure("a", &FontDescriptor::new("Mono", 10));
        let big = m.measure("a", &FontDescriptor::new("Mono", 20));
        assert_eq!(small.width, 5.0);
        assert_eq!(big.width, 10.0);
        assert_eq!(small.height, 12.0);
        assert_eq!(m.line_height(&FontDescriptor::new("Mono", 20)), 24.0);
    }

    #[test]
    fn empty_glyph_has_no_width() {
        let m = MonospaceMetrics::new(1.0, 1.0);
        assert_eq!(m.measure("", &FontDescriptor::new("Mono", 8)).width, 0.0);
        assert_eq!(TerminalMetrics.measure("", &FontDescriptor::new("x", 8)).width, 0.0);
    }

    #[test]
    fn terminal_metrics_use_cell_widths() {
        let font = FontDescriptor::new("term", 50);
        assert_eq!(TerminalMetrics.measure("a", &font).width, 1.0);
        assert_eq!(TerminalMetrics.measure("漢", &font).width, 2.0);
        assert_eq!(TerminalMetrics.measure("\t", &font).width, 1.0);
        assert_eq!(TerminalMetrics.line_height(&font), 1.0);
    }

    #[test]
    fn with_size_keeps_family() {
        let f = FontDescriptor::new("Verdana", 12).with_size(16);
        assert_eq!(f.family, "Verdana");
        assert_eq!(f.size, 16);
    }
}
