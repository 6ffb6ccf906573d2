//! Document storage and glyph measurement for the editing core.
//!
//! * `document` - arena-backed circular list of character cells anchored at a
//!   sentinel, with insert/remove/reinsert primitives driven by a cursor handle.
//! * `metrics` - the glyph measurement interface consumed by layout.
//! * `motion` - left/right cursor movement (order-only, no layout needed).

pub mod document;
pub mod metrics;
pub mod motion;

pub use document::{CellContent, CellId, Cells, Document, LineEnding, contents_from_str};
pub use metrics::{FontDescriptor, GlyphMetrics, GlyphSize, MonospaceMetrics, TerminalMetrics};
