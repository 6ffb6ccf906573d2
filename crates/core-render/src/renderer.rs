//! Session renderer: compose, translate and flush one full frame.

use crate::{Frame, StatusContext, build_status, compose, writer::Writer};
use anyhow::Result;
use core_model::EditorModel;
use std::io::{Write, stdout};
use std::time::Instant;
use tracing::trace;

#[derive(Debug, Default)]
pub struct Renderer {
    frames: u64,
}

impl Renderer {
    pub fn new() -> Self {
        Self { frames: 0 }
    }

    /// Frames painted so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Build the grid for a `cols` x `rows` surface without emitting anything.
    pub fn compose(&self, model: &EditorModel, cols: u16, rows: u16) -> Frame {
        let status = build_status(&StatusContext::from_state(model.state()));
        compose(&model.frame(), &status, cols, rows)
    }

    pub fn render_to<W: Write>(
        &mut self,
        model: &EditorModel,
        cols: u16,
        rows: u16,
        out: &mut W,
    ) -> Result<()> {
        let start = Instant::now();
        let frame = self.compose(model, cols, rows);
        Writer::from_frame(&frame).flush_to(out)?;
        self.frames += 1;
        trace!(
            target: "render",
            frame = self.frames,
            cols,
            rows,
            elapsed_us = start.elapsed().as_micros() as u64,
            "frame_painted"
        );
        Ok(())
    }

    pub fn render(&mut self, model: &EditorModel, cols: u16, rows: u16) -> Result<()> {
        let mut out = stdout().lock();
        self.render_to(model, cols, rows, &mut out)
    }
}
