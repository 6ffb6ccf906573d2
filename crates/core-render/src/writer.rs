//! Terminal writer: a short-lived command list per frame.
//!
//! * Commands preserve ordering; nothing is flushed mid-frame.
//! * Positions are absolute with a (0,0) origin.
//! * Reverse video is toggled only at run boundaries and never left on past
//!   the end of a row.

use crate::{CellFlags, Frame};
use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, SetAttribute},
};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    Reverse(bool),
    Print(String),
}

#[derive(Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }

    pub fn reverse(&mut self, on: bool) {
        self.cmds.push(Command::Reverse(on));
    }

    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    /// Translate a whole frame, row-major, one `MoveTo` per row.
    pub fn from_frame(frame: &Frame) -> Self {
        let mut w = Self::new();
        for y in 0..frame.height {
            w.move_to(0, y);
            let mut reversed = false;
            let mut run = String::new();
            for (ch, _, flags, _) in frame.row_leaders(y) {
                let want = flags.contains(CellFlags::REVERSE);
                if want != reversed {
                    w.print(std::mem::take(&mut run));
                    w.reverse(want);
                    reversed = want;
                }
                run.push(ch);
            }
            w.print(run);
            if reversed {
                w.reverse(false);
            }
        }
        w
    }

    pub fn flush_to<W: Write>(self, out: &mut W) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::Reverse(true) => queue!(out, SetAttribute(Attribute::Reverse))?,
                Command::Reverse(false) => queue!(out, SetAttribute(Attribute::NoReverse))?,
                Command::Print(s) => queue!(out, Print(s))?,
            }
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reverse_runs_are_bracketed() {
        let mut f = Frame::new(4, 1);
        for (i, c) in "abcd".chars().enumerate() {
            f.set_glyph(i as u16, 0, c, 1, CellFlags::empty());
        }
        f.apply_flags_span(1, 0, 2, CellFlags::REVERSE);
        let w = Writer::from_frame(&f);
        assert_eq!(
            w.commands(),
            &[
                Command::MoveTo(0, 0),
                Command::Print("a".into()),
                Command::Reverse(true),
                Command::Print("bc".into()),
                Command::Reverse(false),
                Command::Print("d".into()),
            ]
        );
    }

    #[test]
    fn reverse_closed_at_row_end() {
        let mut f = Frame::new(2, 2);
        f.apply_flags_span(0, 1, 2, CellFlags::REVERSE);
        let cmds = Writer::from_frame(&f).cmds;
        assert_eq!(cmds.last(), Some(&Command::Reverse(false)));
    }

    #[test]
    fn continuation_cells_print_nothing() {
        let mut f = Frame::new(3, 1);
        f.set_glyph(0, 0, '語', 2, CellFlags::empty());
        let w = Writer::from_frame(&f);
        assert_eq!(w.commands()[1], Command::Print("語 ".into()));
    }

    #[test]
    fn flush_emits_text() {
        let mut f = Frame::new(2, 1);
        f.set_glyph(0, 0, 'h', 1, CellFlags::empty());
        f.set_glyph(1, 0, 'i', 1, CellFlags::empty());
        let mut out: Vec<u8> = Vec::new();
        Writer::from_frame(&f).flush_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("hi"));
    }
}
