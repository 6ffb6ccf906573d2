//! Status line composition.
//!
//! Format: `<name>[*] | <size>pt | undo <n> redo <m>[ | <message>]`.
//! * `<name>` is the base file name or `[No Name]` when nothing is bound.
//! * `*` appears only when the document is dirty.
//!
//! Two stages: `compose_status` yields ordered segments and `format_status`
//! joins them.

use core_state::EditorState;
use std::borrow::Cow;
use std::path::Path;

pub struct StatusContext<'a> {
    pub file_name: Option<&'a Path>,
    pub dirty: bool,
    pub font_size: u16,
    pub undo_depth: usize,
    pub redo_depth: usize,
    pub message: Option<&'a str>,
}

impl<'a> StatusContext<'a> {
    pub fn from_state(state: &'a EditorState) -> Self {
        Self {
            file_name: state.file_name.as_deref(),
            dirty: state.dirty,
            font_size: state.font.size,
            undo_depth: state.history().undo_depth(),
            redo_depth: state.history().redo_depth(),
            message: state.message.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    /// Base name plus dirty marker.
    FileName(Cow<'a, str>),
    FontSize(u16),
    History { undo: usize, redo: usize },
    Message(&'a str),
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let name = ctx
        .file_name
        .and_then(|p| p.file_name())
        .and_then(|s| s.to_str())
        .unwrap_or("[No Name]");
    let file = if ctx.dirty {
        Cow::Owned(format!("{name}*"))
    } else {
        Cow::Owned(name.to_string())
    };
    let mut out = Vec::with_capacity(4);
    out.push(StatusSegment::FileName(file));
    out.push(StatusSegment::FontSize(ctx.font_size));
    out.push(StatusSegment::History {
        undo: ctx.undo_depth,
        redo: ctx.redo_depth,
    });
    if let Some(msg) = ctx.message.filter(|m| !m.is_empty()) {
        out.push(StatusSegment::Message(msg));
    }
    out
}

pub fn format_status(segments: &[StatusSegment<'_>]) -> String {
    use std::fmt::Write as _;
    let mut s = String::with_capacity(48);
    for (i, seg) in segments.iter().enumerate() {
        if i > 0 {
            s.push_str(" | ");
        }
        let _ = match seg {
            StatusSegment::FileName(name) => write!(s, "{name}"),
            StatusSegment::FontSize(size) => write!(s, "{size}pt"),
            StatusSegment::History { undo, redo } => write!(s, "undo {undo} redo {redo}"),
            StatusSegment::Message(msg) => write!(s, "{msg}"),
        };
    }
    s
}

pub fn build_status(ctx: &StatusContext) -> String {
    format_status(&compose_status(ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::{CellContent, FontDescriptor};

    fn ctx<'a>() -> StatusContext<'a> {
        StatusContext {
            file_name: None,
            dirty: false,
            font_size: 12,
            undo_depth: 0,
            redo_depth: 0,
            message: None,
        }
    }

    #[test]
    fn unnamed_clean() {
        assert_eq!(build_status(&ctx()), "[No Name] | 12pt | undo 0 redo 0");
    }

    #[test]
    fn named_dirty_with_message() {
        let c = StatusContext {
            file_name: Some(Path::new("/tmp/notes.txt")),
            dirty: true,
            undo_depth: 3,
            redo_depth: 1,
            message: Some("Saved notes.txt"),
            ..ctx()
        };
        assert_eq!(
            build_status(&c),
            "notes.txt* | 12pt | undo 3 redo 1 | Saved notes.txt"
        );
    }

    #[test]
    fn empty_message_is_omitted() {
        let c = StatusContext {
            message: Some(""),
            ..ctx()
        };
        assert_eq!(compose_status(&c).len(), 3);
    }

    #[test]
    fn from_state_reads_history_and_font() {
        let mut state = EditorState::new(FontDescriptor::new("Mono", 16));
        state.insert(CellContent::Glyph('a'));
        state.insert(CellContent::Glyph('b'));
        state.undo();
        state.set_message("hello");
        let c = StatusContext::from_state(&state);
        assert_eq!(build_status(&c), "[No Name]* | 16pt | undo 1 redo 1 | hello");
    }
}
