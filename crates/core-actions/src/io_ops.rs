//! File IO helpers shared by the dispatcher (save) and the binary (open).
//!
//! Synchronous and whole-file. Loading feeds characters through the unrecorded
//! insert path so `\r\n`, `\r` and `\n` each become one line-break cell that
//! remembers its terminator; saving writes those terminators back verbatim.

use core_model::EditorModel;
use core_state::EditorState;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, warn};

#[derive(Debug, Error)]
pub enum IoError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no file name")]
    NoFileName,
}

/// Read `path` as text. A missing file is an empty document; invalid UTF-8
/// sequences become U+FFFD so the file still opens bound to its path.
pub fn load_document(path: &Path) -> Result<String, IoError> {
    match std::fs::read(path) {
        Ok(bytes) => {
            let content = match String::from_utf8(bytes) {
                Ok(content) => content,
                Err(e) => {
                    warn!(target: "io", path = %path.display(), valid_up_to = e.utf8_error().valid_up_to(), "file_decoded_lossy");
                    String::from_utf8_lossy(e.as_bytes()).into_owned()
                }
            };
            debug!(target: "io", path = %path.display(), bytes = content.len(), "file_read");
            Ok(content)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(target: "io", path = %path.display(), "file_missing_new_document");
            Ok(String::new())
        }
        Err(source) => {
            error!(target: "io", path = %path.display(), error = %source, "file_open_error");
            Err(IoError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Load `path` into the session and bind it as the save target. Returns the
/// number of cells loaded.
pub fn open_document(model: &mut EditorModel, path: &Path) -> Result<usize, IoError> {
    let content = load_document(path)?;
    model.load_text(&content);
    model.state_mut().file_name = Some(path.to_path_buf());
    Ok(model.state().document.len())
}

/// Write the document to its bound path and mark it clean.
pub fn save_document(state: &mut EditorState) -> Result<PathBuf, IoError> {
    let Some(path) = state.file_name.clone() else {
        return Err(IoError::NoFileName);
    };
    let content = state.document.serialize();
    match std::fs::write(&path, content.as_bytes()) {
        Ok(()) => {
            debug!(target: "io", path = %path.display(), bytes = content.len(), "file_written");
            state.dirty = false;
            Ok(path)
        }
        Err(source) => {
            error!(target: "io", path = %path.display(), error = %source, "file_write_error");
            Err(IoError::Write { path, source })
        }
    }
}
