//! Configuration loading and parsing.
//!
//! Parses `scribe.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [font]
//! family = "Verdana"
//! size = 12
//! step = 4
//! [viewport]
//! width = 500
//! height = 500
//! scrollbar = 1
//! [editor]
//! line_ending = "lf"
//! ```
//!
//! Every field is optional. Missing or unparsable files fall back to the
//! defaults above. Unknown fields are ignored.
//!
//! Raw values are kept as parsed; `Config::apply_context` derives the
//! effective ones against the current viewport so a later resize can
//! re-clamp.

use anyhow::Result;
use core_text::LineEnding;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

/// Surface dimensions the effective values are clamped against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigContext {
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub status_rows: u32,
}

impl ConfigContext {
    pub fn new(viewport_width: u32, viewport_height: u32, status_rows: u32) -> Self {
        Self {
            viewport_width,
            viewport_height,
            status_rows,
        }
    }

    /// Height left for text once the status line is reserved.
    pub fn text_height(&self) -> u32 {
        self.viewport_height.saturating_sub(self.status_rows)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FontConfig {
    #[serde(default = "FontConfig::default_family")]
    pub family: String,
    #[serde(default = "FontConfig::default_size")]
    pub size: u16,
    #[serde(default = "FontConfig::default_step")]
    pub step: u16,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: Self::default_family(),
            size: Self::default_size(),
            step: Self::default_step(),
        }
    }
}

impl FontConfig {
    fn default_family() -> String {
        "Verdana".to_string()
    }
    const fn default_size() -> u16 {
        12
    }
    const fn default_step() -> u16 {
        4
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ViewportConfig {
    #[serde(default = "ViewportConfig::default_extent")]
    pub width: u32,
    #[serde(default = "ViewportConfig::default_extent")]
    pub height: u32,
    #[serde(default = "ViewportConfig::default_scrollbar")]
    pub scrollbar: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: Self::default_extent(),
            height: Self::default_extent(),
            scrollbar: Self::default_scrollbar(),
        }
    }
}

impl ViewportConfig {
    const fn default_extent() -> u32 {
        500
    }
    const fn default_scrollbar() -> u32 {
        1
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_line_ending")]
    pub line_ending: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            line_ending: Self::default_line_ending(),
        }
    }
}

impl EditorConfig {
    fn default_line_ending() -> String {
        "lf".to_string()
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub font: FontConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub editor: EditorConfig,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// File the values were parsed from; `None` when defaults are in effect.
    pub source: Option<PathBuf>,
    pub file: ConfigFile,    // parsed (or default) data
    pub effective_scrollbar_width: u32,
    pub effective_font_size: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_file(None, ConfigFile::default())
    }
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("scribe.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("scribe").join("scribe.toml");
    }
    PathBuf::from("scribe.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    if let Ok(content) = fs::read_to_string(&path) {
        match toml::from_str::<ConfigFile>(&content) {
            Ok(file) => Ok(Config::from_file(Some(path), file)),
            Err(e) => {
                warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
                Ok(Config::default())
            }
        }
    } else {
        Ok(Config::default())
    }
}

impl Config {
    fn from_file(source: Option<PathBuf>, file: ConfigFile) -> Self {
        let effective_scrollbar_width = file.viewport.scrollbar;
        let effective_font_size = file.font.size.max(1);
        Self {
            source,
            file,
            effective_scrollbar_width,
            effective_font_size,
        }
    }

    /// Terminator typed by Enter. Unknown names fall back to `Lf`.
    pub fn line_ending(&self) -> LineEnding {
        let name = self.file.editor.line_ending.as_str();
        LineEnding::from_name(name).unwrap_or_else(|| {
            warn!(target: "config", name, "unknown_line_ending_using_lf");
            LineEnding::Lf
        })
    }

    pub fn font_step(&self) -> u16 {
        self.file.font.step
    }

    /// Clamp the scrollbar reserve so at least one unit of text width
    /// remains, and the font size to at least 1. Returns the effective
    /// scrollbar width.
    pub fn apply_context(&mut self, ctx: ConfigContext) -> u32 {
        let raw = self.file.viewport.scrollbar;
        let max = ctx.viewport_width.saturating_sub(1);
        let clamped = raw.min(max);
        if clamped != raw {
            info!(
                target: "config",
                raw,
                clamped,
                max,
                viewport_width = ctx.viewport_width,
                text_height = ctx.text_height(),
                status_rows = ctx.status_rows,
                "scrollbar_width_clamped"
            );
        }
        self.effective_scrollbar_width = clamped;

        let size = self.file.font.size;
        if size == 0 {
            info!(target: "config", raw = size, clamped = 1, "font_size_clamped");
        }
        self.effective_font_size = size.max(1);
        clamped
    }

    /// Recompute after a viewport change. Returns `Some(new_width)` when the
    /// effective scrollbar width changed, else `None`.
    pub fn recompute_with_context(&mut self, ctx: ConfigContext) -> Option<u32> {
        let prev = self.effective_scrollbar_width;
        let current = self.apply_context(ctx);
        if current != prev { Some(current) } else { None }
    }
}
