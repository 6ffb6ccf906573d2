//! scribe entrypoint.
use anyhow::Result;
use clap::Parser;
use core_actions::io_ops::open_document;
use core_actions::{EditorSettings, dispatch, translate};
use core_config::{Config, ConfigContext, load_from};
use core_events::InputEvent;
use core_model::{EditorModel, Viewport};
use core_render::{Renderer, STATUS_ROWS};
use core_state::EditorState;
use core_terminal::{CrosstermBackend, TerminalBackend};
use core_text::{FontDescriptor, TerminalMetrics};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{error, info, trace, warn};
use tracing_appender::non_blocking::WorkerGuard;

mod input;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "scribe", version, about = "Proportional-layout text editor")]
struct Args {
    /// File to edit. A missing file starts an empty document bound to this path.
    pub path: PathBuf,
    /// Configuration file path (overrides discovery of `scribe.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

/// Holds the log writer guard; dropping it flushes pending log lines.
struct Logging {
    _guard: Option<WorkerGuard>,
}

fn configure_logging() -> Logging {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("scribe.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "scribe.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
    {
        Ok(_) => Logging {
            _guard: Some(guard),
        },
        // Global subscriber already installed; drop guard so the writer shuts down.
        Err(_) => Logging { _guard: None },
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

/// Session sized to a `cols` x `rows` surface, the bottom rows reserved for
/// status.
fn build_model(config: &mut Config, cols: u16, rows: u16) -> EditorModel {
    let ctx = ConfigContext::new(u32::from(cols), u32::from(rows), u32::from(STATUS_ROWS));
    let scrollbar = config.apply_context(ctx);
    let font = FontDescriptor::new(config.file.font.family.clone(), config.effective_font_size);
    let mut state = EditorState::new(font);
    state.line_ending = config.line_ending();
    let viewport = Viewport::new(u32::from(cols), ctx.text_height(), scrollbar);
    EditorModel::new(state, viewport, Box::new(TerminalMetrics))
}

/// Load `path` into the session. Failures are shown in the status line; the
/// session continues with an empty, unbound document.
fn open_into(model: &mut EditorModel, path: &Path) {
    match open_document(model, path) {
        Ok(cells) => {
            info!(target: "runtime.startup", path = %path.display(), cells, "document_opened");
        }
        Err(e) => {
            error!(target: "runtime.startup", error = %e, "document_open_failed");
            model.state_mut().set_message(format!("Open failed: {e}"));
        }
    }
}

fn clamp_u16(v: u32) -> u16 {
    v.min(u32::from(u16::MAX)) as u16
}

struct Runtime {
    model: EditorModel,
    config: Config,
    settings: EditorSettings,
    renderer: Renderer,
    cols: u16,
    rows: u16,
}

impl Runtime {
    /// `surface` is the terminal size when it could be queried; otherwise the
    /// configured viewport extent is used.
    fn bootstrap(args: &Args, surface: Option<(u16, u16)>) -> Result<Self> {
        let config_override = args.config.is_some();
        let mut config = load_from(args.config.clone())?;
        let (cols, rows) = surface.unwrap_or_else(|| {
            let vp = config.file.viewport;
            warn!(target: "runtime.startup", width = vp.width, height = vp.height, "surface_size_unknown_using_config");
            (clamp_u16(vp.width), clamp_u16(vp.height))
        });
        let mut model = build_model(&mut config, cols, rows);
        open_into(&mut model, &args.path);
        let settings = EditorSettings {
            font_step: config.font_step(),
        };
        info!(
            target: "runtime.startup",
            path = %args.path.display(),
            config_override,
            config_source = ?config.source,
            cols,
            rows,
            scrollbar = config.effective_scrollbar_width,
            font_size = config.effective_font_size,
            "bootstrap_complete"
        );
        Ok(Self {
            model,
            config,
            settings,
            renderer: Renderer::new(),
            cols,
            rows,
        })
    }

    fn text_rows(&self) -> u16 {
        self.rows.saturating_sub(STATUS_ROWS)
    }

    /// Surface resize: re-clamp config against the new size and hand the
    /// session the text-area height.
    fn handle_resize(&mut self, cols: u16, rows: u16) -> InputEvent {
        self.cols = cols;
        self.rows = rows;
        let ctx = ConfigContext::new(u32::from(cols), u32::from(rows), u32::from(STATUS_ROWS));
        if let Some(width) = self.config.recompute_with_context(ctx) {
            self.model.set_scrollbar_width(width);
        }
        InputEvent::Resize(cols, self.text_rows())
    }

    fn render(&mut self) -> Result<()> {
        self.renderer.render(&self.model, self.cols, self.rows)
    }

    fn run(&mut self) -> Result<()> {
        self.render()?;
        loop {
            let raw = crossterm::event::read()?;
            let Some(mut event) = input::convert(raw, self.text_rows()) else {
                continue;
            };
            if let InputEvent::Resize(cols, rows) = event {
                event = self.handle_resize(cols, rows);
            }
            let Some(action) = translate(&event) else {
                trace!(target: "runtime", ?event, "unbound_event");
                continue;
            };
            let result = dispatch(action, &mut self.model, &self.settings);
            if result.quit {
                info!(target: "runtime", "quit_requested");
                return Ok(());
            }
            if result.dirty || matches!(event, InputEvent::Resize(..)) {
                self.render()?;
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _logging = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let mut backend = CrosstermBackend::new();
    let mut runtime = Runtime::bootstrap(&args, backend.size().ok())?;

    backend.set_title("scribe")?;
    let _guard = backend.enter_guard()?;
    let result = runtime.run();
    if let Err(e) = &result {
        error!(target: "runtime", error = %e, "runtime_error");
    }
    info!(target: "runtime.shutdown", frames = runtime.renderer.frames(), "shutdown");
    result
}
