//! ledit entrypoint.
use anyhow::Result;
use clap::Parser;
use core_config::load_from;
use core_events::{EVENT_CHANNEL_CAP, Event, EventSourceRegistry, TickEventSource};
use core_model::EditorModel;
use core_render::CrosstermSink;
use core_state::{DEFAULT_FILE_NAME, LoadOutcome};
use core_terminal::{CrosstermBackend, TerminalBackend};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tokio::sync::mpsc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

mod runtime;

use runtime::{EditorRuntime, RuntimeTasks};

const LOG_FILE_NAME: &str = "ledit.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "ledit", version, about = "Minimal terminal line editor")]
struct Args {
    /// File to edit. Created on first save if it does not exist.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `ledit.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

impl Args {
    fn document_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_NAME))
    }
}

struct AppStartup {
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self { log_guard: None }
    }

    /// Log to a file; the terminal belongs to the editor.
    fn configure_logging(&mut self) {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE_NAME);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        if tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_ansi(false)
            .with_writer(nb_writer)
            .try_init()
            .is_ok()
        {
            self.log_guard = Some(guard);
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
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    startup.configure_logging();
    AppStartup::install_panic_hook();
    info!(target: "runtime", "startup");

    let config = load_from(args.config.clone())?;
    let limits = config.limits();
    let path = args.document_path();
    let (model, outcome) = EditorModel::open(&path, limits);
    info!(
        target: "runtime.startup",
        path = %path.display(),
        new_document = matches!(outcome, LoadOutcome::NewDocument),
        line_count = model.state().buffer().line_count(),
        max_lines = limits.max_lines,
        max_line_len = limits.max_line_len,
        "bootstrap_complete"
    );

    let mut backend = CrosstermBackend::new();
    backend.set_title("ledit")?;
    let guard = backend.enter_guard()?;
    let size = guard.backend().size()?;

    let (tx, mut rx) = mpsc::channel::<Event>(EVENT_CHANNEL_CAP);
    let (input_task, input_shutdown) = core_input::spawn_async_input(tx.clone());
    let mut registry = EventSourceRegistry::new();
    if let Some(interval) = config.autosave_interval() {
        info!(target: "runtime.autosave", interval_secs = interval.as_secs(), "autosave_enabled");
        registry.register(TickEventSource::new(interval));
    }
    let source_handles = registry.spawn_all(&tx);
    let mut tasks = RuntimeTasks::new(tx, input_task, input_shutdown, source_handles);

    let mut runtime = EditorRuntime::new(model, CrosstermSink::stdout(), size);
    let reason = runtime.run(&mut rx).await;
    rx.close();
    tasks.finalize_shutdown(reason).await;

    guard.release()?;
    info!(target: "runtime", reason = reason.as_str(), "exit");
    Ok(())
}
