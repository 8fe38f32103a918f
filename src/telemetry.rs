use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use indicatif::ProgressBar;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::Layer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// File that collects every error logged by the CLI
pub const ERROR_LOG_FILE: &str = "cli_errors.log";

/// Stderr writer that clears the active progress bar while a line is written
#[derive(Clone, Default)]
pub struct ConsoleWriter {
    progress: Arc<Mutex<Option<ProgressBar>>>,
}

impl ConsoleWriter {
    /// Route console output around `bar` from now on
    pub fn attach(&self, bar: &ProgressBar) {
        if let Ok(mut progress) = self.progress.lock() {
            *progress = Some(bar.clone());
        }
    }

    fn active(&self) -> Option<ProgressBar> {
        self.progress.lock().ok().and_then(|progress| progress.clone())
    }
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.active() {
            Some(bar) => bar.suspend(|| io::stderr().write(buf)),
            None => io::stderr().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

impl<'a> MakeWriter<'a> for ConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

// Initialize tracing-subscriber and return the guard that flushes the error log on drop
pub fn init_tracing_subscriber(
    log_dir: &Path,
    console: ConsoleWriter,
) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::never(log_dir, ERROR_LOG_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(LevelFilter::ERROR);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(console)
        .with_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        );

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
