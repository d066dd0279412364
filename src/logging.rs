//! Logging configuration using tracing with file appender.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Log file used when none is given on the command line.
pub const DEFAULT_LOG_FILE: &str = "pixstyle.log";

/// Filter directive for the crate at `level`, falling back to `info` when
/// `level` does not parse.
pub fn filter_for(level: Option<&str>) -> EnvFilter {
    let level = level.unwrap_or("info");
    EnvFilter::try_new(format!("pixstyle={level}")).unwrap_or_else(|_| EnvFilter::new("pixstyle=info"))
}

/// Initialize tracing with file output.
///
/// The terminal belongs to the TUI, so nothing is written to stdout or
/// stderr. Hold the returned guard until exit; dropping it flushes.
///
/// Debug builds also record span enter/close events.
pub fn init_logging(log_path: Option<&Path>, level: Option<&str>) -> WorkerGuard {
    let log_path = log_path.unwrap_or(Path::new(DEFAULT_LOG_FILE));

    let parent = log_path.parent().unwrap_or(Path::new("."));
    let filename = log_path
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new(DEFAULT_LOG_FILE));

    let file_appender = tracing_appender::rolling::never(parent, filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false);

    #[cfg(debug_assertions)]
    let file_layer = {
        use tracing_subscriber::fmt::format::FmtSpan;
        file_layer.with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE)
    };

    tracing_subscriber::registry()
        .with(filter_for(level))
        .with(file_layer)
        .init();

    guard
}
