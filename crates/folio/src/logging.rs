//! Log setup. The terminal belongs to the UI, so logs only go to a file.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "FOLIO_LOG";

/// Build the filter: `FOLIO_LOG` if set and valid, else `fallback`.
pub fn filter_from(env_value: Option<&str>, fallback: &str) -> EnvFilter {
    env_value
        .and_then(|v| EnvFilter::try_new(v).ok())
        .or_else(|| EnvFilter::try_new(fallback).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

/// Initialize tracing with a daily rolling file in `log_dir`.
///
/// Without a directory nothing is recorded. The returned guard flushes the
/// writer on drop and must be held for the life of the program.
pub fn init_logging(log_dir: Option<&Path>, filter: EnvFilter) -> Option<WorkerGuard> {
    let dir = log_dir?;
    if std::fs::create_dir_all(dir).is_err() {
        return None;
    }
    let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, "folio.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .ok()?;
    Some(guard)
}
