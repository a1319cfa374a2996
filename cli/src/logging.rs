//! Logging initialization for the `weft` binary.
//!
//! - **RUST_LOG**: filter, e.g. `info`, `weft=debug`. Default: `info`.
//! - **LOG_FILE**: when set, logs are appended to that file (plain text, no ANSI)
//!   through a non-blocking writer.
//! - Otherwise logs go to stderr with `--verbose` and are dropped without it, so
//!   stdout carries only the answer.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Installs the global subscriber. Keep the returned guard alive until exit so
/// buffered file logs are flushed.
pub fn init(verbose: bool) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Ok(path) = std::env::var("LOG_FILE") {
        let path = Path::new(&path);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().ok_or("LOG_FILE has no file name")?;
        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_filter(filter),
            )
            .try_init()?;
        tracing::info!(path = %path.display(), "weft logging to file");
        return Ok(Some(guard));
    }

    if verbose {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_filter(filter),
            )
            .try_init()?;
    }
    Ok(None)
}
