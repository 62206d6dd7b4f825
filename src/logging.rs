//! Tracing subscriber setup.
//!
//! Interactive sessions log to a daily rolling file so the menu stays
//! readable; one-shot commands log to stderr.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "FILETREK_LOG";

pub enum LogTarget {
    Stderr,
    /// A directory gets a daily rolling `filetrek.log`; a file path is
    /// appended to as-is.
    Dir(PathBuf),
    File(PathBuf),
}

/// Filter from `FILETREK_LOG`, then `RUST_LOG`, then `default`.
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber. Keep the returned guard alive until exit
/// so buffered file output is flushed.
pub fn init_logging(target: LogTarget, verbose: bool) -> anyhow::Result<Option<WorkerGuard>> {
    // Route `log` records from dependencies into tracing.
    let _ = tracing_log::LogTracer::init();

    let (appender, guard) = match target {
        LogTarget::Stderr => {
            let filter = env_filter(if verbose { "debug" } else { "warn" });
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init();
            return Ok(None);
        }
        LogTarget::Dir(dir) => {
            std::fs::create_dir_all(&dir).with_context(|| format!("creating log directory {}", dir.display()))?;
            tracing_appender::non_blocking(tracing_appender::rolling::daily(&dir, "filetrek.log"))
        }
        LogTarget::File(file) => {
            let dir = file.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            std::fs::create_dir_all(dir).with_context(|| format!("creating log directory {}", dir.display()))?;
            let name = file
                .file_name()
                .with_context(|| format!("log file has no name: {}", file.display()))?;
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name))
        }
    };
    let filter = env_filter(if verbose { "debug" } else { "info" });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(appender)
        .with_ansi(false)
        .try_init();
    Ok(Some(guard))
}
