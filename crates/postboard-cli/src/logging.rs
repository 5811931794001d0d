//! Tracing subscriber setup.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use postboard_core::config::{LOG_ENV, LogConfig};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// Filter directives come from `POSTBOARD_LOG`, else `[log] level`. Output
/// goes to stderr unless `[log] file` is set. The returned guard must be
/// held until exit so buffered file output is flushed.
pub fn init(log: &LogConfig) -> Result<Option<WorkerGuard>> {
    let directives = std::env::var(LOG_ENV).unwrap_or_else(|_| log.level.clone());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("warn"));

    let Some(file) = log.file.as_deref().filter(|f| !f.trim().is_empty()) else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
        return Ok(None);
    };

    let path = Path::new(file);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .with_context(|| format!("log file path has no file name: {file}"))?;
    fs::create_dir_all(dir)
        .with_context(|| format!("create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(writer)
        .try_init();
    Ok(Some(guard))
}
