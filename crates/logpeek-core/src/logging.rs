//! File logging for logpeek sessions
//!
//! stdout carries the rendered log view, so diagnostics go to a daily
//! rotating file instead:
//!
//! ```text
//! $LOGPEEK_LOG_DIR/                     (or <data_local_dir>/logpeek/logs/)
//!     logpeek.2024-05-01.log
//!     logpeek.2024-05-02.log            (at most MAX_LOG_FILES kept)
//! ```

use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, Result};

/// Environment variable controlling the log filter
pub const LOG_ENV_VAR: &str = "LOGPEEK_LOG";

/// Environment variable overriding the log directory
pub const LOG_DIR_ENV_VAR: &str = "LOGPEEK_LOG_DIR";

const DEFAULT_FILTER: &str = "logpeek=info,warn";
const MAX_LOG_FILES: usize = 7;

/// Install the global subscriber writing to the session log file
///
/// # Examples
/// ```bash
/// LOGPEEK_LOG=debug logpeek app.log
/// LOGPEEK_LOG=logpeek_core=trace logpeek app.log --expand down-76
/// LOGPEEK_LOG_DIR=/tmp/peek logpeek app.log
/// ```
pub fn init() -> Result<PathBuf> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("logpeek")
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(&log_dir)
        .map_err(|e| Error::logging(format!("cannot log to {}: {e}", log_dir.display())))?;

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init()
        .map_err(|e| Error::logging(format!("logging already initialized: {e}")))?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        pid = std::process::id(),
        "logpeek session started"
    );

    Ok(log_dir)
}

/// Directory the session log files are written to
pub fn log_directory() -> PathBuf {
    resolve_log_directory(
        std::env::var_os(LOG_DIR_ENV_VAR).map(PathBuf::from),
        dirs::data_local_dir().as_deref(),
    )
}

fn resolve_log_directory(override_dir: Option<PathBuf>, data_dir: Option<&Path>) -> PathBuf {
    match override_dir {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => data_dir
            .unwrap_or_else(|| Path::new("."))
            .join("logpeek")
            .join("logs"),
    }
}
