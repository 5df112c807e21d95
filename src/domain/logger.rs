//! Debug logging to daily files under the config folder.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use time::macros::format_description;
use time::UtcOffset;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// File name prefix of every log file, e.g. `confighandler.2026-10-16.log`.
const LOG_PREFIX: &str = "confighandler";
const LOG_SUFFIX: &str = "log";

/// Daily files kept before the oldest is removed.
const LOG_FILES_KEPT: usize = 3;

/// Directive used when `RUST_LOG` is unset or invalid.
const DEFAULT_DIRECTIVE: &str = "confighandler=debug";

/// Route `tracing` events to rotating files in `log_dir`.
pub fn init(log_dir: &Path) -> Result<()> {
    let writer = appender(log_dir)?;

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_timer(OffsetTime::new(
            local_offset(),
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        ));

    tracing_subscriber::registry()
        .with(filter())
        .with(file_layer)
        .try_init()
        .context("Failed to install the log subscriber")
}

/// Daily appender that prunes its own old files.
fn appender(log_dir: &Path) -> Result<RollingFileAppender> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix(LOG_SUFFIX)
        .max_log_files(LOG_FILES_KEPT)
        .build(log_dir)
        .with_context(|| format!("Failed to open log files in {}", log_dir.display()))
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Local offset for timestamps, UTC when it cannot be determined.
fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}
