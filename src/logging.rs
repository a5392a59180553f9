//! Logging configuration using tracing
//!
//! The terminal UI owns stdout, so diagnostics go to a daily rolling file under
//! `<data_local_dir>/filter-toggle/logs/`. The level is controlled by the
//! `FILTER_TOGGLE_LOG` environment variable, e.g. `FILTER_TOGGLE_LOG=debug`.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const ENV_VAR: &str = "FILTER_TOGGLE_LOG";
const DEFAULT_FILTER: &str = "filter_toggle=info,warn";

pub fn init() -> Result<PathBuf> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Unable to create log directory {}", log_dir.display()))?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "filter-toggle.log");

    let env_filter =
        EnvFilter::try_from_env(ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

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
        .context("Failed to install tracing subscriber")?;

    tracing::info!("filter-toggle starting, logs in {}", log_dir.display());
    Ok(log_dir)
}

fn log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("filter-toggle").join("logs")
}
