//! CLI command implementations

pub mod chart;
pub mod clear;
pub mod demo;
pub mod doctor;
pub mod logs;
pub mod months;
pub mod set;
pub mod show;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Local};
use pnl_core::{LogEvent, LoggingService, MonthKey, PnlContext};

use crate::MonthArgs;

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let pnl_dir = get_pnl_dir().ok()?;
    std::fs::create_dir_all(&pnl_dir).ok()?;
    LoggingService::new(&pnl_dir, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Record a failed command; only the error text is kept
pub fn log_failure(command: &str, error: &anyhow::Error) {
    log_event(
        &get_logger(),
        LogEvent::new("command_failed")
            .with_command(command)
            .with_error(error.to_string())
            .with_error_details(format!("{:#}", error)),
    );
}

/// Get the data directory from environment or default
pub fn get_pnl_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("PNL_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".pnl"))
        .ok_or_else(|| anyhow!("Could not find home directory; set PNL_DIR"))
}

/// Get or create the calendar context
pub fn get_context() -> Result<PnlContext> {
    let pnl_dir = get_pnl_dir()?;

    std::fs::create_dir_all(&pnl_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", pnl_dir))?;

    PnlContext::new(&pnl_dir).context("Failed to initialize calendar context")
}

/// Resolve `--month`/`--year`, defaulting to today's month and year
///
/// The flag takes a human month number (1-12); keys use 0-11.
pub fn resolve_month(args: MonthArgs) -> Result<MonthKey> {
    let today = Local::now().date_naive();
    let year = args.year.unwrap_or_else(|| today.year());
    let month = match args.month {
        Some(m @ 1..=12) => m - 1,
        Some(m) => return Err(anyhow!("Month must be between 1 and 12, got {}", m)),
        None => today.month0(),
    };
    Ok(MonthKey::new(year, month)?)
}
