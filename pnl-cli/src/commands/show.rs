//! Show command - render a month as a calendar grid

use anyhow::Result;
use colored::Colorize;
use comfy_table::{Cell, CellAlignment};
use pnl_core::services::StoredLedger;
use pnl_core::{CalendarState, LogEvent, LoggingService};

use super::{get_context, get_logger, log_event, resolve_month};
use crate::output::{self, class_cell, create_table, paint_total};
use crate::MonthArgs;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn run(args: MonthArgs, json: bool) -> Result<()> {
    let key = resolve_month(args)?;
    let ctx = get_context()?;
    let logger = get_logger();

    warn_if_corrupt(&ctx.ledger_store.inspect(key)?, key.storage_key(), &logger, json);

    let ctl = ctx.controller(key)?;
    log_event(
        &logger,
        LogEvent::new("calendar_generated")
            .with_command("show")
            .with_month(key.storage_key()),
    );

    if json {
        println!("{}", serde_json::to_string_pretty(ctl.state())?);
        return Ok(());
    }

    print_calendar(ctl.state());
    Ok(())
}

/// Log and mention a stored value that could not be read; it shows as empty
pub(crate) fn warn_if_corrupt(
    stored: &StoredLedger,
    month_key: String,
    logger: &Option<LoggingService>,
    quiet: bool,
) {
    if let StoredLedger::Corrupt(error) = stored {
        log_event(
            logger,
            LogEvent::new("ledger_parse_failed")
                .with_month(month_key.as_str())
                .with_error(error.as_str()),
        );
        if !quiet {
            output::warning(&format!(
                "Stored data for {} is unreadable and shows as empty (see 'pnl doctor')",
                month_key
            ));
        }
    }
}

pub(crate) fn print_calendar(state: &CalendarState) {
    println!("{}", state.key.to_string().bold());
    println!();

    let mut table = create_table();
    table.set_header(WEEKDAYS.iter().map(|d| Cell::new(d).set_alignment(CellAlignment::Center)));

    for week in &state.grid.weeks {
        let row: Vec<Cell> = week
            .iter()
            .map(|cell| match cell.day {
                None => Cell::new(""),
                Some(day) => class_cell(format!("{:>2}\n{}", day, cell.input), cell.class)
                    .set_alignment(CellAlignment::Right),
            })
            .collect();
        table.add_row(row);
    }

    println!("{}", table);
    println!();
    println!(
        "Total: {}",
        paint_total(&state.summary.display, state.summary.class)
    );
}
