//! Set command - record one day's P&L

use anyhow::Result;
use colored::Colorize;
use pnl_core::services::aggregator;
use pnl_core::LogEvent;

use super::{get_context, get_logger, log_event, resolve_month};
use crate::output::{paint_entry, paint_total};
use crate::MonthArgs;

pub fn run(day: u32, amount: &str, args: MonthArgs, json: bool) -> Result<()> {
    let key = resolve_month(args)?;
    let ctx = get_context()?;
    let logger = get_logger();

    let mut ctl = ctx.controller(key)?;
    let state = ctl.edit_entry(day, amount)?;

    log_event(
        &logger,
        LogEvent::new("entry_saved")
            .with_command("set")
            .with_month(key.storage_key()),
    );

    let stored = aggregator::coerce_amount(amount);
    let entry_class = aggregator::classify_entry(aggregator::parse_amount(amount));

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "month": key.storage_key(),
                "day": day,
                "input": amount,
                "stored": stored,
                "class": entry_class,
                "summary": state.summary,
            }))?
        );
        return Ok(());
    }

    if aggregator::parse_amount(amount).is_none() {
        println!(
            "{}",
            format!("'{}' is not a number; stored as 0", amount).yellow()
        );
    }

    println!(
        "{} {} {}: {}",
        "✓".green(),
        key,
        format!("day {}", day).bold(),
        paint_entry(&aggregator::format_amount(stored), entry_class)
    );
    println!(
        "Total: {}",
        paint_total(&state.summary.display, state.summary.class)
    );

    Ok(())
}
