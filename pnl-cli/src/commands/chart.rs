//! Chart command - daily entries of a month as a text chart
//!
//! Each stored day gets one row. Losses extend left of the axis, profits
//! right, scaled to the largest absolute amount in the month.

use anyhow::Result;
use colored::Colorize;
use pnl_core::services::aggregator;
use pnl_core::{ChartSeries, LogEvent};

use super::show::warn_if_corrupt;
use super::{get_context, get_logger, log_event, resolve_month};
use crate::output::{paint_entry, paint_total};
use crate::MonthArgs;

/// Columns on each side of the axis
const HALF_WIDTH: usize = 24;

pub fn run(args: MonthArgs, json: bool) -> Result<()> {
    let key = resolve_month(args)?;
    let ctx = get_context()?;
    let logger = get_logger();

    warn_if_corrupt(&ctx.ledger_store.inspect(key)?, key.storage_key(), &logger, json);

    let ctl = ctx.controller(key)?;
    let state = ctl.state();
    log_event(
        &logger,
        LogEvent::new("chart_rendered")
            .with_command("chart")
            .with_month(key.storage_key()),
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&state.chart)?);
        return Ok(());
    }

    println!("{}", format!("Daily P&L - {}", key).bold());
    println!();

    if state.chart.is_empty() {
        println!("No entries for {}.", key);
        return Ok(());
    }

    for line in render_rows(&state.chart) {
        println!("{}", line);
    }
    println!();
    println!(
        "Total: {}",
        paint_total(&state.summary.display, state.summary.class)
    );

    Ok(())
}

fn render_rows(series: &ChartSeries) -> Vec<String> {
    let max_abs = series
        .range()
        .map(|(lo, hi)| lo.abs().max(hi.abs()))
        .unwrap_or(0.0);

    series
        .points
        .iter()
        .map(|point| {
            let len = bar_length(point.amount, max_abs);
            let class = aggregator::classify_entry(Some(point.amount));
            let bar = "█".repeat(len);
            let (left, right) = if point.amount < 0.0 {
                (format!("{:>width$}", bar, width = HALF_WIDTH), String::new())
            } else {
                (" ".repeat(HALF_WIDTH), bar)
            };
            format!(
                "{:>2} {}│{} {}",
                point.day,
                paint_entry(&left, class),
                paint_entry(&right, class),
                paint_entry(&aggregator::format_amount(point.amount), class)
            )
        })
        .collect()
}

/// Bar length for `amount`; any non-zero amount gets at least one block
fn bar_length(amount: f64, max_abs: f64) -> usize {
    if amount == 0.0 || max_abs == 0.0 || !amount.is_finite() {
        return 0;
    }
    let scaled = (amount.abs() / max_abs * HALF_WIDTH as f64).round() as usize;
    scaled.clamp(1, HALF_WIDTH)
}
