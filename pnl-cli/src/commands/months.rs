//! Months command - list every month with stored entries

use anyhow::Result;
use colored::Colorize;
use comfy_table::Cell;

use super::get_context;
use crate::output::{class_cell, create_table, paint_total};

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let status = ctx.status_service.get_status()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    if status.months.is_empty() {
        println!("No entries stored yet. Try 'pnl set <day> <amount>'.");
        return Ok(());
    }

    println!("{}", "Stored Months".bold());
    println!();

    let mut table = create_table();
    table.set_header(vec!["Month", "Entries", "Profit days", "Loss days", "Total"]);

    for month in &status.months {
        table.add_row(vec![
            Cell::new(&month.label),
            Cell::new(month.entries),
            Cell::new(month.profit_days),
            Cell::new(month.loss_days),
            class_cell(month.display.as_str(), month.class),
        ]);
    }

    println!("{}", table);
    println!();
    println!(
        "{} month(s), overall {}",
        status.total_months,
        paint_total(&status.grand_total_display, status.grand_total_class)
    );

    Ok(())
}
