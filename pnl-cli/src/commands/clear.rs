//! Clear command - remove every entry of a month

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;
use pnl_core::LogEvent;

use super::{get_context, get_logger, log_event, resolve_month};
use crate::MonthArgs;

pub fn run(args: MonthArgs, force: bool) -> Result<()> {
    let key = resolve_month(args)?;
    let ctx = get_context()?;
    let logger = get_logger();

    let mut ctl = ctx.controller(key)?;

    // --force answers the prompt with yes
    let cleared = ctl.clear(|prompt| {
        if force {
            return Ok(true);
        }
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    })?;

    if !cleared {
        println!("{}", "Cancelled".dimmed());
        return Ok(());
    }

    log_event(
        &logger,
        LogEvent::new("month_cleared")
            .with_command("clear")
            .with_month(key.storage_key()),
    );
    println!("{} Cleared all entries for {}", "✓".green(), key);

    Ok(())
}
