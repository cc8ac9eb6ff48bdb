//! Doctor command - check stored ledgers for damage

use anyhow::Result;
use colored::Colorize;
use comfy_table::{Cell, Color};
use serde_json::Value;

use super::{get_context, get_logger, log_event};
use crate::output::create_table;
use pnl_core::LogEvent;

/// Format a detail JSON value for display
fn format_detail(value: &Value) -> String {
    match value {
        Value::Object(map) => map
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| {
                let display_val = match v {
                    Value::String(s) if s.chars().count() > 60 => {
                        format!("{}...", s.chars().take(57).collect::<String>())
                    }
                    Value::String(s) => s.clone(),
                    Value::Array(arr) => arr
                        .iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(" "),
                    _ => v.to_string(),
                };
                format!("{}: {}", k, display_val)
            })
            .collect::<Vec<_>>()
            .join(", "),
        Value::String(s) => s.clone(),
        _ => value.to_string(),
    }
}

pub fn run(verbose: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let result = ctx.doctor_service.run_checks()?;

    log_event(
        &get_logger(),
        LogEvent::new("doctor_run").with_command("doctor"),
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", "Ledger Health Check".bold());
        println!();

        let mut table = create_table();
        table.set_header(vec!["Check", "Status", "Message"]);

        for (check_name, check_result) in &result.checks {
            let status_cell = match check_result.status.as_str() {
                "pass" => Cell::new("PASS").fg(Color::Green),
                "warning" => Cell::new("WARN").fg(Color::Yellow),
                "error" => Cell::new("ERROR").fg(Color::Red),
                _ => Cell::new(&check_result.status),
            };

            table.add_row(vec![
                Cell::new(check_name),
                status_cell,
                Cell::new(&check_result.message),
            ]);

            if verbose {
                if let Some(details) = &check_result.details {
                    for detail in details {
                        table.add_row(vec![
                            Cell::new(""),
                            Cell::new(""),
                            Cell::new(format!("  - {}", format_detail(detail))),
                        ]);
                    }
                }
            }
        }

        println!("{}", table);
        println!();

        println!(
            "Summary: {} passed, {} warnings, {} errors",
            result.summary.passed.to_string().green(),
            result.summary.warnings.to_string().yellow(),
            result.summary.errors.to_string().red(),
        );
    }

    if result.summary.errors > 0 {
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_detail() {
        let detail = json!({ "month": "pnl_2023_1", "days": [30, 31] });
        assert_eq!(format_detail(&detail), "days: 30 31, month: pnl_2023_1");
        assert_eq!(format_detail(&json!("plain")), "plain");
    }
}
