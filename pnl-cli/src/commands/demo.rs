//! Demo command - manage demo mode

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::{get_logger, get_pnl_dir, log_event};
use pnl_core::services::DemoService;
use pnl_core::LogEvent;

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Enable demo mode
    #[command(name = "on")]
    On,
    /// Disable demo mode
    #[command(name = "off")]
    Off {
        /// Also delete the demo database
        #[arg(long)]
        clean: bool,
    },
    /// Show demo mode status
    Status,
}

pub fn run(command: Option<DemoCommands>) -> Result<()> {
    let pnl_dir = get_pnl_dir()?;
    std::fs::create_dir_all(&pnl_dir)?;
    let demo_service = DemoService::new(&pnl_dir);

    match command {
        Some(DemoCommands::On) => {
            let months = demo_service.enable()?;
            log_event(&get_logger(), LogEvent::new("demo_enabled").with_command("demo"));
            println!("{}", "Demo mode enabled".green());
            println!(
                "Seeded {} month(s) of sample entries. Run 'pnl months' to see them.",
                months
            );
        }
        Some(DemoCommands::Off { clean }) => {
            demo_service.disable(clean)?;
            log_event(&get_logger(), LogEvent::new("demo_disabled").with_command("demo"));
            println!("{}", "Demo mode disabled".yellow());
        }
        Some(DemoCommands::Status) | None => {
            if demo_service.is_enabled()? {
                println!("Demo mode is {}", "ON".green());
            } else {
                println!("Demo mode is {}", "OFF".yellow());
            }
        }
    }

    Ok(())
}
