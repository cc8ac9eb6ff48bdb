//! P&L Calendar CLI - daily profit and loss in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

mod commands;
mod output;

use commands::{chart, clear, demo, doctor, logs, months, set, show};

/// pnl - a daily profit and loss calendar in your terminal
#[derive(Parser)]
#[command(name = "pnl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Month selection shared by the calendar commands
#[derive(Args, Clone, Copy)]
pub struct MonthArgs {
    /// Month number, 1-12 (defaults to the current month)
    #[arg(long, short)]
    month: Option<u32>,
    /// Four-digit year (defaults to the current year)
    #[arg(long, short)]
    year: Option<i32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the calendar, total and colors for a month
    Show {
        #[command(flatten)]
        month: MonthArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record the P&L for one day
    Set {
        /// Day of the month
        day: u32,
        /// Amount as typed; non-numeric input is stored as 0
        #[arg(allow_hyphen_values = true)]
        amount: String,
        #[command(flatten)]
        month: MonthArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Clear every entry of a month
    Clear {
        #[command(flatten)]
        month: MonthArgs,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Chart the daily entries of a month
    Chart {
        #[command(flatten)]
        month: MonthArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every month with stored entries
    Months {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check stored ledgers for damage
    Doctor {
        /// Show verbose output
        #[arg(long, short)]
        verbose: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage demo mode
    Demo {
        #[command(subcommand)]
        command: Option<demo::DemoCommands>,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Show { .. } => "show",
            Commands::Set { .. } => "set",
            Commands::Clear { .. } => "clear",
            Commands::Chart { .. } => "chart",
            Commands::Months { .. } => "months",
            Commands::Doctor { .. } => "doctor",
            Commands::Demo { .. } => "demo",
            Commands::Logs { .. } => "logs",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let name = cli.command.name();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            commands::log_failure(name, &e);
            output::error(&format!("Error: {:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Show { month, json } => show::run(month, json),
        Commands::Set { day, amount, month, json } => set::run(day, &amount, month, json),
        Commands::Clear { month, force } => clear::run(month, force),
        Commands::Chart { month, json } => chart::run(month, json),
        Commands::Months { json } => months::run(json),
        Commands::Doctor { verbose, json } => doctor::run(verbose, json),
        Commands::Demo { command } => demo::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
