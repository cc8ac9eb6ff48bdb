//! Output formatting utilities

use colored::{ColoredString, Colorize};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use pnl_core::PnlClass;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Profit green, loss red
pub fn class_color(class: PnlClass) -> Option<Color> {
    match class {
        PnlClass::Profit => Some(Color::Green),
        PnlClass::Loss => Some(Color::Red),
        PnlClass::Neutral => None,
    }
}

/// Table cell colored by its classification
pub fn class_cell(text: impl Into<String>, class: PnlClass) -> Cell {
    let cell = Cell::new(text.into());
    match class_color(class) {
        Some(color) => cell.fg(color),
        None => cell,
    }
}

/// A total colored by sign; a zero total is cyan
pub fn paint_total(text: &str, class: PnlClass) -> ColoredString {
    match class {
        PnlClass::Profit => text.green().bold(),
        PnlClass::Loss => text.red().bold(),
        PnlClass::Neutral => text.cyan().bold(),
    }
}

/// An entry colored by sign; neutral entries stay plain
pub fn paint_entry(text: &str, class: PnlClass) -> ColoredString {
    match class {
        PnlClass::Profit => text.green(),
        PnlClass::Loss => text.red(),
        PnlClass::Neutral => text.normal(),
    }
}

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
