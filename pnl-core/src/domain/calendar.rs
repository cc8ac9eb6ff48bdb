//! Calendar grid model
//!
//! A month is laid out as week rows of seven cells, Sunday first. Cells
//! before the 1st and after the last day of the month are blanks; every
//! other cell is bound to one day of the ledger and holds the text of its
//! entry the way it was last typed or loaded.

use serde::Serialize;

use super::ledger::MonthLedger;
use super::month::MonthKey;
use super::pnl::PnlClass;

pub const DAYS_PER_WEEK: usize = 7;

/// One cell of the calendar grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarCell {
    /// Day of month, None for padding cells
    pub day: Option<u32>,
    /// Entry text as shown in the cell's input
    pub input: String,
    pub class: PnlClass,
}

impl CalendarCell {
    fn blank() -> Self {
        Self {
            day: None,
            input: String::new(),
            class: PnlClass::Neutral,
        }
    }

    fn for_day(day: u32, amount: Option<f64>) -> Self {
        // A stored zero renders as an empty input, same as a missing entry
        let input = match amount {
            Some(a) if a != 0.0 => a.to_string(),
            _ => String::new(),
        };
        Self {
            day: Some(day),
            input,
            class: PnlClass::Neutral,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.day.is_none()
    }
}

/// Rendered calendar for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarGrid {
    pub key: MonthKey,
    pub weeks: Vec<Vec<CalendarCell>>,
}

impl CalendarGrid {
    /// Lay out the month and fill day cells from the ledger
    pub fn build(key: MonthKey, ledger: &MonthLedger) -> Self {
        let first_weekday = key.first_weekday() as usize;
        let days_in_month = key.days_in_month();

        let mut weeks = Vec::new();
        let mut row: Vec<CalendarCell> = (0..first_weekday).map(|_| CalendarCell::blank()).collect();

        for day in 1..=days_in_month {
            if row.len() == DAYS_PER_WEEK {
                weeks.push(std::mem::take(&mut row));
            }
            row.push(CalendarCell::for_day(day, ledger.get(day)));
        }

        while row.len() < DAYS_PER_WEEK {
            row.push(CalendarCell::blank());
        }
        weeks.push(row);

        Self { key, weeks }
    }

    /// Day cells in ascending day order
    pub fn day_cells(&self) -> impl Iterator<Item = &CalendarCell> {
        self.weeks.iter().flatten().filter(|c| !c.is_blank())
    }

    pub fn day_cells_mut(&mut self) -> impl Iterator<Item = &mut CalendarCell> {
        self.weeks.iter_mut().flatten().filter(|c| !c.is_blank())
    }

    pub fn cell(&self, day: u32) -> Option<&CalendarCell> {
        self.day_cells().find(|c| c.day == Some(day))
    }

    pub fn cell_mut(&mut self, day: u32) -> Option<&mut CalendarCell> {
        self.day_cells_mut().find(|c| c.day == Some(day))
    }

    /// Entry texts of every day cell, in day order
    pub fn inputs(&self) -> Vec<&str> {
        self.day_cells().map(|c| c.input.as_str()).collect()
    }
}
