//! Core domain entities
//!
//! All calendar entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

pub mod calendar;
mod ledger;
mod month;
mod pnl;
pub mod result;

pub use calendar::{CalendarCell, CalendarGrid};
pub use ledger::MonthLedger;
pub use month::{month_name, MonthKey, KEY_PREFIX};
pub use pnl::{ChartPoint, ChartSeries, PnlClass, Summary};
