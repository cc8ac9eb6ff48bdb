//! Month key domain model

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::result::{Error, Result};

/// Prefix of every ledger key in the key-value store
pub const KEY_PREFIX: &str = "pnl_";

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Identifies one calendar month: a year and a 0-based month index (0 = January)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Create a month key, rejecting months outside 0..=11 and years
    /// that cannot be represented as a calendar date
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if month > 11 {
            return Err(Error::validation(format!(
                "month {} is out of range (expected 0-11)",
                month
            )));
        }
        if NaiveDate::from_ymd_opt(year, month + 1, 1).is_none() {
            return Err(Error::validation(format!("year {} is out of range", year)));
        }
        Ok(Self { year, month })
    }

    /// Month key containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    /// Parse a storage key of the form `pnl_<year>_<month>`
    ///
    /// Returns None for keys that do not belong to a ledger.
    pub fn from_storage_key(key: &str) -> Option<Self> {
        let rest = key.strip_prefix(KEY_PREFIX)?;
        let (year, month) = rest.rsplit_once('_')?;
        let year: i32 = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        // Reject non-canonical spellings like "pnl_2024_03" so the
        // mapping stays one-to-one with derived keys
        let key = Self::new(year, month).ok()?;
        (key.storage_key() == format!("{}{}", KEY_PREFIX, rest)).then_some(key)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 0-based month index
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Storage identifier: `pnl_<year>_<month>` with a 0-based month
    pub fn storage_key(&self) -> String {
        format!("{}{}_{}", KEY_PREFIX, self.year, self.month)
    }

    /// English month name, e.g. "April"
    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }

    /// Number of days in this month
    pub fn days_in_month(&self) -> u32 {
        match self.month + 1 {
            2 => {
                if is_leap_year(self.year) {
                    29
                } else {
                    28
                }
            }
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Weekday of the 1st of the month (0 = Sunday, 6 = Saturday)
    pub fn first_weekday(&self) -> u32 {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
            .map(|date| date.weekday().num_days_from_sunday())
            .unwrap_or(0)
    }

    /// The following month, rolling over into January of the next year
    pub fn next(&self) -> Result<Self> {
        if self.month == 11 {
            Self::new(self.year + 1, 0)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// The preceding month, rolling back into December of the previous year
    pub fn previous(&self) -> Result<Self> {
        if self.month == 0 {
            Self::new(self.year - 1, 11)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

/// English name of a 0-based month index
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month as usize)
        .copied()
        .unwrap_or("Invalid Month")
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}
