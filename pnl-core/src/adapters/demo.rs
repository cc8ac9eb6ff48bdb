//! Demo data provider
//!
//! Generates a plausible trading record for demo mode:
//! - the current month up to today plus the two months before it
//! - one entry per weekday, nothing on weekends
//! - amounts follow a deterministic wave so repeated runs look the same

use std::f64::consts::PI;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::domain::{MonthKey, MonthLedger};

/// Number of months seeded, counting the current one
const DEMO_MONTHS: usize = 3;

/// Demo ledgers ending with the month that contains `today`
pub fn generate_demo_ledgers(today: NaiveDate) -> Vec<(MonthKey, MonthLedger)> {
    let mut result = Vec::new();
    let mut key = MonthKey::from_date(today);

    for offset in 0..DEMO_MONTHS {
        let last_day = if offset == 0 {
            today.day()
        } else {
            key.days_in_month()
        };
        result.push((key, demo_ledger(key, last_day)));

        match key.previous() {
            Ok(prev) => key = prev,
            Err(_) => break,
        }
    }

    result.reverse();
    result
}

fn demo_ledger(key: MonthKey, last_day: u32) -> MonthLedger {
    let mut ledger = MonthLedger::new();
    let seed = (key.month() as f64 + 1.0) * 0.37;

    for day in 1..=last_day {
        let Some(date) = NaiveDate::from_ymd_opt(key.year(), key.month() + 1, day) else {
            continue;
        };
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }

        let wave = (2.0 * PI * day as f64 / 11.0 + seed).sin() * 180.0;
        let drift = (day % 4) as f64 * 15.0 - 20.0;
        let amount = ((wave + drift) * 100.0).round() / 100.0;
        ledger.set(day, amount);
    }

    ledger
}
