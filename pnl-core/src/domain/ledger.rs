//! Month ledger domain model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Day-of-month to amount mapping for one month
///
/// Serialized as a JSON object keyed by decimal day strings:
/// `{"1": 12.5, "15": -3}`. Days outside the month are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "BTreeMap<u32, f64>", from = "BTreeMap<u32, Option<f64>>")]
pub struct MonthLedger {
    entries: BTreeMap<u32, f64>,
}

impl MonthLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a persisted ledger
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Serialize for persistence
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn get(&self, day: u32) -> Option<f64> {
        self.entries.get(&day).copied()
    }

    pub fn set(&mut self, day: u32, amount: f64) {
        self.entries.insert(day, amount);
    }

    pub fn remove(&mut self, day: u32) -> Option<f64> {
        self.entries.remove(&day)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending day order
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.entries.iter().map(|(day, amount)| (*day, *amount))
    }

    /// Days that cannot belong to a month with `days_in_month` days
    pub fn out_of_range_days(&self, days_in_month: u32) -> Vec<u32> {
        self.entries
            .keys()
            .copied()
            .filter(|day| *day == 0 || *day > days_in_month)
            .collect()
    }
}

impl From<MonthLedger> for BTreeMap<u32, f64> {
    fn from(ledger: MonthLedger) -> Self {
        ledger.entries
    }
}

// `null` values come from writers that serialized a non-finite number;
// they carry no amount and are dropped.
impl From<BTreeMap<u32, Option<f64>>> for MonthLedger {
    fn from(raw: BTreeMap<u32, Option<f64>>) -> Self {
        Self {
            entries: raw
                .into_iter()
                .filter_map(|(day, amount)| amount.map(|a| (day, a)))
                .collect(),
        }
    }
}
