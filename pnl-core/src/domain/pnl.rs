//! Profit/loss classification, summaries and chart data

use serde::Serialize;

use super::ledger::MonthLedger;
use super::month::MonthKey;

/// Sign classification of an amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PnlClass {
    Profit,
    Loss,
    Neutral,
}

impl PnlClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            PnlClass::Profit => "profit",
            PnlClass::Loss => "loss",
            PnlClass::Neutral => "neutral",
        }
    }
}

/// Aggregate over the currently rendered entries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: f64,
    /// Total with exactly two decimals, e.g. "120.50"
    pub display: String,
    pub class: PnlClass,
}

/// A single (day, amount) point of the month chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub day: u32,
    pub amount: f64,
}

/// Line-chart data for one month, sorted ascending by day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub key: MonthKey,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn from_ledger(key: MonthKey, ledger: &MonthLedger) -> Self {
        Self {
            key,
            points: ledger
                .iter()
                .map(|(day, amount)| ChartPoint { day, amount })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest and largest amount, if any point exists
    pub fn range(&self) -> Option<(f64, f64)> {
        self.points.iter().fold(None, |acc, p| match acc {
            None => Some((p.amount, p.amount)),
            Some((lo, hi)) => Some((lo.min(p.amount), hi.max(p.amount))),
        })
    }
}
