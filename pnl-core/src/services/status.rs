//! Status service - per-month summaries of everything stored

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;

use crate::domain::PnlClass;
use crate::services::{aggregator, LedgerStore};

/// Status service for month summaries
pub struct StatusService {
    store: Arc<LedgerStore>,
}

impl StatusService {
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }

    /// Summaries of every stored month, oldest first
    pub fn get_status(&self) -> Result<StatusSummary> {
        let mut months = Vec::new();

        for key in self.store.stored_months()? {
            let ledger = self.store.load(key)?;
            // Same days the calendar shows; stale days past month end are skipped
            let amounts: Vec<f64> = ledger
                .iter()
                .filter(|(day, _)| (1..=key.days_in_month()).contains(day))
                .map(|(_, amount)| amount)
                .collect();
            let summary = aggregator::summarize(amounts.iter().copied().map(Some));
            months.push(MonthSummary {
                key: key.storage_key(),
                label: key.to_string(),
                entries: amounts.len(),
                profit_days: amounts.iter().filter(|a| **a > 0.0).count(),
                loss_days: amounts.iter().filter(|a| **a < 0.0).count(),
                total: summary.total,
                display: summary.display,
                class: summary.class,
            });
        }

        let grand_total = aggregator::compute_total(months.iter().map(|m| Some(m.total)));

        Ok(StatusSummary {
            total_months: months.len(),
            grand_total,
            grand_total_display: aggregator::format_amount(grand_total),
            grand_total_class: aggregator::classify_total(grand_total),
            months,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct StatusSummary {
    pub total_months: usize,
    pub grand_total: f64,
    pub grand_total_display: String,
    pub grand_total_class: PnlClass,
    pub months: Vec<MonthSummary>,
}

#[derive(Debug, Serialize)]
pub struct MonthSummary {
    pub key: String,
    pub label: String,
    pub entries: usize,
    pub profit_days: usize,
    pub loss_days: usize,
    pub total: f64,
    pub display: String,
    pub class: PnlClass,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStorage;
    use crate::config::ZeroPolicy;
    use crate::domain::MonthKey;
    use crate::ports::KeyValueStore;

    #[test]
    fn test_status_lists_months_with_totals() {
        let store = Arc::new(LedgerStore::new(
            Arc::new(MemoryStorage::new()),
            ZeroPolicy::Persist,
        ));
        let march = MonthKey::new(2024, 2).unwrap();
        let april = MonthKey::new(2024, 3).unwrap();
        store.save(april, 1, 10.0).unwrap();
        store.save(april, 2, -2.5).unwrap();
        store.save(march, 5, -20.0).unwrap();

        let service = StatusService::new(store);
        let status = service.get_status().unwrap();

        assert_eq!(status.total_months, 2);
        assert_eq!(status.months[0].label, "March 2024");
        assert_eq!(status.months[0].class, PnlClass::Loss);
        assert_eq!(status.months[1].display, "7.50");
        assert_eq!(status.months[1].profit_days, 1);
        assert_eq!(status.months[1].loss_days, 1);
        assert_eq!(status.grand_total_display, "-12.50");
        assert_eq!(status.grand_total_class, PnlClass::Loss);
    }

    #[test]
    fn test_status_skips_days_past_month_end() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set_item("pnl_2023_1", r#"{"28": -4, "29": 50, "30": 60}"#)
            .unwrap();
        let service = StatusService::new(Arc::new(LedgerStore::new(storage, ZeroPolicy::Persist)));

        let status = service.get_status().unwrap();
        let february = &status.months[0];
        assert_eq!(february.entries, 1);
        assert_eq!(february.profit_days, 0);
        assert_eq!(february.loss_days, 1);
        assert_eq!(february.display, "-4.00");
        assert_eq!(status.grand_total_display, "-4.00");
    }
}
