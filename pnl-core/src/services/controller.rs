//! Calendar controller - owns the rendered state of one month
//!
//! All reads and writes coming from a front-end go through the controller.
//! It keeps the grid, the summary and the chart for the active month and
//! recomputes the summary and rebuilds the chart after every write, so the
//! rendered state never drifts from what was persisted.

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;

use crate::domain::result::Error;
use crate::domain::{CalendarGrid, ChartSeries, MonthKey, Summary};
use crate::services::aggregator;
use crate::services::LedgerStore;

/// Everything a front-end needs to draw the active month
#[derive(Debug, Clone, Serialize)]
pub struct CalendarState {
    pub key: MonthKey,
    pub grid: CalendarGrid,
    pub summary: Summary,
    pub chart: ChartSeries,
}

pub struct CalendarController {
    store: Arc<LedgerStore>,
    state: CalendarState,
}

impl CalendarController {
    /// Load `key` and render it
    pub fn open(store: Arc<LedgerStore>, key: MonthKey) -> Result<Self> {
        let state = Self::render(&store, key)?;
        Ok(Self { store, state })
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    /// Switch to `key`, reloading everything from storage
    pub fn generate(&mut self, key: MonthKey) -> Result<&CalendarState> {
        self.state = Self::render(&self.store, key)?;
        Ok(&self.state)
    }

    /// Apply an edit typed into the cell for `day`
    ///
    /// The text is kept as typed; the persisted amount is its numeric value
    /// or 0. Days outside the rendered month are rejected.
    pub fn edit_entry(&mut self, day: u32, raw_input: &str) -> Result<&CalendarState> {
        let key = self.state.key;
        if self.state.grid.cell(day).is_none() {
            return Err(Error::not_found(format!("day {} is not part of {}", day, key)).into());
        }

        let amount = aggregator::coerce_amount(raw_input);
        let ledger = self.store.save(key, day, amount)?;

        if let Some(cell) = self.state.grid.cell_mut(day) {
            cell.input = raw_input.to_string();
        }
        self.state.chart = ChartSeries::from_ledger(key, &ledger);
        self.recompute();

        Ok(&self.state)
    }

    /// Clear the active month after `confirm` approves the prompt
    ///
    /// Returns whether the ledger was cleared. A declined prompt leaves
    /// storage and the rendered state untouched.
    pub fn clear<F>(&mut self, confirm: F) -> Result<bool>
    where
        F: FnOnce(&str) -> Result<bool>,
    {
        let key = self.state.key;
        let prompt = format!("Clear all P&L entries for {}?", key);
        if !confirm(&prompt)? {
            return Ok(false);
        }

        self.store.clear(key)?;
        self.generate(key)?;
        Ok(true)
    }

    fn render(store: &LedgerStore, key: MonthKey) -> Result<CalendarState> {
        let ledger = store.load(key)?;
        let grid = CalendarGrid::build(key, &ledger);
        let mut state = CalendarState {
            key,
            summary: aggregator::summarize_inputs(grid.inputs()),
            chart: ChartSeries::from_ledger(key, &ledger),
            grid,
        };
        classify_cells(&mut state.grid);
        Ok(state)
    }

    fn recompute(&mut self) {
        self.state.summary = aggregator::summarize_inputs(self.state.grid.inputs());
        classify_cells(&mut self.state.grid);
    }
}

fn classify_cells(grid: &mut CalendarGrid) {
    for cell in grid.day_cells_mut() {
        cell.class = aggregator::classify_entry(aggregator::parse_amount(&cell.input));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStorage;
    use crate::config::ZeroPolicy;
    use crate::domain::PnlClass;
    use crate::ports::KeyValueStore;

    fn april() -> MonthKey {
        MonthKey::new(2024, 3).unwrap()
    }

    fn controller(storage: Arc<MemoryStorage>) -> CalendarController {
        let store = Arc::new(LedgerStore::new(storage, ZeroPolicy::Persist));
        CalendarController::open(store, april()).unwrap()
    }

    #[test]
    fn test_edit_then_reload_shows_saved_entry() {
        let storage = Arc::new(MemoryStorage::new());
        let mut ctl = controller(storage.clone());

        ctl.edit_entry(15, "120.50").unwrap();

        let reloaded = controller(storage);
        let state = reloaded.state();
        let cell = state.grid.cell(15).unwrap();
        assert_eq!(aggregator::parse_amount(&cell.input), Some(120.5));
        assert_eq!(cell.class, PnlClass::Profit);
        assert_eq!(state.summary.display, "120.50");
        assert_eq!(state.summary.class, PnlClass::Profit);
    }

    #[test]
    fn test_edit_recomputes_summary_and_chart() {
        let mut ctl = controller(Arc::new(MemoryStorage::new()));

        ctl.edit_entry(3, "3.5").unwrap();
        ctl.edit_entry(1, "-1.25").unwrap();
        let state = ctl.edit_entry(2, "0").unwrap();

        assert_eq!(state.summary.display, "2.25");
        assert_eq!(state.summary.class, PnlClass::Profit);
        let days: Vec<u32> = state.chart.points.iter().map(|p| p.day).collect();
        assert_eq!(days, vec![1, 2, 3]);
        assert_eq!(state.grid.cell(1).unwrap().class, PnlClass::Loss);
        assert_eq!(state.grid.cell(2).unwrap().class, PnlClass::Neutral);
    }

    #[test]
    fn test_non_numeric_input_is_stored_as_zero() {
        let storage = Arc::new(MemoryStorage::new());
        let mut ctl = controller(storage.clone());

        let state = ctl.edit_entry(7, "abc").unwrap();
        assert_eq!(state.grid.cell(7).unwrap().input, "abc");
        assert_eq!(state.grid.cell(7).unwrap().class, PnlClass::Neutral);
        assert_eq!(state.summary.display, "0.00");
        assert_eq!(
            storage.get_item("pnl_2024_3").unwrap().as_deref(),
            Some(r#"{"7":0.0}"#)
        );
    }

    #[test]
    fn test_negative_zero_is_stored_as_zero() {
        let storage = Arc::new(MemoryStorage::new());
        let mut ctl = controller(storage.clone());

        ctl.edit_entry(1, "-0").unwrap();
        assert_eq!(
            storage.get_item("pnl_2024_3").unwrap().as_deref(),
            Some(r#"{"1":0.0}"#)
        );
    }

    #[test]
    fn test_edit_rejects_day_outside_month() {
        let mut ctl = controller(Arc::new(MemoryStorage::new()));
        let err = ctl.edit_entry(31, "5").unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::NotFound(_))));
        assert!(ctl.edit_entry(0, "5").is_err());
    }

    #[test]
    fn test_navigation_round_trip() {
        let mut ctl = controller(Arc::new(MemoryStorage::new()));
        ctl.edit_entry(10, "42").unwrap();
        ctl.edit_entry(11, "-2").unwrap();
        let before = ctl.state().clone();

        let may = MonthKey::new(2024, 4).unwrap();
        let state = ctl.generate(may).unwrap();
        assert_eq!(state.summary.display, "0.00");
        assert!(state.chart.is_empty());

        let state = ctl.generate(april()).unwrap();
        assert_eq!(state.grid, before.grid);
        assert_eq!(state.summary, before.summary);
        assert_eq!(state.chart, before.chart);
    }

    #[test]
    fn test_declined_clear_leaves_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let mut ctl = controller(storage.clone());
        ctl.edit_entry(1, "5").unwrap();

        let mut seen_prompt = String::new();
        let cleared = ctl
            .clear(|prompt| {
                seen_prompt = prompt.to_string();
                Ok(false)
            })
            .unwrap();

        assert!(!cleared);
        assert_eq!(seen_prompt, "Clear all P&L entries for April 2024?");
        assert!(storage.get_item("pnl_2024_3").unwrap().is_some());
        assert_eq!(ctl.state().summary.display, "5.00");
    }

    #[test]
    fn test_confirmed_clear_resets_month() {
        let storage = Arc::new(MemoryStorage::new());
        let mut ctl = controller(storage.clone());
        ctl.edit_entry(1, "5").unwrap();

        assert!(ctl.clear(|_| Ok(true)).unwrap());
        assert!(storage.get_item("pnl_2024_3").unwrap().is_none());
        assert_eq!(ctl.state().summary.display, "0.00");
        assert!(ctl.state().grid.inputs().iter().all(|i| i.is_empty()));
    }

    #[test]
    fn test_failed_write_keeps_rendered_state() {
        let store = Arc::new(LedgerStore::new(
            Arc::new(MemoryStorage::with_quota(20)),
            ZeroPolicy::Persist,
        ));
        let mut ctl = CalendarController::open(store, april()).unwrap();

        assert!(ctl.edit_entry(1, "1").is_ok());
        assert!(ctl.edit_entry(2, "99999999").is_err());
        assert_eq!(ctl.state().grid.cell(2).unwrap().input, "");
        assert_eq!(ctl.state().summary.display, "1.00");
    }
}
