//! Demo service - manage demo mode
//!
//! Demo mode swaps the data file for `demo.duckdb`, seeded with a few
//! months of generated entries, so the calendar can be tried without
//! touching real records.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{Local, NaiveDate};

use crate::adapters::demo::generate_demo_ledgers;
use crate::adapters::duckdb::DuckDbStorage;
use crate::config::Config;
use crate::ports::KeyValueStore;

const DEMO_DB: &str = "demo.duckdb";
const DEMO_WAL: &str = "demo.duckdb.wal";

/// Demo service for managing demo mode
pub struct DemoService {
    pnl_dir: PathBuf,
}

impl DemoService {
    pub fn new(pnl_dir: &Path) -> Self {
        Self {
            pnl_dir: pnl_dir.to_path_buf(),
        }
    }

    /// Check if demo mode is currently enabled
    pub fn is_enabled(&self) -> Result<bool> {
        let config = Config::load(&self.pnl_dir)?;
        Ok(config.demo_mode)
    }

    /// Enable demo mode with months leading up to today
    pub fn enable(&self) -> Result<usize> {
        self.enable_as_of(Local::now().date_naive())
    }

    /// Enable demo mode with a fresh demo database seeded relative to `today`
    ///
    /// Returns how many months were seeded.
    pub fn enable_as_of(&self, today: NaiveDate) -> Result<usize> {
        self.remove_demo_files()?;

        let mut config = Config::load(&self.pnl_dir).unwrap_or_default();
        config.enable_demo_mode();
        config.save(&self.pnl_dir)?;

        let storage = DuckDbStorage::new(&self.pnl_dir.join(DEMO_DB))?;
        storage.ensure_schema()?;

        let ledgers = generate_demo_ledgers(today);
        for (key, ledger) in &ledgers {
            storage.set_item(&key.storage_key(), &ledger.to_json()?)?;
        }

        Ok(ledgers.len())
    }

    /// Disable demo mode, deleting the demo database when `clean` is set
    pub fn disable(&self, clean: bool) -> Result<()> {
        let mut config = Config::load(&self.pnl_dir).unwrap_or_default();
        config.disable_demo_mode();
        config.save(&self.pnl_dir)?;

        if clean {
            self.remove_demo_files()?;
        }

        Ok(())
    }

    fn remove_demo_files(&self) -> Result<()> {
        for name in [DEMO_DB, DEMO_WAL] {
            let path = self.pnl_dir.join(name);
            if path.exists() {
                std::fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}
