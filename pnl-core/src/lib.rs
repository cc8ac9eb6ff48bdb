//! P&L Calendar Core - daily profit and loss tracking by month
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core entities (MonthKey, MonthLedger, CalendarGrid, etc.)
//! - **ports**: Trait definitions for external dependencies (KeyValueStore)
//! - **services**: Business logic orchestration
//! - **adapters**: Concrete implementations (DuckDB, in-memory, demo data)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::duckdb::DuckDbStorage;
use config::Config;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::{
    CalendarCell, CalendarGrid, ChartPoint, ChartSeries, MonthKey, MonthLedger, PnlClass, Summary,
};
pub use services::{CalendarController, CalendarState, LogEvent, LoggingService};

/// Main context for calendar operations
///
/// This is the primary entry point for all business logic. It holds
/// the storage, configuration, and all services.
pub struct PnlContext {
    pub config: Config,
    pub storage: Arc<DuckDbStorage>,
    pub ledger_store: Arc<LedgerStore>,
    pub status_service: StatusService,
    pub doctor_service: DoctorService,
}

impl PnlContext {
    /// Create a new context over the data directory
    pub fn new(pnl_dir: &Path) -> Result<Self> {
        let config = Config::load(pnl_dir)?;

        let db_path = pnl_dir.join(config.db_filename());
        let storage = Arc::new(DuckDbStorage::new(&db_path)?);

        // Initialize schema
        storage.ensure_schema()?;

        let ledger_store = Arc::new(LedgerStore::new(
            Arc::clone(&storage) as Arc<dyn ports::KeyValueStore>,
            config.zero_policy,
        ));
        let status_service = StatusService::new(Arc::clone(&ledger_store));
        let doctor_service = DoctorService::new(Arc::clone(&ledger_store));

        Ok(Self {
            config,
            storage,
            ledger_store,
            status_service,
            doctor_service,
        })
    }

    /// Controller rendering `key` from this context's storage
    pub fn controller(&self, key: MonthKey) -> Result<CalendarController> {
        CalendarController::open(Arc::clone(&self.ledger_store), key)
    }
}
