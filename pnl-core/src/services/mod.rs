//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

pub mod aggregator;
mod controller;
mod demo;
mod doctor;
pub mod ledger_store;
pub mod logging;
pub mod migration;
mod status;

pub use controller::{CalendarController, CalendarState};
pub use demo::DemoService;
pub use doctor::{CheckResult, DoctorResult, DoctorService, DoctorSummary};
pub use ledger_store::{LedgerStore, StoredLedger};
pub use logging::{LogEntry, LogEvent, LoggingService};
pub use migration::{MigrationResult, MigrationService};
pub use status::{MonthSummary, StatusService, StatusSummary};
