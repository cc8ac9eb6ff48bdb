//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - DuckDB for the KeyValueStore port
//! - An in-memory map for the KeyValueStore port (tests, scratch sessions)
//! - Demo data provider for demo mode

pub mod demo;
pub mod duckdb;
pub mod memory;
