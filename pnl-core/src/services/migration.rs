//! Migration service - manages database schema migrations
//!
//! Migrations are SQL files embedded at compile time. Each migration is
//! tracked in the sys_migrations table to ensure idempotent execution.
//! The same service drives both the data database and the log database;
//! each passes its own ordered list of `(name, sql)` pairs.

use std::collections::BTreeSet;

use anyhow::Result;
use duckdb::Connection;

/// Name of the bootstrap migration that creates sys_migrations
const BOOTSTRAP: &str = "000_migrations.sql";

/// Embedded migrations, `(filename, sql)` in apply order
pub type MigrationList = &'static [(&'static str, &'static str)];

/// Result of running migrations
#[derive(Debug)]
pub struct MigrationResult {
    /// Names of newly applied migrations
    pub applied: Vec<String>,
    /// Count of migrations that were already applied
    pub already_applied: usize,
}

/// Service for managing database migrations
pub struct MigrationService<'a> {
    conn: &'a Connection,
    migrations: MigrationList,
}

impl<'a> MigrationService<'a> {
    /// Create a migration service for one set of embedded migrations
    pub fn new(conn: &'a Connection, migrations: MigrationList) -> Self {
        Self { conn, migrations }
    }

    /// Bring the database up to date
    ///
    /// A fresh database first gets the bootstrap migration so there is a
    /// table to record into. Every other migration not yet recorded is then
    /// executed in list order and recorded. Already applied migrations are
    /// only counted.
    pub fn run_pending(&self) -> Result<MigrationResult> {
        let mut applied = Vec::new();
        if self.bootstrap()? {
            applied.push(BOOTSTRAP.to_string());
        }

        // Recorded before this run; excludes the bootstrap we may have just done
        let recorded = self.get_applied()?;
        let already_applied = recorded.len() - applied.len();

        for (name, sql) in self.migrations.iter().filter(|(n, _)| *n != BOOTSTRAP) {
            if recorded.contains(*name) {
                continue;
            }
            self.apply(name, sql)?;
            applied.push(name.to_string());
        }

        Ok(MigrationResult {
            applied,
            already_applied,
        })
    }

    /// Names recorded in sys_migrations
    pub fn get_applied(&self) -> Result<BTreeSet<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT migration_name FROM sys_migrations")?;
        let names = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut result = BTreeSet::new();
        for name in names {
            result.insert(name?);
        }
        Ok(result)
    }

    /// Create sys_migrations when missing; true if it had to be created
    fn bootstrap(&self) -> Result<bool> {
        if self.migrations_table_exists()? {
            return Ok(false);
        }
        match self.migrations.iter().find(|(n, _)| *n == BOOTSTRAP) {
            Some((name, sql)) => {
                self.apply(name, sql)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// A query failure here means the catalog has no such table yet
    fn migrations_table_exists(&self) -> Result<bool> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = 'sys_migrations'",
            [],
            |row| row.get::<_, i64>(0),
        );
        Ok(matches!(count, Ok(n) if n > 0))
    }

    /// Execute one migration and record it
    fn apply(&self, name: &str, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        self.conn.execute(
            "INSERT INTO sys_migrations (migration_name) VALUES (?)",
            [name],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_migrations::LOG_MIGRATIONS;
    use crate::migrations::MIGRATIONS;

    #[test]
    fn test_migrations_run_on_fresh_db() {
        let conn = Connection::open_in_memory().unwrap();
        let service = MigrationService::new(&conn, MIGRATIONS);

        let result = service.run_pending().unwrap();
        assert_eq!(result.applied.len(), MIGRATIONS.len());
        assert_eq!(result.applied[0], BOOTSTRAP);
        assert_eq!(result.already_applied, 0);

        // Running again should apply nothing
        let result2 = service.run_pending().unwrap();
        assert!(result2.applied.is_empty());
        assert_eq!(result2.already_applied, MIGRATIONS.len());
    }

    #[test]
    fn test_only_unrecorded_migrations_run() {
        let conn = Connection::open_in_memory().unwrap();

        // A database that only ever saw the bootstrap
        conn.execute_batch(MIGRATIONS[0].1).unwrap();
        conn.execute(
            "INSERT INTO sys_migrations (migration_name) VALUES (?)",
            [MIGRATIONS[0].0],
        )
        .unwrap();

        let service = MigrationService::new(&conn, MIGRATIONS);
        let result = service.run_pending().unwrap();
        assert_eq!(result.already_applied, 1);
        assert_eq!(result.applied.len(), MIGRATIONS.len() - 1);
        assert_eq!(service.get_applied().unwrap().len(), MIGRATIONS.len());
    }

    #[test]
    fn test_log_migrations_apply() {
        let conn = Connection::open_in_memory().unwrap();
        let service = MigrationService::new(&conn, LOG_MIGRATIONS);
        let result = service.run_pending().unwrap();
        assert_eq!(result.applied.len(), LOG_MIGRATIONS.len());
    }
}
