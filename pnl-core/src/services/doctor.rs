//! Doctor service - stored data health checks
//!
//! Loading silently treats damaged ledgers as empty. The doctor is where
//! that damage becomes visible: nothing here modifies storage.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use serde_json::json;

use crate::domain::MonthKey;
use crate::services::ledger_store::StoredLedger;
use crate::services::LedgerStore;

pub struct DoctorService {
    store: Arc<LedgerStore>,
}

impl DoctorService {
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }

    /// Run all health checks
    pub fn run_checks(&self) -> Result<DoctorResult> {
        let mut checks = BTreeMap::new();
        let months = self.store.stored_months()?;

        let mut corrupt = Vec::new();
        let mut out_of_range = Vec::new();
        for key in &months {
            match self.store.inspect(*key)? {
                StoredLedger::Corrupt(error) => corrupt.push(json!({
                    "month": key.storage_key(),
                    "error": error,
                })),
                StoredLedger::Valid(ledger) => {
                    let days = ledger.out_of_range_days(key.days_in_month());
                    if !days.is_empty() {
                        out_of_range.push(json!({
                            "month": key.storage_key(),
                            "days": days,
                        }));
                    }
                }
                StoredLedger::Missing => {}
            }
        }

        // Corrupt ledgers read as empty and are overwritten by the next edit
        checks.insert("corrupt_ledgers".to_string(), CheckResult {
            status: if corrupt.is_empty() { "pass" } else { "error" }.to_string(),
            message: if corrupt.is_empty() {
                format!("All {} stored month(s) parse", months.len())
            } else {
                format!("{} month(s) hold unreadable data and show as empty", corrupt.len())
            },
            details: if corrupt.is_empty() { None } else { Some(corrupt) },
        });

        checks.insert("out_of_range_days".to_string(), CheckResult {
            status: if out_of_range.is_empty() { "pass" } else { "warning" }.to_string(),
            message: if out_of_range.is_empty() {
                "All stored days fall inside their month".to_string()
            } else {
                format!(
                    "{} month(s) hold days that are never shown or totalled",
                    out_of_range.len()
                )
            },
            details: if out_of_range.is_empty() { None } else { Some(out_of_range) },
        });

        let unrecognised = self.store.unrecognised_keys()?;
        checks.insert("unrecognised_keys".to_string(), CheckResult {
            status: if unrecognised.is_empty() { "pass" } else { "warning" }.to_string(),
            message: if unrecognised.is_empty() {
                "No stray ledger keys found".to_string()
            } else {
                format!("{} key(s) use the ledger prefix but name no month", unrecognised.len())
            },
            details: if unrecognised.is_empty() {
                None
            } else {
                Some(unrecognised.iter().map(|k| json!({ "key": k })).collect())
            },
        });

        let passed = checks.values().filter(|c| c.status == "pass").count() as i64;
        let warnings = checks.values().filter(|c| c.status == "warning").count() as i64;
        let errors = checks.values().filter(|c| c.status == "error").count() as i64;

        Ok(DoctorResult {
            checks,
            summary: DoctorSummary { passed, warnings, errors },
        })
    }

    /// Months whose stored value does not parse
    pub fn corrupt_months(&self) -> Result<Vec<MonthKey>> {
        let mut result = Vec::new();
        for key in self.store.stored_months()? {
            if matches!(self.store.inspect(key)?, StoredLedger::Corrupt(_)) {
                result.push(key);
            }
        }
        Ok(result)
    }
}

#[derive(Debug, Serialize)]
pub struct DoctorResult {
    pub checks: BTreeMap<String, CheckResult>,
    pub summary: DoctorSummary,
}

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Serialize)]
pub struct DoctorSummary {
    pub passed: i64,
    pub warnings: i64,
    pub errors: i64,
}
