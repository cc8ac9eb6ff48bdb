//! Ledger store - per-month persistence of P&L entries
//!
//! Each month's ledger is one JSON object stored under `pnl_<year>_<month>`.
//! Writes are read-modify-write of the whole object.

use std::sync::Arc;

use anyhow::Result;

use crate::config::ZeroPolicy;
use crate::domain::{MonthKey, MonthLedger};
use crate::ports::KeyValueStore;

/// How a stored value looked when it was read back
#[derive(Debug, Clone, PartialEq)]
pub enum StoredLedger {
    Missing,
    Valid(MonthLedger),
    /// Present but not a ledger object; holds the parse error message
    Corrupt(String),
}

pub struct LedgerStore {
    storage: Arc<dyn KeyValueStore>,
    zero_policy: ZeroPolicy,
}

impl LedgerStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, zero_policy: ZeroPolicy) -> Self {
        Self {
            storage,
            zero_policy,
        }
    }

    /// Storage key for a month
    pub fn derive_key(key: MonthKey) -> String {
        key.storage_key()
    }

    /// Persisted ledger for the month
    ///
    /// A missing or unparsable value reads as an empty ledger. Only failures
    /// of the storage medium itself are returned as errors.
    pub fn load(&self, key: MonthKey) -> Result<MonthLedger> {
        Ok(match self.inspect(key)? {
            StoredLedger::Valid(ledger) => ledger,
            StoredLedger::Missing | StoredLedger::Corrupt(_) => MonthLedger::new(),
        })
    }

    /// Read the stored value without hiding corruption
    pub fn inspect(&self, key: MonthKey) -> Result<StoredLedger> {
        let raw = self.storage.get_item(&Self::derive_key(key))?;
        Ok(match raw {
            None => StoredLedger::Missing,
            Some(raw) => match MonthLedger::from_json(&raw) {
                Ok(ledger) => StoredLedger::Valid(ledger),
                Err(e) => StoredLedger::Corrupt(e.to_string()),
            },
        })
    }

    /// Record `amount` for `day` and persist the whole ledger
    ///
    /// Other days already stored for the month are kept. Returns the ledger
    /// as written.
    pub fn save(&self, key: MonthKey, day: u32, amount: f64) -> Result<MonthLedger> {
        let storage_key = Self::derive_key(key);
        let mut ledger = self.load(key)?;

        if amount == 0.0 && self.zero_policy == ZeroPolicy::Remove {
            ledger.remove(day);
            if ledger.is_empty() {
                self.storage.remove_item(&storage_key)?;
                return Ok(ledger);
            }
        } else {
            ledger.set(day, amount);
        }

        self.storage.set_item(&storage_key, &ledger.to_json()?)?;
        Ok(ledger)
    }

    /// Remove the month's ledger entirely
    pub fn clear(&self, key: MonthKey) -> Result<()> {
        self.storage.remove_item(&Self::derive_key(key))?;
        Ok(())
    }

    /// Every month that has a stored value, sorted by year then month
    pub fn stored_months(&self) -> Result<Vec<MonthKey>> {
        let mut months: Vec<MonthKey> = self
            .storage
            .keys()?
            .iter()
            .filter_map(|k| MonthKey::from_storage_key(k))
            .collect();
        months.sort();
        Ok(months)
    }

    /// Stored keys that look like ledger keys but do not parse as a month
    pub fn unrecognised_keys(&self) -> Result<Vec<String>> {
        Ok(self
            .storage
            .keys()?
            .into_iter()
            .filter(|k| k.starts_with(crate::domain::KEY_PREFIX))
            .filter(|k| MonthKey::from_storage_key(k).is_none())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStorage;
    use crate::domain::result::Error;

    fn store_with(storage: Arc<MemoryStorage>, policy: ZeroPolicy) -> LedgerStore {
        LedgerStore::new(storage, policy)
    }

    fn april() -> MonthKey {
        MonthKey::new(2024, 3).unwrap()
    }

    #[test]
    fn test_derive_key() {
        assert_eq!(LedgerStore::derive_key(april()), "pnl_2024_3");
    }

    #[test]
    fn test_load_missing_is_empty() {
        let store = store_with(Arc::new(MemoryStorage::new()), ZeroPolicy::Persist);
        assert!(store.load(april()).unwrap().is_empty());
        assert_eq!(store.inspect(april()).unwrap(), StoredLedger::Missing);
    }

    #[test]
    fn test_save_merges_with_existing_days() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_with(storage.clone(), ZeroPolicy::Persist);

        store.save(april(), 1, 10.0).unwrap();
        store.save(april(), 2, -5.5).unwrap();
        store.save(april(), 1, 12.25).unwrap();

        let ledger = store.load(april()).unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get(1), Some(12.25));
        assert_eq!(ledger.get(2), Some(-5.5));
        assert_eq!(
            storage.get_item("pnl_2024_3").unwrap().as_deref(),
            Some(r#"{"1":12.25,"2":-5.5}"#)
        );
    }

    #[test]
    fn test_corrupt_value_loads_as_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item("pnl_2024_3", "{oops").unwrap();
        let store = store_with(storage.clone(), ZeroPolicy::Persist);

        assert!(store.load(april()).unwrap().is_empty());
        assert!(matches!(store.inspect(april()).unwrap(), StoredLedger::Corrupt(_)));

        // The next save starts over from an empty ledger
        store.save(april(), 3, 1.0).unwrap();
        assert_eq!(
            storage.get_item("pnl_2024_3").unwrap().as_deref(),
            Some(r#"{"3":1.0}"#)
        );
    }

    #[test]
    fn test_zero_is_persisted_by_default() {
        let store = store_with(Arc::new(MemoryStorage::new()), ZeroPolicy::Persist);
        store.save(april(), 4, 0.0).unwrap();
        assert_eq!(store.load(april()).unwrap().get(4), Some(0.0));
    }

    #[test]
    fn test_zero_removes_day_under_remove_policy() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_with(storage.clone(), ZeroPolicy::Remove);

        store.save(april(), 4, 8.0).unwrap();
        store.save(april(), 5, 2.0).unwrap();
        store.save(april(), 4, 0.0).unwrap();
        assert_eq!(store.load(april()).unwrap().get(4), None);
        assert_eq!(store.load(april()).unwrap().get(5), Some(2.0));

        // Removing the last day removes the key
        store.save(april(), 5, 0.0).unwrap();
        assert_eq!(storage.get_item("pnl_2024_3").unwrap(), None);
    }

    #[test]
    fn test_clear_only_touches_its_month() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_with(storage.clone(), ZeroPolicy::Persist);
        let may = MonthKey::new(2024, 4).unwrap();
        let april_2023 = MonthKey::new(2023, 3).unwrap();

        store.save(april(), 1, 1.0).unwrap();
        store.save(may, 1, 2.0).unwrap();
        store.save(april_2023, 1, 3.0).unwrap();

        store.clear(april()).unwrap();

        assert!(store.load(april()).unwrap().is_empty());
        assert_eq!(store.load(may).unwrap().get(1), Some(2.0));
        assert_eq!(store.load(april_2023).unwrap().get(1), Some(3.0));
    }

    #[test]
    fn test_stored_months_sorted_and_filtered() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item("theme", "dark").unwrap();
        storage.set_item("pnl_notes", "{}").unwrap();
        let store = store_with(storage.clone(), ZeroPolicy::Persist);

        store.save(MonthKey::new(2024, 10).unwrap(), 1, 1.0).unwrap();
        store.save(MonthKey::new(2024, 2).unwrap(), 1, 1.0).unwrap();
        store.save(MonthKey::new(2023, 11).unwrap(), 1, 1.0).unwrap();

        let months: Vec<String> = store
            .stored_months()
            .unwrap()
            .iter()
            .map(|k| k.storage_key())
            .collect();
        assert_eq!(months, vec!["pnl_2023_11", "pnl_2024_2", "pnl_2024_10"]);
        assert_eq!(store.unrecognised_keys().unwrap(), vec!["pnl_notes"]);
    }

    #[test]
    fn test_storage_failures_propagate() {
        let store = store_with(Arc::new(MemoryStorage::with_quota(24)), ZeroPolicy::Persist);
        store.save(april(), 1, 1.0).unwrap();

        let err = store.save(april(), 2, 123456789.0).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Storage(_))));
        // The failed write left the earlier ledger intact
        assert_eq!(store.load(april()).unwrap().len(), 1);
    }
}
