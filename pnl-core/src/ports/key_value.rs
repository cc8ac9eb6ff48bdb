//! Key-value storage port

use crate::domain::result::Result;

/// String-keyed, string-valued persistent storage
///
/// Mirrors the browser local-storage contract the calendar was designed
/// around: values are opaque strings, a missing key reads as None, and
/// removing a missing key is not an error. Write failures of the
/// underlying medium (quota, I/O) are returned to the caller unchanged.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key` if present
    fn remove_item(&self, key: &str) -> Result<()>;

    /// All keys currently stored, sorted
    fn keys(&self) -> Result<Vec<String>>;
}
