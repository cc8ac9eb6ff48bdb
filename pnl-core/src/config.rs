//! Configuration management
//!
//! Settings live in `settings.json` in the data directory:
//! ```json
//! {
//!   "app": { "demoMode": false, "zeroEntries": "persist" }
//! }
//! ```
//! Fields this crate does not manage are preserved when saving.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// What a zero amount does to a ledger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroPolicy {
    /// Write the zero like any other amount
    #[default]
    Persist,
    /// Delete the day from the ledger instead
    Remove,
}

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    demo_mode: bool,
    #[serde(default)]
    zero_entries: ZeroPolicy,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Calendar configuration (simplified view of settings)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub demo_mode: bool,
    pub zero_policy: ZeroPolicy,
}

impl Config {
    /// Load config from the data directory
    ///
    /// Demo mode can be enabled via:
    /// 1. Settings file (pnl demo on)
    /// 2. Environment variable PNL_DEMO_MODE (for CI/testing)
    ///
    /// An unreadable settings file falls back to defaults.
    pub fn load(pnl_dir: &Path) -> Result<Self> {
        let raw = read_settings(pnl_dir)?;

        let demo_mode = match std::env::var("PNL_DEMO_MODE").ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => false,
            _ => raw.app.demo_mode,
        };

        Ok(Self {
            demo_mode,
            zero_policy: raw.app.zero_entries,
        })
    }

    /// Save config to the data directory
    /// Preserves other settings that this crate doesn't manage
    pub fn save(&self, pnl_dir: &Path) -> Result<()> {
        let mut settings = read_settings(pnl_dir)?;

        settings.app.demo_mode = self.demo_mode;
        settings.app.zero_entries = self.zero_policy;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(pnl_dir.join("settings.json"), content)?;
        Ok(())
    }

    pub fn enable_demo_mode(&mut self) {
        self.demo_mode = true;
    }

    pub fn disable_demo_mode(&mut self) {
        self.demo_mode = false;
    }

    /// Database file name for the active mode
    pub fn db_filename(&self) -> &'static str {
        if self.demo_mode {
            "demo.duckdb"
        } else {
            "pnl.duckdb"
        }
    }
}

fn read_settings(pnl_dir: &Path) -> Result<SettingsFile> {
    let settings_path = pnl_dir.join("settings.json");
    if settings_path.exists() {
        let content = std::fs::read_to_string(&settings_path)?;
        Ok(serde_json::from_str(&content).unwrap_or_default())
    } else {
        Ok(SettingsFile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_settings_file() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.zero_policy, ZeroPolicy::Persist);
        assert_eq!(config.db_filename(), if config.demo_mode { "demo.duckdb" } else { "pnl.duckdb" });
    }

    #[test]
    fn test_reads_zero_policy() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"app": {"zeroEntries": "remove"}}"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.zero_policy, ZeroPolicy::Remove);
    }

    #[test]
    fn test_save_preserves_unmanaged_fields() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"app": {"theme": "neon"}, "window": {"width": 800}}"#,
        )
        .unwrap();

        let mut config = Config::load(dir.path()).unwrap();
        config.zero_policy = ZeroPolicy::Remove;
        config.save(dir.path()).unwrap();

        let saved: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("settings.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(saved["app"]["theme"], "neon");
        assert_eq!(saved["app"]["zeroEntries"], "remove");
        assert_eq!(saved["window"]["width"], 800);
    }

    #[test]
    fn test_malformed_settings_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{not json").unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.zero_policy, ZeroPolicy::Persist);
    }
}
