//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across
//! threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::gate::{DEFAULT_BUSY_RESET_MS, DEFAULT_COOLDOWN_MS};
use crate::history::DEFAULT_CAPACITY;

use super::AppPaths;

// ---------------------------------------------------------------------------
// ServiceConfig
// ---------------------------------------------------------------------------

/// Connection settings for the remote answer service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the service, without a trailing slash
    /// (e.g. `http://localhost:8000`).
    pub base_url: String,
    /// Maximum seconds to wait for a response before the request counts as
    /// a connection failure.
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            timeout_secs: 15,
        }
    }
}

// ---------------------------------------------------------------------------
// GateConfig
// ---------------------------------------------------------------------------

/// Debounce-gate timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Milliseconds after an accepted question during which every fragment
    /// is rejected.
    pub cooldown_ms: u64,
    /// Milliseconds after which the in-flight marker self-clears; clamped
    /// to `cooldown_ms` at gate construction.
    pub busy_reset_ms: u64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            busy_reset_ms: DEFAULT_BUSY_RESET_MS,
        }
    }
}

// ---------------------------------------------------------------------------
// DisplayConfig
// ---------------------------------------------------------------------------

/// Answer-history display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Number of answers kept in the newest-first history.
    pub history_capacity: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_CAPACITY,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use askrelay::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Answer service connection settings.
    pub service: ServiceConfig,
    /// Debounce-gate timing.
    pub gate: GateConfig,
    /// Answer-history display settings.
    pub display: DisplayConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Verify that a default `AppConfig` can be serialised to TOML and
    /// deserialised back without any data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.service.base_url, loaded.service.base_url);
        assert_eq!(original.service.timeout_secs, loaded.service.timeout_secs);
        assert_eq!(original.gate.cooldown_ms, loaded.gate.cooldown_ms);
        assert_eq!(original.gate.busy_reset_ms, loaded.gate.busy_reset_ms);
        assert_eq!(
            original.display.history_capacity,
            loaded.display.history_capacity
        );
    }

    /// `load_from` on a non-existent path must return `Default` without
    /// error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.service.base_url, default.service.base_url);
        assert_eq!(config.gate.cooldown_ms, default.gate.cooldown_ms);
    }

    /// Verify the default timing and capacity values.
    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.service.base_url, "http://localhost:8000");
        assert_eq!(cfg.service.timeout_secs, 15);
        assert_eq!(cfg.gate.cooldown_ms, 3_000);
        assert_eq!(cfg.gate.busy_reset_ms, 2_000);
        assert_eq!(cfg.display.history_capacity, 6);
    }

    /// Verify that modified non-default values survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.service.base_url = "https://answers.example.com".into();
        cfg.service.timeout_secs = 30;
        cfg.gate.cooldown_ms = 5_000;
        cfg.display.history_capacity = 10;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.service.base_url, "https://answers.example.com");
        assert_eq!(loaded.service.timeout_secs, 30);
        assert_eq!(loaded.gate.cooldown_ms, 5_000);
        assert_eq!(loaded.display.history_capacity, 10);
    }
}
