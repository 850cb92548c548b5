//! Application settings loaded from config.toml
//!
//! The settings file names the ledger file, the purchase log and the alert
//! thresholds. Every key is optional; a missing file means all defaults. The
//! `LEDGER_PATH` and `PURCHASE_LOG_PATH` environment variables override the file
//! so deployments can move the data without editing it.

use crate::{
    core::alerts::InventoryRules,
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default location of the settings file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Settings for one ShelfBuddy process.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Ledger file with one product per line
    pub ledger_path: PathBuf,
    /// Append-only purchase log
    pub purchase_log_path: PathBuf,
    /// Quantities below this raise a low-stock alert
    pub low_stock_threshold: i64,
    /// Products expiring within this many days raise an expiry alert
    pub expiry_warning_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let rules = InventoryRules::default();
        Self {
            ledger_path: PathBuf::from("banco.txt"),
            purchase_log_path: PathBuf::from("compras.txt"),
            low_stock_threshold: rules.low_stock_threshold,
            expiry_warning_days: rules.expiry_warning_days,
        }
    }
}

impl AppConfig {
    /// Alert thresholds as the ledger expects them.
    #[must_use]
    pub const fn rules(&self) -> InventoryRules {
        InventoryRules {
            low_stock_threshold: self.low_stock_threshold,
            expiry_warning_days: self.expiry_warning_days,
        }
    }

    /// Applies `LEDGER_PATH` / `PURCHASE_LOG_PATH` when they are set.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var("LEDGER_PATH") {
            self.ledger_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("PURCHASE_LOG_PATH") {
            self.purchase_log_path = PathBuf::from(path);
        }
        self
    }
}

/// Parses settings from TOML text.
///
/// # Errors
/// Returns an error if the TOML is invalid or contains unknown keys.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from a TOML file. A missing file yields the defaults.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path);
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("No config file at {:?}, using defaults", path);
            Ok(AppConfig::default())
        }
        Err(e) => Err(Error::Config {
            message: format!("Failed to read config file {}: {e}", path.display()),
        }),
    }
}

/// Loads the settings for this process: the file named by `SHELF_BUDDY_CONFIG`
/// (default `./config.toml`) with environment overrides applied.
///
/// # Errors
/// Returns an error if the settings file exists but is unreadable or invalid.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var("SHELF_BUDDY_CONFIG")
        .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = load_config(&path)?.with_env_overrides();
    tracing::info!(
        "Using ledger {:?} and purchase log {:?}",
        config.ledger_path,
        config.purchase_log_path
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::scratch_dir;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            ledger_path = "data/stock.txt"
            purchase_log_path = "data/sales.txt"
            low_stock_threshold = 10
            expiry_warning_days = 3
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.ledger_path, PathBuf::from("data/stock.txt"));
        assert_eq!(config.purchase_log_path, PathBuf::from("data/sales.txt"));
        assert_eq!(
            config.rules(),
            InventoryRules {
                low_stock_threshold: 10,
                expiry_warning_days: 3,
            }
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse_config("low_stock_threshold = 2").unwrap();
        assert_eq!(config.low_stock_threshold, 2);
        assert_eq!(config.expiry_warning_days, 5);
        assert_eq!(config.ledger_path, PathBuf::from("banco.txt"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = parse_config("ledger = \"x\"");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = scratch_dir();
        let config = load_config(dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = scratch_dir();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "expiry_warning_days = 7\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.expiry_warning_days, 7);
    }
}
