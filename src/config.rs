//! Collector configuration
//!
//! Credentials and settings come from the process environment (after an
//! optional `.env` file is loaded by the binary); CLI flags override them.
//! Lookups go through a closure so tests never touch the real environment.

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::pricing::DEFAULT_ENDPOINT;
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Environment variable names
// ============================================================================

pub const API_KEY_VAR: &str = "BELLHOP_API_KEY";
pub const API_SECRET_VAR: &str = "BELLHOP_API_SECRET";
pub const API_URL_VAR: &str = "BELLHOP_API_URL";
pub const OUTPUT_VAR: &str = "COLLECTOR_OUTPUT";
pub const BUCKET_VAR: &str = "GCS_BUCKET_NAME";
pub const CSV_OBJECT_VAR: &str = "COLLECTOR_CSV_OBJECT";
pub const PACING_VAR: &str = "COLLECTOR_PACING_SECS";
pub const ROUTES_VAR: &str = "COLLECTOR_ROUTES";
pub const WAREHOUSE_PATH_VAR: &str = "WAREHOUSE_PATH";
pub const WAREHOUSE_TABLE_VAR: &str = "WAREHOUSE_TABLE";

pub const DEFAULT_OUTPUT: &str = "./data";
pub const DEFAULT_CSV_OBJECT: &str = "ride_prices.csv";
pub const DEFAULT_JSON_PREFIX: &str = "json";
pub const DEFAULT_WAREHOUSE_TABLE: &str = "price_comparisons";
pub const DEFAULT_PACING: Duration = Duration::from_secs(2);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// Credentials
// ============================================================================

/// Pricing API key and secret
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Read both values from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read both values through `lookup`; empty values count as missing
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::missing_credential(name))
        };
        Ok(Self {
            api_key: read(API_KEY_VAR)?,
            api_secret: read(API_SECRET_VAR)?,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"***")
            .field("api_secret", &"***")
            .finish()
    }
}

// ============================================================================
// Collector settings
// ============================================================================

/// Warehouse sink settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseConfig {
    /// DuckDB database file; `None` keeps the table in memory
    pub path: Option<PathBuf>,
    pub table: String,
}

/// Everything a collection run needs besides credentials
#[derive(Debug, Clone, PartialEq)]
pub struct CollectorConfig {
    /// Pricing endpoint URL
    pub endpoint: String,
    /// Storage URL for artifacts and the CSV table (local path or cloud URL)
    pub output: String,
    /// Object name of the CSV table inside `output`
    pub csv_object: String,
    /// Prefix for JSON artifacts inside `output`
    pub json_prefix: String,
    /// Fixed delay after each pair
    pub pacing: Duration,
    /// Request timeout
    pub timeout: Duration,
    pub warehouse: Option<WarehouseConfig>,
    /// Routes file replacing the built-in samples
    pub routes: Option<PathBuf>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            output: DEFAULT_OUTPUT.to_string(),
            csv_object: DEFAULT_CSV_OBJECT.to_string(),
            json_prefix: DEFAULT_JSON_PREFIX.to_string(),
            pacing: DEFAULT_PACING,
            timeout: DEFAULT_TIMEOUT,
            warehouse: None,
            routes: None,
        }
    }
}

impl CollectorConfig {
    /// Settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Settings through `lookup`, falling back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(endpoint) = get(API_URL_VAR) {
            config.endpoint = endpoint;
        }

        if let Some(output) = get(OUTPUT_VAR) {
            config.output = output;
        } else if let Some(bucket) = get(BUCKET_VAR) {
            config.output = format!("gs://{bucket}");
        }

        if let Some(name) = get(CSV_OBJECT_VAR) {
            config.csv_object = name;
        }

        if let Some(secs) = get(PACING_VAR) {
            let secs: f64 = secs.trim().parse().map_err(|_| Error::InvalidConfigValue {
                field: PACING_VAR.to_string(),
                message: format!("'{secs}' is not a number of seconds"),
            })?;
            config.pacing = Duration::try_from_secs_f64(secs).map_err(|e| {
                Error::InvalidConfigValue {
                    field: PACING_VAR.to_string(),
                    message: e.to_string(),
                }
            })?;
        }

        config.routes = get(ROUTES_VAR).map(PathBuf::from);

        let warehouse_path = get(WAREHOUSE_PATH_VAR);
        let warehouse_table = get(WAREHOUSE_TABLE_VAR);
        if warehouse_path.is_some() || warehouse_table.is_some() {
            config.warehouse = Some(WarehouseConfig {
                path: warehouse_path.map(PathBuf::from),
                table: warehouse_table.unwrap_or_else(|| DEFAULT_WAREHOUSE_TABLE.to_string()),
            });
        }

        Ok(config)
    }

    /// The samples to collect: the routes file if set, else the built-in ones
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.routes {
            Some(path) => Catalog::from_yaml_file(path),
            None => Ok(Catalog::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_credentials_present() {
        let creds =
            Credentials::from_lookup(lookup(&[(API_KEY_VAR, "key"), (API_SECRET_VAR, "secret")]))
                .unwrap();
        assert_eq!(creds, Credentials::new("key", "secret"));
    }

    #[test]
    fn test_credentials_missing_secret() {
        let err = Credentials::from_lookup(lookup(&[(API_KEY_VAR, "key")])).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains(API_SECRET_VAR));
    }

    #[test]
    fn test_credentials_blank_counts_as_missing() {
        let err =
            Credentials::from_lookup(lookup(&[(API_KEY_VAR, "  "), (API_SECRET_VAR, "secret")]))
                .unwrap_err();
        assert!(err.to_string().contains(API_KEY_VAR));
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let debug = format!("{:?}", Credentials::new("key-123", "secret-456"));
        assert!(!debug.contains("key-123"));
        assert!(!debug.contains("secret-456"));
    }

    #[test]
    fn test_config_defaults() {
        let config = CollectorConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CollectorConfig::default());
        assert_eq!(config.output, "./data");
        assert_eq!(config.csv_object, "ride_prices.csv");
        assert_eq!(config.pacing, Duration::from_secs(2));
        assert!(config.warehouse.is_none());
    }

    #[test]
    fn test_config_bucket_becomes_gcs_output() {
        let config =
            CollectorConfig::from_lookup(lookup(&[(BUCKET_VAR, "bellhop-ride-data")])).unwrap();
        assert_eq!(config.output, "gs://bellhop-ride-data");
    }

    #[test]
    fn test_config_explicit_output_wins_over_bucket() {
        let config = CollectorConfig::from_lookup(lookup(&[
            (BUCKET_VAR, "bellhop-ride-data"),
            (OUTPUT_VAR, "/tmp/rides"),
        ]))
        .unwrap();
        assert_eq!(config.output, "/tmp/rides");
    }

    #[test]
    fn test_config_pacing_and_warehouse() {
        let config = CollectorConfig::from_lookup(lookup(&[
            (PACING_VAR, "0.5"),
            (WAREHOUSE_PATH_VAR, "/tmp/rides.duckdb"),
        ]))
        .unwrap();
        assert_eq!(config.pacing, Duration::from_millis(500));
        assert_eq!(
            config.warehouse,
            Some(WarehouseConfig {
                path: Some(PathBuf::from("/tmp/rides.duckdb")),
                table: DEFAULT_WAREHOUSE_TABLE.to_string(),
            })
        );
    }

    #[test]
    fn test_config_invalid_pacing() {
        let err = CollectorConfig::from_lookup(lookup(&[(PACING_VAR, "soon")])).unwrap_err();
        assert!(err.is_configuration());

        let err = CollectorConfig::from_lookup(lookup(&[(PACING_VAR, "-1")])).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_config_catalog_defaults_to_builtin() {
        let config = CollectorConfig::default();
        assert_eq!(config.catalog().unwrap(), Catalog::builtin());
    }
}
