//! CLI commands and argument parsing

use crate::config::{CollectorConfig, WarehouseConfig, DEFAULT_WAREHOUSE_TABLE};
use crate::error::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Ride price collector CLI
#[derive(Parser, Debug)]
#[command(name = "ride-price-collector")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Storage for artifacts and the CSV table (local path or cloud URL)
    /// Supports: /path, s3://bucket/path, r2://bucket/path, gs://bucket/path, az://container/path
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Object name of the CSV table
    #[arg(long, global = true)]
    pub csv_object: Option<String>,

    /// Routes file (YAML) replacing the built-in samples
    #[arg(short, long, global = true)]
    pub routes: Option<PathBuf>,

    /// DuckDB database file for the warehouse table
    #[arg(long, global = true)]
    pub warehouse_path: Option<PathBuf>,

    /// Seconds to wait between requests
    #[arg(long, global = true)]
    pub pacing_secs: Option<f64>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect prices for every configured pair once
    Collect,

    /// Quote a single ride
    Quote {
        /// Pickup: landmark name or "lat,lng"
        #[arg(long)]
        from: String,

        /// Destination: landmark name or "lat,lng"
        #[arg(long)]
        to: String,

        /// Print the raw JSON response
        #[arg(long)]
        print_response: bool,

        /// Save the raw response as an artifact
        #[arg(long)]
        save_json: bool,

        /// Insert the response into the warehouse table
        #[arg(long)]
        warehouse: bool,
    },

    /// List landmarks and configured samples
    Places,

    /// Start HTTP trigger mode
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "8080")]
        port: u16,
    },
}

impl Cli {
    /// Apply global flags over environment settings
    pub fn apply_overrides(&self, mut config: CollectorConfig) -> Result<CollectorConfig> {
        if let Some(output) = &self.output {
            config.output.clone_from(output);
        }

        if let Some(name) = &self.csv_object {
            config.csv_object.clone_from(name);
        }

        if let Some(routes) = &self.routes {
            config.routes = Some(routes.clone());
        }

        if let Some(path) = &self.warehouse_path {
            let table = config
                .warehouse
                .take()
                .map_or_else(|| DEFAULT_WAREHOUSE_TABLE.to_string(), |w| w.table);
            config.warehouse = Some(WarehouseConfig {
                path: Some(path.clone()),
                table,
            });
        }

        if let Some(secs) = self.pacing_secs {
            config.pacing =
                Duration::try_from_secs_f64(secs).map_err(|e| Error::InvalidConfigValue {
                    field: "--pacing-secs".to_string(),
                    message: e.to_string(),
                })?;
        }

        Ok(config)
    }
}
