//! Warehouse sink (DuckDB)
//!
//! One row per API call: request coordinates, the raw body as text and a
//! repeated `ride_options` struct column built from every result.

use crate::config::WarehouseConfig;
use crate::error::{Error, Result, ResultExt};
use crate::pricing::{PriceEntry, PriceQuote};
use crate::types::{Coordinates, JsonValue};
use chrono::{DateTime, Utc};
use duckdb::{params, Connection};
use serde::Serialize;
use std::sync::Mutex;
use tracing::{debug, info};

/// Element type of the `ride_options` column
const RIDE_OPTION_TYPE: &str = "STRUCT(\
    provider VARCHAR, \
    product VARCHAR, \
    service_level VARCHAR, \
    price_min_cents BIGINT, \
    price_max_cents BIGINT, \
    currency VARCHAR, \
    wait_time_min BIGINT, \
    wait_time_max BIGINT, \
    trip_time_seconds BIGINT, \
    distance_meters BIGINT, \
    surge_multiplier DOUBLE)";

/// `from_json` structure matching [`RIDE_OPTION_TYPE`]
const RIDE_OPTIONS_JSON_STRUCTURE: &str = r#"[{"provider":"VARCHAR","product":"VARCHAR","service_level":"VARCHAR","price_min_cents":"BIGINT","price_max_cents":"BIGINT","currency":"VARCHAR","wait_time_min":"BIGINT","wait_time_max":"BIGINT","trip_time_seconds":"BIGINT","distance_meters":"BIGINT","surge_multiplier":"DOUBLE"}]"#;

/// One ride option as stored, values unconverted
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RideOption {
    pub provider: Option<String>,
    pub product: Option<String>,
    pub service_level: Option<String>,
    pub price_min_cents: Option<i64>,
    pub price_max_cents: Option<i64>,
    pub currency: Option<String>,
    pub wait_time_min: Option<i64>,
    pub wait_time_max: Option<i64>,
    pub trip_time_seconds: Option<i64>,
    pub distance_meters: Option<i64>,
    pub surge_multiplier: Option<f64>,
}

impl From<&PriceEntry> for RideOption {
    fn from(price: &PriceEntry) -> Self {
        Self {
            provider: price.provider.clone(),
            product: price.product.clone(),
            service_level: price.service_level.clone(),
            price_min_cents: price.price_min,
            price_max_cents: price.price_max,
            currency: price.currency.clone(),
            wait_time_min: price.wait_min(),
            wait_time_max: price.wait_max(),
            trip_time_seconds: price.est_time_after_pickup_till_dropoff,
            distance_meters: price.distance_meters,
            surge_multiplier: price.surge_multiplier,
        }
    }
}

/// One denormalized warehouse row
#[derive(Debug, Clone, PartialEq)]
pub struct WarehouseRecord {
    pub request_timestamp: DateTime<Utc>,
    pub pickup: Coordinates,
    pub destination: Coordinates,
    pub search_id: Option<String>,
    pub raw_response: String,
    pub ride_options: Vec<RideOption>,
}

impl WarehouseRecord {
    /// Build a record from a quote; bodies without `results` are rejected
    pub fn from_quote(
        quote: &PriceQuote,
        pickup: Coordinates,
        destination: Coordinates,
        request_timestamp: DateTime<Utc>,
    ) -> Result<Self> {
        if !quote.has_results() {
            return Err(Error::storage(
                "Response has no 'results' field, not inserting into warehouse",
            ));
        }

        Ok(Self {
            request_timestamp,
            pickup,
            destination,
            search_id: quote.response.search_id.clone().or_else(|| {
                quote
                    .raw
                    .get("search_id")
                    .and_then(JsonValue::as_str)
                    .map(str::to_string)
            }),
            raw_response: serde_json::to_string(&quote.raw)?,
            ride_options: quote.response.all_prices().map(RideOption::from).collect(),
        })
    }
}

/// DuckDB table of [`WarehouseRecord`]s
pub struct WarehouseSink {
    conn: Mutex<Connection>,
    table: String,
}

impl WarehouseSink {
    /// Open (or create) the configured database and table
    pub fn open(config: &WarehouseConfig) -> Result<Self> {
        let conn = match &config.path {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create warehouse directory {}", parent.display())
                    })?;
                }
                Connection::open(path)?
            }
            None => Connection::open_in_memory()?,
        };
        Self::with_connection_and_table(conn, &config.table)
    }

    /// In-memory table, gone when the sink is dropped
    pub fn in_memory(table: &str) -> Result<Self> {
        Self::with_connection_and_table(Connection::open_in_memory()?, table)
    }

    fn with_connection_and_table(conn: Connection, table: &str) -> Result<Self> {
        validate_table_name(table)?;

        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                request_timestamp TIMESTAMP,
                pickup_lat DOUBLE,
                pickup_lng DOUBLE,
                destination_lat DOUBLE,
                destination_lng DOUBLE,
                search_id VARCHAR,
                raw_response VARCHAR,
                ride_options {RIDE_OPTION_TYPE}[]
            );"
        ))?;
        debug!("Warehouse table {table} ready");

        Ok(Self {
            conn: Mutex::new(conn),
            table: table.to_string(),
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Insert one record
    pub fn insert(&self, record: &WarehouseRecord) -> Result<()> {
        let options = serde_json::to_string(&record.ride_options)?;
        let sql = format!(
            "INSERT INTO {} VALUES (CAST(? AS TIMESTAMP), ?, ?, ?, ?, ?, ?, from_json(?, '{RIDE_OPTIONS_JSON_STRUCTURE}'))",
            self.table
        );

        self.with_connection(|conn| {
            conn.execute(
                &sql,
                params![
                    record
                        .request_timestamp
                        .format("%Y-%m-%d %H:%M:%S%.6f")
                        .to_string(),
                    record.pickup.lat,
                    record.pickup.lng,
                    record.destination.lat,
                    record.destination.lng,
                    record.search_id,
                    record.raw_response,
                    options,
                ],
            )
        })?;

        info!(
            "Inserted {} ride options into warehouse table {}",
            record.ride_options.len(),
            self.table
        );
        Ok(())
    }

    /// Number of rows in the table
    pub fn row_count(&self) -> Result<i64> {
        let sql = format!("SELECT count(*) FROM {}", self.table);
        self.with_connection(|conn| conn.query_row(&sql, [], |row| row.get(0)))
    }

    /// Run `f` against the underlying connection
    pub fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> duckdb::Result<T>,
    ) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| Error::storage("Warehouse connection lock poisoned"))?;
        Ok(f(&*conn)?)
    }
}

impl std::fmt::Debug for WarehouseSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WarehouseSink")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

fn validate_table_name(table: &str) -> Result<()> {
    if table.is_empty() || !table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(Error::InvalidConfigValue {
            field: "warehouse table".to_string(),
            message: format!("'{table}' may only contain letters, digits and underscores"),
        });
    }
    Ok(())
}
