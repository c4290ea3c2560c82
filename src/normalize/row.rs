//! Normalized row type and table schema

use serde::{Deserialize, Serialize};

/// Capture date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Capture time format (local wall clock)
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Table columns, in the order they are written
pub const COLUMNS: [&str; 16] = [
    "date",
    "time",
    "search_id",
    "sample_type",
    "pickup",
    "destination",
    "provider",
    "product",
    "service_level",
    "price_min_dollars",
    "price_max_dollars",
    "wait_min_seconds",
    "wait_max_seconds",
    "trip_seconds",
    "distance_meters",
    "surge_multiplier",
];

/// One ride option, flattened for tabular storage
///
/// Numeric fields are `None` when there is nothing to write; they serialize
/// as an empty cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizedRow {
    pub date: String,
    pub time: String,
    pub search_id: String,
    pub sample_type: String,
    pub pickup: String,
    pub destination: String,
    pub provider: String,
    pub product: String,
    pub service_level: String,
    pub price_min_dollars: String,
    pub price_max_dollars: String,
    pub wait_min_seconds: Option<i64>,
    pub wait_max_seconds: Option<i64>,
    pub trip_seconds: Option<i64>,
    pub distance_meters: Option<i64>,
    pub surge_multiplier: Option<f64>,
}

impl NormalizedRow {
    /// Cell value for a column; unknown columns are empty
    pub fn field(&self, column: &str) -> String {
        fn int(v: Option<i64>) -> String {
            v.map(|n| n.to_string()).unwrap_or_default()
        }

        match column {
            "date" => self.date.clone(),
            "time" => self.time.clone(),
            "search_id" => self.search_id.clone(),
            "sample_type" => self.sample_type.clone(),
            "pickup" => self.pickup.clone(),
            "destination" => self.destination.clone(),
            "provider" => self.provider.clone(),
            "product" => self.product.clone(),
            "service_level" => self.service_level.clone(),
            "price_min_dollars" => self.price_min_dollars.clone(),
            "price_max_dollars" => self.price_max_dollars.clone(),
            "wait_min_seconds" => int(self.wait_min_seconds),
            "wait_max_seconds" => int(self.wait_max_seconds),
            "trip_seconds" => int(self.trip_seconds),
            "distance_meters" => int(self.distance_meters),
            "surge_multiplier" => self
                .surge_multiplier
                .map(|s| format!("{s:?}"))
                .unwrap_or_default(),
            _ => String::new(),
        }
    }

    /// All cells in [`COLUMNS`] order
    pub fn record(&self) -> Vec<String> {
        COLUMNS.iter().map(|c| self.field(c)).collect()
    }
}
