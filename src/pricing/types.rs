//! Pricing response types
//!
//! The pricing API is external and loosely typed: numbers sometimes arrive as
//! floats or strings and any field may be missing or null. Every scalar is
//! decoded leniently into an `Option`. A structural mismatch (e.g. `results`
//! not being an array) leaves the typed view empty and records why; the raw
//! body is kept either way.

use crate::types::JsonValue;
use serde::{Deserialize, Deserializer, Serialize};

/// Typed view of a pricing response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub search_id: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<SearchResult>,
}

/// One search result; only the first is used for tabular rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub prices: Vec<PriceEntry>,
}

/// One ride option quoted by a provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub provider: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub product: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub service_level: Option<String>,

    /// Lower price bound in cents
    #[serde(default, deserialize_with = "lenient_i64")]
    pub price_min: Option<i64>,

    /// Upper price bound in cents
    #[serde(default, deserialize_with = "lenient_i64")]
    pub price_max: Option<i64>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub currency: Option<String>,

    #[serde(default, deserialize_with = "lenient_wait_window")]
    pub est_pickup_wait_time: Option<WaitWindow>,

    /// Trip duration in seconds
    #[serde(default, deserialize_with = "lenient_i64")]
    pub est_time_after_pickup_till_dropoff: Option<i64>,

    #[serde(default, deserialize_with = "lenient_i64")]
    pub distance_meters: Option<i64>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub surge_multiplier: Option<f64>,
}

/// Estimated pickup wait window in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitWindow {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub min: Option<i64>,

    #[serde(default, deserialize_with = "lenient_i64")]
    pub max: Option<i64>,
}

impl PricingResponse {
    /// Prices of the first result, empty when there is none
    pub fn first_prices(&self) -> &[PriceEntry] {
        self.results
            .first()
            .map(|r| r.prices.as_slice())
            .unwrap_or_default()
    }

    /// Prices of every result, in response order
    pub fn all_prices(&self) -> impl Iterator<Item = &PriceEntry> {
        self.results.iter().flat_map(|r| r.prices.iter())
    }
}

impl PriceEntry {
    pub fn wait_min(&self) -> Option<i64> {
        self.est_pickup_wait_time.and_then(|w| w.min)
    }

    pub fn wait_max(&self) -> Option<i64> {
        self.est_pickup_wait_time.and_then(|w| w.max)
    }
}

/// A fetched response: the untouched body plus its typed view
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    /// Body exactly as returned, archived and stored verbatim
    pub raw: JsonValue,
    pub response: PricingResponse,
    /// Why the typed view is empty when the body has an unexpected shape
    pub decode_error: Option<String>,
}

impl PriceQuote {
    /// Decode the typed view from a raw body
    ///
    /// Never fails: an unexpected shape yields an empty view and sets
    /// `decode_error`.
    pub fn from_raw(raw: JsonValue) -> Self {
        match PricingResponse::deserialize(&raw) {
            Ok(response) => Self {
                raw,
                response,
                decode_error: None,
            },
            Err(e) => Self {
                raw,
                response: PricingResponse::default(),
                decode_error: Some(e.to_string()),
            },
        }
    }

    /// Whether the typed view matches the body
    pub fn is_decoded(&self) -> bool {
        self.decode_error.is_none()
    }

    /// Whether the body carries a `results` key at all
    pub fn has_results(&self) -> bool {
        self.raw.get("results").is_some()
    }
}

// ============================================================================
// Lenient decoding helpers
// ============================================================================

fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        JsonValue::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        JsonValue::String(s) => s.trim().parse::<f64>().ok().map(|f| f.round() as i64),
        _ => None,
    }))
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        JsonValue::String(s) => Some(s),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }))
}

fn lenient_wait_window<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<WaitWindow>, D::Error> {
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        JsonValue::Object(_) => WaitWindow::deserialize(v).ok(),
        _ => None,
    }))
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
