//! Pricing response to row conversion

use super::row::{NormalizedRow, DATE_FORMAT, TIME_FORMAT};
use crate::pricing::{PriceEntry, PricingResponse};
use chrono::{Local, NaiveDateTime};

/// Names attached to every row of one response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeContext {
    pub pickup_name: String,
    pub destination_name: String,
    /// Sample the pair belongs to; empty cell when `None`
    pub sample_label: Option<String>,
}

impl NormalizeContext {
    pub fn new(pickup_name: impl Into<String>, destination_name: impl Into<String>) -> Self {
        Self {
            pickup_name: pickup_name.into(),
            destination_name: destination_name.into(),
            sample_label: None,
        }
    }

    #[must_use]
    pub fn with_sample(mut self, label: impl Into<String>) -> Self {
        self.sample_label = Some(label.into());
        self
    }
}

/// Normalize a response, stamped with the current local time
pub fn normalize(response: &PricingResponse, context: &NormalizeContext) -> Vec<NormalizedRow> {
    normalize_at(response, context, Local::now().naive_local())
}

/// Normalize a response, stamped with `captured_at`
///
/// Reads only `results[0].prices`. Absent or empty prices give no rows.
/// Rows keep the response's array order.
pub fn normalize_at(
    response: &PricingResponse,
    context: &NormalizeContext,
    captured_at: NaiveDateTime,
) -> Vec<NormalizedRow> {
    let date = captured_at.format(DATE_FORMAT).to_string();
    let time = captured_at.format(TIME_FORMAT).to_string();
    let search_id = response.search_id.clone().unwrap_or_default();

    response
        .first_prices()
        .iter()
        .map(|price| NormalizedRow {
            date: date.clone(),
            time: time.clone(),
            search_id: search_id.clone(),
            sample_type: context.sample_label.clone().unwrap_or_default(),
            pickup: context.pickup_name.clone(),
            destination: context.destination_name.clone(),
            ..row_for(price)
        })
        .collect()
}

fn row_for(price: &PriceEntry) -> NormalizedRow {
    NormalizedRow {
        provider: price.provider.clone().unwrap_or_default(),
        product: price.product.clone().unwrap_or_default(),
        service_level: price.service_level.clone().unwrap_or_default(),
        price_min_dollars: cents_to_dollars(price.price_min.unwrap_or(0)),
        price_max_dollars: cents_to_dollars(price.price_max.unwrap_or(0)),
        wait_min_seconds: Some(price.wait_min().unwrap_or(0)),
        // zero and absent both mean "no upper bound reported"
        wait_max_seconds: price.wait_max().filter(|&w| w != 0),
        trip_seconds: Some(price.est_time_after_pickup_till_dropoff.unwrap_or(0)),
        distance_meters: Some(price.distance_meters.unwrap_or(0)),
        surge_multiplier: Some(price.surge_multiplier.unwrap_or(1.0)),
        ..NormalizedRow::default()
    }
}

/// Render integer cents as dollars with exactly two decimals
pub fn cents_to_dollars(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}
