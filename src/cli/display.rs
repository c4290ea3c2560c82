//! Human-readable rendering for the terminal

use crate::catalog::Sample;
use crate::normalize::cents_to_dollars;
use crate::pricing::{PriceEntry, PricingResponse};
use crate::types::Place;
use std::fmt::Write as _;

const METERS_TO_MILES: f64 = 0.000_621_371;

/// Ride options grouped by provider, cheapest first within each group
pub fn render_quote(response: &PricingResponse) -> String {
    let prices = response.first_prices();
    if prices.is_empty() {
        return "No ride options available\n".to_string();
    }

    // providers in first-seen order
    let mut groups: Vec<(&str, Vec<&PriceEntry>)> = Vec::new();
    for price in prices {
        let provider = price.provider.as_deref().unwrap_or("Unknown");
        match groups.iter_mut().find(|(name, _)| *name == provider) {
            Some((_, options)) => options.push(price),
            None => groups.push((provider, vec![price])),
        }
    }

    let rule = "-".repeat(80);
    let mut out = String::new();
    for (provider, mut options) in groups {
        options.sort_by_key(|p| p.price_min.unwrap_or(0));

        let _ = writeln!(out, "\n{provider} OPTIONS:");
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(
            out,
            "{:<20} {:<15} {:<20} {:<15} {:<10}",
            "PRODUCT", "PRICE", "WAIT TIME", "TRIP TIME", "DISTANCE"
        );
        let _ = writeln!(out, "{rule}");

        for option in options {
            let product = option.product.as_deref().unwrap_or("Unknown");
            let price = format!("${}", cents_to_dollars(option.price_min.unwrap_or(0)));
            let wait = format!("{} min", option.wait_min().unwrap_or(0) / 60);
            let trip = format!(
                "{:.1} min",
                option.est_time_after_pickup_till_dropoff.unwrap_or(0) as f64 / 60.0
            );
            let distance = format!(
                "{:.2} miles",
                option.distance_meters.unwrap_or(0) as f64 * METERS_TO_MILES
            );
            let _ = writeln!(
                out,
                "{product:<20} {price:<15} {wait:<20} {trip:<15} {distance:<10}"
            );
        }
    }

    let _ = writeln!(
        out,
        "\nSearch ID: {}",
        response.search_id.as_deref().unwrap_or("-")
    );
    if let Some(timestamp) = &response.timestamp {
        let _ = writeln!(out, "Timestamp: {timestamp}");
    }
    out
}

/// Landmark table
pub fn render_places(places: &[(&str, Place)]) -> String {
    let rule = "-".repeat(72);
    let mut out = String::new();
    let _ = writeln!(out, "Available landmarks:");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{:<16} {:<28} COORDINATES", "KEY", "NAME");
    let _ = writeln!(out, "{rule}");
    for (key, place) in places {
        let _ = writeln!(
            out,
            "{key:<16} {:<28} ({:.6}, {:.6})",
            place.name, place.lat, place.lng
        );
    }
    out
}

/// Configured samples and their pairs
pub fn render_samples(samples: &[Sample]) -> String {
    let mut out = String::new();
    for sample in samples {
        let _ = writeln!(out, "\n{} ({} pairs)", sample.label, sample.pairs.len());
        for pair in &sample.pairs {
            let name = |id| {
                sample
                    .places
                    .get(id)
                    .map_or_else(|| format!("<unknown place {id}>"), |p| p.name.clone())
            };
            let _ = writeln!(
                out,
                "  {:>3}. {} -> {}",
                pair.id,
                name(pair.origin_id),
                name(pair.destination_id)
            );
        }
    }
    out
}
