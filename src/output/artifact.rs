//! Raw response archive

use super::cloud::CloudDestination;
use crate::error::Result;
use crate::types::JsonValue;
use bytes::Bytes;
use chrono::{DateTime, Local};
use tracing::info;

/// Capture timestamp format used in artifact names
pub const ARTIFACT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%6f";

/// Writes each raw response once, as indented JSON
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    destination: CloudDestination,
    prefix: String,
}

impl ArtifactStore {
    pub fn new(destination: CloudDestination, prefix: impl Into<String>) -> Self {
        Self {
            destination,
            prefix: prefix.into().trim_matches('/').to_string(),
        }
    }

    /// Object name for an artifact captured at `captured_at`
    pub fn object_name(&self, stem: &str, captured_at: DateTime<Local>) -> String {
        let file = format!(
            "data_{stem}_{}.json",
            captured_at.format(ARTIFACT_TIMESTAMP_FORMAT)
        );
        if self.prefix.is_empty() {
            file
        } else {
            format!("{}/{file}", self.prefix)
        }
    }

    /// Store the response for one configured pair
    pub async fn store(&self, raw: &JsonValue, label: &str, pair_id: u32) -> Result<String> {
        self.store_as(raw, &format!("{}_pair{pair_id}", sanitize(label)))
            .await
    }

    /// Store the response for an ad-hoc route (e.g. "Times Square to JFK")
    pub async fn store_route(&self, raw: &JsonValue, route: &str) -> Result<String> {
        self.store_as(raw, &sanitize(route)).await
    }

    async fn store_as(&self, raw: &JsonValue, stem: &str) -> Result<String> {
        let name = self.object_name(stem, Local::now());
        let body = serde_json::to_vec_pretty(raw)?;

        let location = self.destination.write(&name, Bytes::from(body)).await?;
        info!("Saved raw response to {location}");
        Ok(location)
    }
}

fn sanitize(stem: &str) -> String {
    stem.replace(['/', ' '], "_")
}
