//! Pricing API client

use super::types::PriceQuote;
use crate::config::Credentials;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use crate::types::{Coordinates, JsonValue};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Production pricing endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.bellhop.me/api/rich-intelligent-pricing";

/// Anything that can quote a ride between two points
///
/// A failure is final for that pair; implementations never retry.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch(&self, origin: Coordinates, destination: Coordinates) -> Result<PriceQuote>;
}

/// Wire body of a pricing request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricingRequest {
    pub pickup: LatLng,
    pub destination: LatLng,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Coordinates> for LatLng {
    fn from(c: Coordinates) -> Self {
        Self {
            latitude: c.lat,
            longitude: c.lng,
        }
    }
}

impl PricingRequest {
    pub fn new(origin: Coordinates, destination: Coordinates) -> Self {
        Self {
            pickup: origin.into(),
            destination: destination.into(),
        }
    }
}

/// HTTP pricing client authenticated by key/secret headers
#[derive(Debug, Clone)]
pub struct PricingClient {
    http: HttpClient,
    endpoint: String,
}

impl PricingClient {
    /// Create a client for the production endpoint
    pub fn new(credentials: &Credentials) -> Result<Self> {
        Self::with_endpoint(credentials, DEFAULT_ENDPOINT, Duration::from_secs(30))
    }

    /// Create a client for a specific endpoint
    pub fn with_endpoint(
        credentials: &Credentials,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let config = HttpClientConfig::builder()
            .timeout(timeout)
            .header("accept", "application/json")
            .header("X-API-KEY", credentials.api_key.as_str())
            .header("X-API-SECRET", credentials.api_secret.as_str())
            .build();

        Ok(Self {
            http: HttpClient::with_config(config)?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PriceSource for PricingClient {
    async fn fetch(&self, origin: Coordinates, destination: Coordinates) -> Result<PriceQuote> {
        let request = PricingRequest::new(origin, destination);
        debug!("Requesting prices {} -> {}", origin, destination);

        let body = serde_json::to_value(request)?;
        let raw: JsonValue = self.http.post_json(&self.endpoint, &body).await?;

        Ok(PriceQuote::from_raw(raw))
    }
}
