//! Pricing API module
//!
//! One POST per origin/destination pair against the ride pricing endpoint.
//!
//! # Overview
//!
//! - `PriceSource` - the seam the collection runner calls
//! - `PricingClient` - the HTTP implementation with key/secret headers
//! - `PricingResponse` - lenient typed view of the response; absent or
//!   mistyped scalar fields decode as `None`

mod client;
mod types;

pub use client::{LatLng, PriceSource, PricingClient, PricingRequest, DEFAULT_ENDPOINT};
pub use types::{PriceEntry, PriceQuote, PricingResponse, SearchResult, WaitWindow};
