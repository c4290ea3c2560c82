// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Ride Price Collector
//!
//! Collects ride-pricing quotes for fixed origin/destination pairs and keeps
//! them as raw JSON artifacts, an appendable CSV table and, optionally, a
//! DuckDB warehouse table.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ride_price_collector::{CollectionRunner, CollectorConfig, Credentials, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let credentials = Credentials::from_env()?;
//!     let config = CollectorConfig::from_env()?;
//!
//!     let runner = CollectionRunner::from_config(&config, &credentials)?;
//!     let summary = runner.run().await;
//!     println!("{summary}");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        CollectionRunner                          │
//! │   for each pair: fetch → archive → normalize → append → pace     │
//! └──────────────────────────────────────────────────────────────────┘
//!                                 │
//! ┌────────────┬──────────────┬───┴──────────┬──────────────────────┐
//! │  Catalog   │   Pricing    │  Normalize   │        Output        │
//! ├────────────┼──────────────┼──────────────┼──────────────────────┤
//! │ Samples    │ Key/secret   │ First result │ JSON artifacts       │
//! │ Landmarks  │ POST, no     │ Cents → $    │ CSV table (RMW)      │
//! │ YAML       │ retry        │ Fixed schema │ DuckDB warehouse     │
//! └────────────┴──────────────┴──────────────┴──────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the collector
pub mod error;

/// Common types and type aliases
pub mod types;

/// Credentials and collector settings
pub mod config;

/// Places, pairs, samples and landmarks
pub mod catalog;

/// Single-attempt HTTP client
pub mod http;

/// Pricing API client and response types
pub mod pricing;

/// Response to row normalization
pub mod normalize;

/// Artifacts, CSV table and warehouse sinks
pub mod output;

/// Sequential collection runs
pub mod collect;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use catalog::{Catalog, Sample};
pub use collect::{CollectionRunner, RunSummary};
pub use config::{CollectorConfig, Credentials};
pub use normalize::{normalize, NormalizedRow};
pub use pricing::{PriceQuote, PriceSource, PricingClient};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
