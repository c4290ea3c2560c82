//! Output module
//!
//! Persists what a collection cycle produces.
//!
//! # Overview
//!
//! This module provides:
//! - [`CloudDestination`]: local or cloud object storage (S3, R2, GCS, Azure)
//! - [`ArtifactStore`]: one immutable JSON object per raw response
//! - [`CsvTableSink`]: the appendable CSV table, behind the [`TableSink`] trait
//! - [`WarehouseSink`]: a DuckDB table with one row per API call

mod artifact;
mod cloud;
mod csv_lines;
mod table;
mod warehouse;

pub use artifact::{ArtifactStore, ARTIFACT_TIMESTAMP_FORMAT};
pub use cloud::CloudDestination;
pub use csv_lines::{encode_lines, header_line, row_lines};
pub use table::{render_append, CsvTableSink, TableSink};
pub use warehouse::{RideOption, WarehouseRecord, WarehouseSink};
