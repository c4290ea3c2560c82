//! Response normalization
//!
//! Flattens one pricing response into tabular rows.
//!
//! # Overview
//!
//! This module provides:
//! - [`NormalizedRow`], one flat record per quoted ride option
//! - [`COLUMNS`], the fixed table schema every writer shares
//! - [`normalize`] / [`normalize_at`], which read `results[0].prices` and
//!   stamp every row with one capture time
//!
//! Only the first search result feeds the table; the warehouse sink keeps
//! the full response.

mod normalizer;
mod row;

pub use normalizer::{cents_to_dollars, normalize, normalize_at, NormalizeContext};
pub use row::{NormalizedRow, COLUMNS, DATE_FORMAT, TIME_FORMAT};
