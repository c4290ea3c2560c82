//! Collection run module
//!
//! Drives every configured pair through fetch, archive, normalize and append.
//!
//! # Overview
//!
//! The collect module provides:
//! - `CollectionRunner` - sequential per-pair pipeline with fixed pacing
//! - `RunSummary` - counters and duration reported at the end of a run
//!
//! Failures never cross the pair boundary: they are logged, counted in the
//! summary and the run moves on to the next pair.

mod runner;
mod types;

pub use runner::CollectionRunner;
pub use types::{PairOutcome, RunSummary};
