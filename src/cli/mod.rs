//! CLI module
//!
//! Command-line interface for the collector.
//!
//! # Commands
//!
//! - `collect` - Run every configured pair once
//! - `quote` - Quote a single ride between landmarks or coordinates
//! - `places` - List landmarks and configured samples
//! - `serve` - Start the HTTP trigger

mod commands;
mod display;
mod runner;
mod server;

pub use commands::{Cli, Commands};
pub use display::{render_places, render_quote, render_samples};
pub use runner::Runner;
pub use server::{router, serve};

#[cfg(test)]
mod tests;
