//! HTTP client module
//!
//! Thin reqwest wrapper shared by the pricing client.
//!
//! # Features
//!
//! - **Default headers**: credentials and content negotiation set once
//! - **Status classification**: any non-2xx answer becomes `Error::HttpStatus`
//! - **Single attempt**: no retries; callers treat a failure as final

mod client;

pub use client::{HttpClient, HttpClientConfig};

#[cfg(test)]
mod tests;
