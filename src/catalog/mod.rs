//! Reference data module
//!
//! Places, coordinate pairs and the samples that group them.
//!
//! # Overview
//!
//! - `PlaceCatalog` - id-keyed place lookup built once per run
//! - `Sample` / `Catalog` - labelled pair lists, built in or loaded from YAML
//! - `LocationInput` - free-form "lat,lng" text or a named landmark

mod builtin;
mod location;
mod types;

pub use builtin::{builtin_samples, landmarks};
pub use location::{find_landmark, LocationInput};
pub use types::{Catalog, PlaceCatalog, Sample};

#[cfg(test)]
mod tests;
