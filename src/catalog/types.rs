//! Catalog types
//!
//! Samples are immutable once built; the runner receives them by value.

use crate::error::{Error, Result};
use crate::types::{CoordinatePair, Place, PlaceId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Places of one sample, keyed by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceCatalog {
    places: BTreeMap<PlaceId, Place>,
}

impl PlaceCatalog {
    /// Build a catalog, rejecting duplicate ids
    pub fn new(places: impl IntoIterator<Item = Place>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for place in places {
            let id = place.id;
            if map.insert(id, place).is_some() {
                return Err(Error::config(format!("Duplicate place id {id}")));
            }
        }
        Ok(Self { places: map })
    }

    /// Look up a place by id
    pub fn get(&self, id: PlaceId) -> Option<&Place> {
        self.places.get(&id)
    }

    /// Places in id order
    pub fn iter(&self) -> impl Iterator<Item = &Place> {
        self.places.values()
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Resolve both ends of a pair
    pub fn resolve(&self, pair: &CoordinatePair) -> Option<(&Place, &Place)> {
        Some((self.get(pair.origin_id)?, self.get(pair.destination_id)?))
    }
}

/// A labelled list of pairs over its own place table
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Label written into every row and artifact name (e.g. "Sample1")
    pub label: String,
    pub places: PlaceCatalog,
    pub pairs: Vec<CoordinatePair>,
}

impl Sample {
    pub fn new(
        label: impl Into<String>,
        places: impl IntoIterator<Item = Place>,
        pairs: Vec<CoordinatePair>,
    ) -> Result<Self> {
        Ok(Self {
            label: label.into(),
            places: PlaceCatalog::new(places)?,
            pairs,
        })
    }
}

/// All samples driven by one collection run
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub samples: Vec<Sample>,
}

/// YAML document shape for a routes file
#[derive(Debug, Deserialize, Serialize)]
struct CatalogFile {
    samples: Vec<SampleFile>,
}

#[derive(Debug, Deserialize, Serialize)]
struct SampleFile {
    label: String,
    #[serde(default)]
    places: Vec<Place>,
    #[serde(default)]
    pairs: Vec<CoordinatePair>,
}

impl Catalog {
    /// The samples shipped with the collector
    pub fn builtin() -> Self {
        Self {
            samples: super::builtin_samples(),
        }
    }

    /// Parse a routes document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        let samples = file
            .samples
            .into_iter()
            .map(|s| Sample::new(s.label, s.places, s.pairs))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { samples })
    }

    /// Load a routes file from disk
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read routes file {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Total number of pairs across samples
    pub fn pair_count(&self) -> usize {
        self.samples.iter().map(|s| s.pairs.len()).sum()
    }
}
