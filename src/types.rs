//! Common types used throughout the collector
//!
//! Reference data (places and pairs) and the coordinate value type shared by
//! the pricing client, the catalog and the sinks.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Identifier of a place within one sample
pub type PlaceId = u32;

// ============================================================================
// Geography
// ============================================================================

/// A latitude/longitude point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components are finite and inside the WGS84 ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// A named geographic point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl Place {
    pub fn new(id: PlaceId, name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id,
            name: name.into(),
            lat,
            lng,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

/// A configured origin/destination reference driving one API request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatePair {
    pub id: u32,
    pub origin_id: PlaceId,
    pub destination_id: PlaceId,
}

impl CoordinatePair {
    pub fn new(id: u32, origin_id: PlaceId, destination_id: PlaceId) -> Self {
        Self {
            id,
            origin_id,
            destination_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_validity() {
        assert!(Coordinates::new(40.758_896, -73.985_130).is_valid());
        assert!(Coordinates::new(-90.0, 180.0).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -180.5).is_valid());
        assert!(!Coordinates::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_place_coordinates() {
        let place = Place::new(1, "Times Square", 40.758_896, -73.985_130);
        assert_eq!(place.coordinates(), Coordinates::new(40.758_896, -73.985_130));
    }

    #[test]
    fn test_pair_deserialize() {
        let pair: CoordinatePair =
            serde_json::from_str(r#"{"id": 3, "origin_id": 5, "destination_id": 6}"#).unwrap();
        assert_eq!(pair, CoordinatePair::new(3, 5, 6));
    }
}
