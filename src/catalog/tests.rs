//! Tests for the reference data module

use super::*;
use crate::error::Error;
use crate::types::{Coordinates, CoordinatePair, Place};
use test_case::test_case;

// ============================================================================
// PlaceCatalog Tests
// ============================================================================

#[test]
fn test_place_catalog_lookup() {
    let catalog = PlaceCatalog::new(vec![
        Place::new(1, "Times Square", 40.758_896, -73.985_130),
        Place::new(2, "Empire State Building", 40.748_817, -73.985_428),
    ])
    .unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get(2).unwrap().name, "Empire State Building");
    assert!(catalog.get(3).is_none());
}

#[test]
fn test_place_catalog_rejects_duplicate_ids() {
    let err = PlaceCatalog::new(vec![
        Place::new(1, "A", 0.0, 0.0),
        Place::new(1, "B", 1.0, 1.0),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("Duplicate place id 1"));
}

#[test]
fn test_resolve_pair() {
    let catalog = PlaceCatalog::new(vec![
        Place::new(1, "A", 0.0, 0.0),
        Place::new(2, "B", 1.0, 1.0),
    ])
    .unwrap();

    let (origin, destination) = catalog.resolve(&CoordinatePair::new(1, 1, 2)).unwrap();
    assert_eq!(origin.name, "A");
    assert_eq!(destination.name, "B");

    assert!(catalog.resolve(&CoordinatePair::new(2, 1, 99)).is_none());
}

// ============================================================================
// Built-in Samples
// ============================================================================

#[test]
fn test_builtin_samples() {
    let catalog = Catalog::builtin();
    assert_eq!(catalog.samples.len(), 2);
    assert_eq!(catalog.pair_count(), 20);

    let sample1 = &catalog.samples[0];
    assert_eq!(sample1.label, "Sample1");
    assert_eq!(sample1.places.len(), 20);

    // every built-in pair resolves
    for sample in &catalog.samples {
        for pair in &sample.pairs {
            assert!(sample.places.resolve(pair).is_some(), "{pair:?}");
        }
    }

    let (origin, destination) = sample1.places.resolve(&sample1.pairs[0]).unwrap();
    assert_eq!(origin.name, "15 Central Park West");
    assert_eq!(destination.name, "Goldman Sachs HQ");
}

#[test]
fn test_builtin_place_tables_have_unique_ids() {
    for sample in builtin_samples() {
        assert_eq!(sample.places.len(), 20, "{}", sample.label);
        assert_eq!(sample.pairs.len(), 10, "{}", sample.label);
    }
}

// ============================================================================
// YAML Loading
// ============================================================================

#[test]
fn test_catalog_from_yaml() {
    let yaml = r"
samples:
  - label: Midtown
    places:
      - { id: 1, name: Times Square, lat: 40.758896, lng: -73.985130 }
      - { id: 2, name: Empire State Building, lat: 40.748817, lng: -73.985428 }
    pairs:
      - { id: 1, origin_id: 1, destination_id: 2 }
";
    let catalog = Catalog::from_yaml_str(yaml).unwrap();
    assert_eq!(catalog.samples.len(), 1);
    assert_eq!(catalog.samples[0].label, "Midtown");
    assert_eq!(catalog.samples[0].pairs, vec![CoordinatePair::new(1, 1, 2)]);
}

#[test]
fn test_catalog_from_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("routes.yaml");
    std::fs::write(
        &path,
        "samples:\n  - label: Empty\n",
    )
    .unwrap();

    let catalog = Catalog::from_yaml_file(&path).unwrap();
    assert_eq!(catalog.samples[0].label, "Empty");
    assert!(catalog.samples[0].pairs.is_empty());
}

#[test]
fn test_catalog_from_missing_file() {
    let err = Catalog::from_yaml_file("/nonexistent/routes.yaml").unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_catalog_from_invalid_yaml() {
    let err = Catalog::from_yaml_str("samples: [ {label: ").unwrap_err();
    assert!(matches!(err, Error::YamlParse(_)));
}

// ============================================================================
// Location Input
// ============================================================================

#[test_case("times_square", "Times Square" ; "key")]
#[test_case("Times Square", "Times Square" ; "display name")]
#[test_case("EMPIRE STATE", "Empire State Building" ; "upper case key with space")]
#[test_case("  jfk_airport ", "JFK Airport" ; "surrounding whitespace")]
fn test_find_landmark(input: &str, expected: &str) {
    assert_eq!(find_landmark(input).unwrap().name, expected);
}

#[test]
fn test_find_landmark_unknown() {
    assert!(find_landmark("atlantis").is_none());
}

#[test]
fn test_location_input_coordinates() {
    let input = LocationInput::parse("40.7, -73.9").unwrap();
    assert_eq!(input, LocationInput::Custom(Coordinates::new(40.7, -73.9)));

    let place = input.into_place();
    assert_eq!(place.name, "Custom (40.7, -73.9)");
    assert_eq!(place.lat, 40.7);
}

#[test]
fn test_location_input_landmark() {
    let place: LocationInput = "grand central".parse().unwrap();
    assert_eq!(place.into_place().name, "Grand Central Terminal");
}

#[test_case("40.7" ; "missing longitude")]
#[test_case("40.7,-73.9,1" ; "three components")]
#[test_case("north,-73.9" ; "not a number")]
#[test_case("95.0,-73.9" ; "latitude out of range")]
fn test_location_input_invalid_coordinates(input: &str) {
    let result = LocationInput::parse(input);
    match input.contains(',') {
        true => assert!(matches!(result, Err(Error::InvalidCoordinates { .. }))),
        false => assert!(matches!(result, Err(Error::UnknownLocation { .. }))),
    }
}
