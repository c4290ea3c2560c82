//! Built-in routes and landmarks

use super::types::Sample;
use crate::types::{CoordinatePair, Place};

/// Luxury residences and hotels to corporate headquarters
const SAMPLE1_PLACES: &[(u32, &str, f64, f64)] = &[
    (1, "15 Central Park West", 40.769_000, -73.981_400),
    (2, "Goldman Sachs HQ", 40.714_700, -74.013_600),
    (3, "Central Park Tower", 40.765_900, -73.982_000),
    (4, "JP Morgan HQ", 40.755_600, -73.977_500),
    (5, "432 Park Avenue", 40.761_600, -73.971_800),
    (6, "CitiGroup HQ", 40.720_600, -74.012_800),
    (7, "15 Hudson Yards", 40.753_600, -74.002_200),
    (8, "McKinsey (WTC)", 40.712_800, -74.011_900),
    (9, "One57 (157 W 57th St)", 40.765_300, -73.979_000),
    (10, "BCG (Hudson Yards)", 40.753_600, -74.002_200),
    (11, "220 Central Park South", 40.766_700, -73.980_900),
    (12, "Google NYC", 40.740_800, -74.003_300),
    (13, "Four Seasons Hotel New York", 40.762_600, -73.969_700),
    (14, "Skadden Arps", 40.751_700, -73.997_200),
    (15, "The Beekman (Thompson Hotel)", 40.711_200, -74.006_600),
    (16, "Morgan Stanley HQ", 40.758_300, -73.968_600),
    (17, "The St. Regis New York", 40.761_600, -73.974_400),
    (18, "AIG", 40.705_600, -74.009_100),
    (19, "Four Seasons Hotel New York Downtown", 40.712_600, -74.009_700),
    (20, "Bain & Company", 40.756_200, -73.981_100),
];

/// Random Manhattan points with nearly identical trip distances
const SAMPLE2_PLACES: &[(u32, &str, f64, f64)] = &[
    (1, "Random Origin 1", 40.794_705, -73.971_795),
    (2, "Random Destination 1", 40.739_203, -74.000_226),
    (3, "Random Origin 2", 40.721_926, -74.003_187),
    (4, "Random Destination 2", 40.711_705, -74.007_952),
    (5, "Random Origin 3", 40.744_180, -73.998_954),
    (6, "Random Destination 3", 40.782_621, -73.954_126),
    (7, "Random Origin 4", 40.710_470, -74.007_748),
    (8, "Random Destination 4", 40.750_068, -73.991_665),
    (9, "Random Origin 5", 40.771_169, -73.957_614),
    (10, "Random Destination 5", 40.786_449, -73.976_858),
    (11, "Random Origin 6", 40.716_300, -74.004_792),
    (12, "Random Destination 6", 40.747_133, -74.000_472),
    (13, "Random Origin 7", 40.706_267, -74.012_561),
    (14, "Random Destination 7", 40.726_520, -73.996_706),
    (15, "Random Origin 8", 40.782_064, -73.956_258),
    (16, "Random Destination 8", 40.737_330, -73.998_871),
    (17, "Random Origin 9", 40.804_611, -73.954_223),
    (18, "Random Destination 9", 40.749_035, -73.989_995),
    (19, "Random Origin 10", 40.780_999, -73.946_376),
    (20, "Random Destination 10", 40.748_841, -73.993_437),
];

/// Landmarks usable by name on the command line
const LANDMARKS: &[(&str, &str, f64, f64)] = &[
    ("times_square", "Times Square", 40.758_896, -73.985_130),
    ("empire_state", "Empire State Building", 40.748_817, -73.985_428),
    ("grand_central", "Grand Central Terminal", 40.7527, -73.9772),
    ("jfk_airport", "JFK Airport", 40.6413, -73.7781),
    ("laguardia", "LaGuardia Airport", 40.7769, -73.8740),
    ("central_park", "Central Park", 40.7812, -73.9665),
    ("wall_street", "Wall Street", 40.7068, -74.0089),
    ("brooklyn_bridge", "Brooklyn Bridge", 40.7061, -73.9969),
    ("williamsburg", "Williamsburg", 40.7081, -73.9571),
    ("hudson_yards", "Hudson Yards", 40.7539, -74.0024),
    ("sf_ferry_building", "SF Ferry Building", 37.7955, -122.3937),
    ("golden_gate", "Golden Gate Bridge", 37.8199, -122.4783),
    ("sfo_airport", "SFO Airport", 37.6213, -122.3790),
    ("lax_airport", "LAX Airport", 33.9416, -118.4085),
    ("hollywood_sign", "Hollywood Sign", 34.1341, -118.3215),
    ("santa_monica_pier", "Santa Monica Pier", 34.0099, -118.4960),
];

fn places(rows: &[(u32, &str, f64, f64)]) -> Vec<Place> {
    rows.iter()
        .map(|&(id, name, lat, lng)| Place::new(id, name, lat, lng))
        .collect()
}

/// Both built-in samples pair place 2n-1 with place 2n
fn consecutive_pairs(count: u32) -> Vec<CoordinatePair> {
    (1..=count)
        .map(|id| CoordinatePair::new(id, id * 2 - 1, id * 2))
        .collect()
}

/// The two samples collected on every scheduled run
pub fn builtin_samples() -> Vec<Sample> {
    let specs = [("Sample1", SAMPLE1_PLACES), ("Sample2", SAMPLE2_PLACES)];
    specs
        .into_iter()
        .map(|(label, rows)| {
            let catalog = super::PlaceCatalog::new(places(rows));
            debug_assert!(catalog.is_ok(), "duplicate place id in built-in {label}");
            Sample {
                label: label.to_string(),
                places: catalog.unwrap_or_default(),
                pairs: consecutive_pairs(10),
            }
        })
        .collect()
}

/// Landmark keys with their places; ids follow table order
pub fn landmarks() -> Vec<(&'static str, Place)> {
    LANDMARKS
        .iter()
        .zip(1u32..)
        .map(|(&(key, name, lat, lng), id)| (key, Place::new(id, name, lat, lng)))
        .collect()
}
