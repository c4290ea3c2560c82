//! Command-line location inputs

use super::builtin::landmarks;
use crate::error::{Error, Result};
use crate::types::{Coordinates, Place};

/// Find a landmark by key or display name, ignoring case and treating
/// spaces as underscores
pub fn find_landmark(name: &str) -> Option<Place> {
    let key = name.trim().to_lowercase().replace(' ', "_");
    landmarks().into_iter().find_map(|(k, place)| {
        (k == key || place.name.to_lowercase().replace(' ', "_") == key).then_some(place)
    })
}

/// A pickup or destination given on the command line
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInput {
    /// A known landmark
    Landmark(Place),
    /// Free-form "lat,lng"
    Custom(Coordinates),
}

impl LocationInput {
    /// Parse "lat,lng" or a landmark name
    pub fn parse(input: &str) -> Result<Self> {
        if input.contains(',') {
            return parse_coordinates(input).map(Self::Custom);
        }
        find_landmark(input)
            .map(Self::Landmark)
            .ok_or_else(|| Error::UnknownLocation {
                name: input.trim().to_string(),
            })
    }

    /// Resolve to a place; custom points get id 0
    pub fn into_place(self) -> Place {
        match self {
            Self::Landmark(place) => place,
            Self::Custom(c) => Place::new(0, format!("Custom ({}, {})", c.lat, c.lng), c.lat, c.lng),
        }
    }
}

impl std::str::FromStr for LocationInput {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse_coordinates(input: &str) -> Result<Coordinates> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    let [lat, lng] = parts.as_slice() else {
        return Err(Error::invalid_coordinates(
            input,
            "use 'latitude,longitude'",
        ));
    };

    let parse = |s: &str| {
        s.parse::<f64>()
            .map_err(|_| Error::invalid_coordinates(input, format!("'{s}' is not a number")))
    };
    let coordinates = Coordinates::new(parse(lat)?, parse(lng)?);

    if !coordinates.is_valid() {
        return Err(Error::invalid_coordinates(input, "out of range"));
    }
    Ok(coordinates)
}
