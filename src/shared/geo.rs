use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A WGS84 position, used for station and city locations resolved from reference data.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

#[test]
fn coordinate_validity_test() {
    assert!(Coordinate::new(55.75, 37.61).is_valid());
    assert!(!Coordinate::new(95.0, 37.61).is_valid());
    assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
}

#[test]
fn coordinate_display_test() {
    let coordinate: Coordinate = (59.93, 30.31).into();
    assert_eq!(coordinate.to_string(), "59.93,30.31");
}
