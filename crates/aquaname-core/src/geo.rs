//! Coordinates and great-circle distance.

use serde::Serialize;
use thiserror::Error;

/// Mean Earth radius in meters used by the spherical model.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// A WGS84 position in decimal degrees.
///
/// Always within range: latitude in `[-90, 90]`, longitude in `[-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting out-of-range or NaN components.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] naming the offending component.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }

    #[must_use]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[must_use]
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// `"lat,lon"` as expected by the `location` / `latlng` query parameters.
    #[must_use]
    pub fn to_query_value(&self) -> String {
        format!("{},{}", self.lat, self.lon)
    }
}

/// Haversine distance in meters between two coordinates.
#[must_use]
pub fn distance_meters(origin: Coordinate, target: Coordinate) -> f64 {
    let d_lat = (target.lat - origin.lat).to_radians();
    let d_lon = (target.lon - origin.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + origin.lat.to_radians().cos()
            * target.lat.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `h` a hair past 1 for near-antipodal points.
    let h = h.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).expect("test coordinate in range")
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        assert_eq!(
            Coordinate::new(90.5, 0.0),
            Err(CoordinateError::LatitudeOutOfRange(90.5))
        );
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        assert_eq!(
            Coordinate::new(0.0, -180.01),
            Err(CoordinateError::LongitudeOutOfRange(-180.01))
        );
    }

    #[test]
    fn rejects_nan() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn accepts_range_boundaries() {
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(90.0, 180.0).is_ok());
    }

    #[test]
    fn query_value_joins_lat_and_lon() {
        assert_eq!(coord(40.5, -74.25).to_query_value(), "40.5,-74.25");
    }

    #[test]
    fn distance_to_self_is_zero() {
        let a = coord(40.712_8, -74.006_0);
        assert!(distance_meters(a, a).abs() < f64::EPSILON);
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (coord(40.0, -74.0), coord(40.000_5, -74.0)),
            (coord(-33.868_8, 151.209_3), coord(51.507_4, -0.127_8)),
            (coord(0.0, 179.9), coord(0.0, -179.9)),
            (coord(89.9, 10.0), coord(-89.9, -170.0)),
        ];
        for (a, b) in pairs {
            let ab = distance_meters(a, b);
            let ba = distance_meters(b, a);
            assert!((ab - ba).abs() < 1e-9, "{ab} != {ba}");
        }
    }

    #[test]
    fn small_latitude_offset_matches_arc_length() {
        // 0.0005 degrees of latitude is ~55.6 m on a 6371 km sphere.
        let d = distance_meters(coord(40.0, -74.0), coord(40.000_5, -74.0));
        assert!((d - 55.6).abs() < 0.1, "got {d}");
    }

    #[test]
    fn antipodal_points_are_half_circumference() {
        let d = distance_meters(coord(0.0, 0.0), coord(0.0, 180.0));
        let half = std::f64::consts::PI * EARTH_RADIUS_M;
        assert!((d - half).abs() < 1.0, "got {d}");
    }

    #[test]
    fn crossing_the_antimeridian_is_short() {
        let d = distance_meters(coord(0.0, 179.999), coord(0.0, -179.999));
        assert!(d < 300.0, "got {d}");
    }
}
