//! Geographic points and great-circle distance.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Mean Earth radius used by the Haversine computation.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated latitude/longitude pair in decimal degrees.
///
/// Construction rejects values outside `[-90, 90]` / `[-180, 180]` (and NaN),
/// so any `GeoPoint` in hand is a valid search origin. Deserialization goes
/// through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint", into = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Serialize, Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = Error;

    fn try_from(raw: RawGeoPoint) -> Result<Self> {
        GeoPoint::try_new(raw.latitude, raw.longitude)
    }
}

impl From<GeoPoint> for RawGeoPoint {
    fn from(point: GeoPoint) -> Self {
        Self {
            latitude: point.latitude,
            longitude: point.longitude,
        }
    }
}

impl GeoPoint {
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Haversine great-circle distance in kilometers.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(self, other)
    }
}

/// Great-circle distance between two points on a sphere of radius
/// [`EARTH_RADIUS_KM`].
pub fn haversine_km(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = lat2 - lat1;
    let delta_lon = to.longitude.to_radians() - from.longitude.to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Clamp guards asin against a drifting a hair above 1.0 for antipodes.
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

/// Round a distance to two decimal places for presentation.
pub fn round_km(distance_km: f64) -> f64 {
    (distance_km * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_latitude() {
        assert_eq!(
            GeoPoint::try_new(200.0, 77.0),
            Err(Error::LatitudeOutOfRange(200.0))
        );
        assert!(GeoPoint::try_new(-90.5, 0.0).is_err());
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        assert_eq!(
            GeoPoint::try_new(12.0, -180.01),
            Err(Error::LongitudeOutOfRange(-180.01))
        );
    }

    #[test]
    fn rejects_nan() {
        assert!(GeoPoint::try_new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::try_new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn accepts_range_boundaries() {
        assert!(GeoPoint::try_new(90.0, 180.0).is_ok());
        assert!(GeoPoint::try_new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn same_point_is_zero_distance() {
        let p = GeoPoint::try_new(12.9716, 77.5946).unwrap();
        assert_eq!(p.distance_km(&p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude_on_a_meridian() {
        let a = GeoPoint::try_new(0.0, 0.0).unwrap();
        let b = GeoPoint::try_new(1.0, 0.0).unwrap();
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
        assert!((a.distance_km(&b) - expected).abs() < 1e-9);
    }

    #[test]
    fn antipodes_are_half_the_circumference() {
        let a = GeoPoint::try_new(0.0, 0.0).unwrap();
        let b = GeoPoint::try_new(0.0, 180.0).unwrap();
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI;
        assert!((a.distance_km(&b) - expected).abs() < 1e-6);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round_km(13.3149), 13.31);
        assert_eq!(round_km(13.315_01), 13.32);
        assert_eq!(round_km(0.0), 0.0);
    }

    #[test]
    fn deserialization_validates() {
        let ok: GeoPoint = serde_json::from_str(r#"{"latitude": 12.9, "longitude": 77.6}"#)
            .expect("valid point");
        assert_eq!(ok.latitude(), 12.9);

        let err = serde_json::from_str::<GeoPoint>(r#"{"latitude": 200, "longitude": 77.6}"#);
        assert!(err.is_err());
    }
}
