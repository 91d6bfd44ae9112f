//! Proximity search for healthcare catalogs.
//!
//! Computes great-circle (Haversine) distances from an origin to geo-tagged
//! records, filters them by radius and attribute predicates, and orders the
//! survivors nearest-first.
//!
//! ```
//! use aarogya_geo::{GeoPoint, Locatable, ProximitySearchEngine, SearchCriteria};
//!
//! struct Clinic {
//!     at: GeoPoint,
//! }
//!
//! impl Locatable for Clinic {
//!     fn position(&self) -> GeoPoint {
//!         self.at
//!     }
//! }
//!
//! let origin = GeoPoint::try_new(12.9716, 77.5946).unwrap();
//! let clinics = vec![Clinic { at: origin }];
//! let criteria = SearchCriteria::new(origin, 5.0).unwrap();
//! let hits = ProximitySearchEngine::new().search(&criteria, &clinics);
//! assert_eq!(hits[0].distance_km, 0.0);
//! ```

#![forbid(unsafe_code)]

mod engine;
mod error;
mod point;

pub use engine::{
    Directions, Locatable, Predicate, ProximitySearchEngine, SearchCriteria, SearchResult,
    DEFAULT_RADIUS_KM, ETA_MINUTES_PER_KM,
};
pub use error::{Error, Result};
pub use point::{haversine_km, round_km, GeoPoint, EARTH_RADIUS_KM};
