//! Radius search over geo-tagged records.
//!
//! The engine is a pure function of its inputs: it computes the Haversine
//! distance from the origin to every candidate, keeps those within the radius
//! that satisfy every predicate, and returns them nearest-first. Limiting and
//! formatting are left to the caller.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::point::{round_km, GeoPoint};

/// Radius applied when a caller does not specify one.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Anything that can be placed on the map.
pub trait Locatable {
    fn position(&self) -> GeoPoint;
}

impl<T: Locatable + ?Sized> Locatable for &T {
    fn position(&self) -> GeoPoint {
        (**self).position()
    }
}

/// Attribute test applied to a candidate, independent of distance.
pub type Predicate<R> = Box<dyn Fn(&R) -> bool + Send + Sync>;

/// Origin, radius and attribute predicates for a single query.
pub struct SearchCriteria<R: ?Sized> {
    origin: GeoPoint,
    radius_km: f64,
    predicates: Vec<Predicate<R>>,
}

impl<R: ?Sized> SearchCriteria<R> {
    /// Radius must be finite and strictly positive.
    pub fn new(origin: GeoPoint, radius_km: f64) -> Result<Self> {
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(Error::InvalidRadius(radius_km));
        }
        Ok(Self {
            origin,
            radius_km,
            predicates: Vec::new(),
        })
    }

    /// Add a predicate. All predicates must hold for a candidate to be kept.
    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Add a predicate only when `value` is present.
    pub fn with_optional_predicate<V, F>(mut self, value: Option<V>, make: F) -> Self
    where
        F: FnOnce(V) -> Predicate<R>,
    {
        if let Some(v) = value {
            self.predicates.push(make(v));
        }
        self
    }

    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    fn accepts(&self, record: &R) -> bool {
        self.predicates.iter().all(|p| p(record))
    }
}

impl<R: ?Sized> std::fmt::Debug for SearchCriteria<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchCriteria")
            .field("origin", &self.origin)
            .field("radius_km", &self.radius_km)
            .field("predicates", &self.predicates.len())
            .finish()
    }
}

/// A record annotated with its distance from the query origin.
///
/// Serializes as the record's own fields plus `distance_km`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult<R> {
    #[serde(flatten)]
    pub record: R,
    /// Kilometers, rounded to two decimals.
    pub distance_km: f64,
}

impl<R: Clone> SearchResult<&R> {
    pub fn cloned(self) -> SearchResult<R> {
        SearchResult {
            record: self.record.clone(),
            distance_km: self.distance_km,
        }
    }
}

/// Distance and travel-time estimate between two points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Directions {
    pub distance_km: f64,
    pub eta_minutes: u64,
    pub estimated_time: String,
}

/// Minutes of travel assumed per kilometer. A placeholder, not routing.
pub const ETA_MINUTES_PER_KM: f64 = 3.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct ProximitySearchEngine;

impl ProximitySearchEngine {
    pub fn new() -> Self {
        Self
    }

    /// Candidates within `criteria.radius_km()` of the origin (boundary
    /// inclusive) that pass every predicate, nearest first.
    ///
    /// The radius test uses the unrounded distance; only the reported
    /// `distance_km` is rounded. Equal distances keep their input order.
    pub fn search<'a, R, I>(&self, criteria: &SearchCriteria<R>, candidates: I) -> Vec<SearchResult<&'a R>>
    where
        R: Locatable + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let origin = criteria.origin();
        let mut hits: Vec<(f64, &'a R)> = candidates
            .into_iter()
            .filter_map(|record| {
                let distance = origin.distance_km(&record.position());
                (distance <= criteria.radius_km && criteria.accepts(record))
                    .then_some((distance, record))
            })
            .collect();

        // Vec::sort_by is stable.
        hits.sort_by(|a, b| a.0.total_cmp(&b.0));

        hits.into_iter()
            .map(|(distance, record)| SearchResult {
                record,
                distance_km: round_km(distance),
            })
            .collect()
    }

    /// Distance plus a crude ETA of `distance_km * 3` minutes, truncated.
    pub fn directions(&self, from: &GeoPoint, to: &GeoPoint) -> Directions {
        let distance = from.distance_km(to);
        let eta_minutes = (distance * ETA_MINUTES_PER_KM) as u64;
        Directions {
            distance_km: round_km(distance),
            eta_minutes,
            estimated_time: format!("{eta_minutes} minutes"),
        }
    }
}
