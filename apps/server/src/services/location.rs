//! Healthcare location search.

use aarogya_geo::{GeoPoint, ProximitySearchEngine, SearchCriteria, SearchResult};
use std::sync::Arc;

use crate::{
    catalog::{reference, CatalogStore, RegionFilter},
    config::SearchConfig,
    metrics,
    models::{DirectionsResponse, HealthcareLocation, LocationQuery},
    Error, Result,
};

const CATALOG: &str = "locations";

pub struct LocationService {
    catalog: Arc<dyn CatalogStore>,
    engine: ProximitySearchEngine,
    search: SearchConfig,
}

impl LocationService {
    pub fn new(catalog: Arc<dyn CatalogStore>, search: SearchConfig) -> Self {
        Self {
            catalog,
            engine: ProximitySearchEngine::new(),
            search,
        }
    }

    /// Locations within the radius that match type, services (any-of) and the
    /// emergency flag, nearest first, at most `limit`.
    pub async fn search(
        &self,
        query: LocationQuery,
        limit: Option<usize>,
    ) -> Result<Vec<SearchResult<HealthcareLocation>>> {
        let criteria = self.criteria(query)?;
        let limit = self.search.effective_limit(limit);

        let candidates = self
            .catalog
            .locations(&RegionFilter::default())
            .await
            .inspect_err(|_| metrics::record_catalog_search_error(CATALOG))?;

        let results: Vec<_> = self
            .engine
            .search(&criteria, &candidates)
            .into_iter()
            .take(limit)
            .map(SearchResult::cloned)
            .collect();

        metrics::record_catalog_search(CATALOG, results.len());
        tracing::debug!(
            latitude = criteria.origin().latitude(),
            longitude = criteria.origin().longitude(),
            radius_km = criteria.radius_km(),
            results = results.len(),
            "Location search"
        );
        Ok(results)
    }

    fn criteria(&self, query: LocationQuery) -> Result<SearchCriteria<HealthcareLocation>> {
        let origin = GeoPoint::try_new(query.latitude, query.longitude)?;
        let radius = query.radius_km.unwrap_or(self.search.default_radius_km);

        let criteria = SearchCriteria::new(origin, radius)?
            .with_optional_predicate(query.location_type, |kind| {
                Box::new(move |l: &HealthcareLocation| l.kind == kind)
            })
            .with_optional_predicate(
                query.services.filter(|s| !s.is_empty()),
                |services| Box::new(move |l: &HealthcareLocation| l.offers_any(&services)),
            )
            .with_optional_predicate(query.emergency_only.then_some(()), |_| {
                Box::new(|l: &HealthcareLocation| l.emergency_services)
            });
        Ok(criteria)
    }

    pub async fn get(&self, id: &str) -> Result<HealthcareLocation> {
        self.find(id)
            .await?
            .ok_or_else(|| Error::NotFound("Healthcare location not found".to_string()))
    }

    pub async fn directions(&self, id: &str, from: GeoPoint) -> Result<DirectionsResponse> {
        let location = self
            .find(id)
            .await?
            .ok_or_else(|| Error::NotFound("Location not found".to_string()))?;

        let to = location.coordinates;
        let directions = self.engine.directions(&from, &to);

        Ok(DirectionsResponse {
            location_name: location.name,
            distance_km: directions.distance_km,
            eta_minutes: directions.eta_minutes,
            estimated_time: directions.estimated_time,
            google_maps_url: google_maps_directions_url(&from, &to),
            coordinates: to,
        })
    }

    pub fn types(&self) -> &'static [reference::LocationType] {
        reference::LOCATION_TYPES
    }

    pub fn services(&self) -> &'static [&'static str] {
        reference::HEALTHCARE_SERVICES
    }

    async fn find(&self, id: &str) -> Result<Option<HealthcareLocation>> {
        Ok(self
            .catalog
            .locations(&RegionFilter::default())
            .await?
            .into_iter()
            .find(|l| l.id == id))
    }
}

pub fn google_maps_directions_url(from: &GeoPoint, to: &GeoPoint) -> String {
    format!(
        "https://www.google.com/maps/dir/{},{}/{},{}",
        from.latitude(),
        from.longitude(),
        to.latitude(),
        to.longitude()
    )
}
