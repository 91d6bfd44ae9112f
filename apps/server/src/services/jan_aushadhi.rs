//! Jan Aushadhi store and generic-medicine queries.

use aarogya_geo::{GeoPoint, ProximitySearchEngine, SearchCriteria};
use serde_json::Value as JsonValue;
use std::sync::Arc;

use crate::{
    catalog::{reference, CatalogStore, RegionFilter},
    config::SearchConfig,
    metrics,
    models::{
        AvailableMedicines, AvailableMedicinesQuery, JanAushadhiStore, SavingsEstimate,
        SavingsQuery, StoreMatch, StoreSearchQuery,
    },
    Error, Result,
};

const CATALOG: &str = "jan-aushadhi";

pub struct JanAushadhiService {
    catalog: Arc<dyn CatalogStore>,
    engine: ProximitySearchEngine,
    search: SearchConfig,
}

impl JanAushadhiService {
    pub fn new(catalog: Arc<dyn CatalogStore>, search: SearchConfig) -> Self {
        Self {
            catalog,
            engine: ProximitySearchEngine::new(),
            search,
        }
    }

    /// Region filter first; with both coordinates the survivors are ranked by
    /// distance, otherwise catalog order is kept.
    pub async fn search_stores(&self, query: &StoreSearchQuery) -> Result<Vec<StoreMatch>> {
        let limit = self.search.effective_limit(query.limit);
        let region = RegionFilter {
            city: query.city.clone(),
            state: query.state.clone(),
            pincode: query.pincode.clone(),
        };

        let origin = match (query.latitude, query.longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint::try_new(lat, lon)?),
            _ => None,
        };

        let stores = self
            .catalog
            .jan_aushadhi_stores(&region)
            .await
            .inspect_err(|_| metrics::record_catalog_search_error(CATALOG))?;

        let results: Vec<StoreMatch> = match origin {
            Some(origin) => {
                let radius = query.radius_km.unwrap_or(self.search.default_radius_km);
                let criteria = SearchCriteria::<JanAushadhiStore>::new(origin, radius)?;
                self.engine
                    .search(&criteria, &stores)
                    .into_iter()
                    .take(limit)
                    .map(|hit| StoreMatch {
                        store: hit.record.clone(),
                        distance_km: Some(hit.distance_km),
                    })
                    .collect()
            }
            None => stores
                .into_iter()
                .take(limit)
                .map(|store| StoreMatch {
                    store,
                    distance_km: None,
                })
                .collect(),
        };

        metrics::record_catalog_search(CATALOG, results.len());
        Ok(results)
    }

    pub async fn get_store(&self, id: &str) -> Result<JanAushadhiStore> {
        self.catalog
            .jan_aushadhi_stores(&RegionFilter::default())
            .await?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::NotFound("Jan Aushadhi store not found".to_string()))
    }

    /// Generic medicines, optionally filtered by name or generic name. The
    /// store id is echoed; stock is not tracked per store.
    pub async fn available_medicines(
        &self,
        query: AvailableMedicinesQuery,
    ) -> Result<AvailableMedicines> {
        let needle = query.search.as_ref().map(|s| s.to_lowercase());
        let medicines: Vec<_> = self
            .catalog
            .jan_aushadhi_medicines()
            .await?
            .into_iter()
            .filter(|m| needle.as_ref().map_or(true, |n| m.matches_text(n)))
            .collect();

        Ok(AvailableMedicines {
            store_id: query.store_id,
            medicines_count: medicines.len(),
            medicines,
        })
    }

    pub fn savings(&self, query: SavingsQuery) -> SavingsEstimate {
        estimate_savings(query.medicine_name, query.quantity)
    }

    pub fn statistics(&self) -> JsonValue {
        reference::jan_aushadhi_statistics()
    }
}

fn estimate_savings(medicine_name: String, quantity: u32) -> SavingsEstimate {
    let generic = reference::JAN_AUSHADHI_UNIT_PRICE * f64::from(quantity);
    let brand = reference::BRAND_UNIT_PRICE * f64::from(quantity);
    let saved = brand - generic;
    let percentage = saved / brand * 100.0;

    SavingsEstimate {
        medicine_name,
        quantity,
        jan_aushadhi_price: format!("₹{generic:.2}"),
        brand_price: format!("₹{brand:.2}"),
        savings_amount: format!("₹{saved:.2}"),
        savings_percentage: format!("{percentage:.1}%"),
        recommendation: "Choose Jan Aushadhi for significant savings".to_string(),
    }
}
