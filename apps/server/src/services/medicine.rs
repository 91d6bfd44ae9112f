//! Medicine catalog queries.

use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    catalog::{reference, CatalogStore},
    config::SearchConfig,
    metrics,
    models::{
        Category, DrugInteraction, InteractionReport, Medicine, MedicineSearchQuery,
        PriceComparison,
    },
    Error, Result,
};

const CATALOG: &str = "medicines";

pub struct MedicineService {
    catalog: Arc<dyn CatalogStore>,
    search: SearchConfig,
}

impl MedicineService {
    pub fn new(catalog: Arc<dyn CatalogStore>, search: SearchConfig) -> Self {
        Self { catalog, search }
    }

    /// Text match on name, generic name and description, then exact filters.
    /// Results keep catalog order.
    pub async fn search(&self, query: &MedicineSearchQuery) -> Result<Vec<Medicine>> {
        let needle = query.query.to_lowercase();
        let limit = self.search.effective_limit(query.limit);

        let medicines = self.catalog.medicines().await.inspect_err(|_| {
            metrics::record_catalog_search_error(CATALOG);
        })?;

        let results: Vec<Medicine> = medicines
            .into_iter()
            .filter(|m| m.matches_text(&needle))
            .filter(|m| query.category.as_ref().map_or(true, |c| &m.category == c))
            .filter(|m| {
                query
                    .prescription_required
                    .map_or(true, |rx| m.prescription_required == rx)
            })
            .filter(|m| !query.jan_aushadhi_only || m.jan_aushadhi_available)
            .take(limit)
            .collect();

        metrics::record_catalog_search(CATALOG, results.len());
        tracing::debug!(query = %query.query, results = results.len(), "Medicine search");
        Ok(results)
    }

    pub fn categories(&self) -> Vec<Category> {
        reference::medicine_categories()
    }

    pub async fn get(&self, id: &str) -> Result<Medicine> {
        self.catalog
            .medicines()
            .await?
            .into_iter()
            .find(|m| m.id == id)
            .ok_or_else(|| Error::NotFound("Medicine not found".to_string()))
    }

    pub async fn compare_prices(&self, name: &str) -> Result<PriceComparison> {
        let medicine = self
            .catalog
            .medicines()
            .await?
            .into_iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::NotFound("Medicine not found".to_string()))?;

        if !medicine.jan_aushadhi_available {
            return Err(Error::NotFound(
                "Medicine not available in Jan Aushadhi".to_string(),
            ));
        }

        Ok(PriceComparison {
            medicine_name: medicine.name,
            jan_aushadhi_price: medicine.jan_aushadhi_price,
            brand_price: medicine.brand_price,
            savings_percentage: reference::JAN_AUSHADHI_SAVINGS_RANGE.to_string(),
            availability: reference::JAN_AUSHADHI_AVAILABILITY.to_string(),
        })
    }

    /// Known interactions among the given medicines. Every id must exist.
    pub async fn check_interactions(&self, ids: &[String]) -> Result<InteractionReport> {
        if ids.len() < 2 {
            return Err(Error::InvalidInput(
                "At least 2 medicines required for interaction check".to_string(),
            ));
        }

        let catalog = self.catalog.medicines().await?;
        let mut names: HashSet<String> = HashSet::with_capacity(ids.len());
        let mut missing = Vec::new();
        for id in ids {
            match catalog.iter().find(|m| &m.id == id) {
                Some(m) => {
                    names.insert(m.name.to_lowercase());
                }
                None => missing.push(id.as_str()),
            }
        }
        if !missing.is_empty() {
            return Err(Error::NotFound(format!(
                "Medicine not found: {}",
                missing.join(", ")
            )));
        }

        let found: Vec<DrugInteraction> = reference::known_interactions()
            .into_iter()
            .filter(|i| {
                names.contains(&i.medicine_1.to_lowercase())
                    && names.contains(&i.medicine_2.to_lowercase())
            })
            .collect();

        Ok(found.into())
    }
}
