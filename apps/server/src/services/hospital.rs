//! Hospital equipment catalog queries.

use serde_json::Value as JsonValue;
use std::sync::Arc;

use crate::{
    catalog::{reference, CatalogStore},
    config::SearchConfig,
    metrics,
    models::{Category, HospitalTool, ToolSafetyReport, ToolSearchQuery},
    Error, Result,
};

const CATALOG: &str = "hospital";

pub struct HospitalService {
    catalog: Arc<dyn CatalogStore>,
    search: SearchConfig,
}

impl HospitalService {
    pub fn new(catalog: Arc<dyn CatalogStore>, search: SearchConfig) -> Self {
        Self { catalog, search }
    }

    pub async fn search(&self, query: &ToolSearchQuery) -> Result<Vec<HospitalTool>> {
        let needle = query.query.as_ref().map(|q| q.to_lowercase());
        let limit = self.search.effective_limit(query.limit);

        let tools = self.catalog.hospital_tools().await.inspect_err(|_| {
            metrics::record_catalog_search_error(CATALOG);
        })?;

        let results: Vec<HospitalTool> = tools
            .into_iter()
            .filter(|t| needle.as_ref().map_or(true, |n| t.matches_text(n)))
            .filter(|t| query.category.as_ref().map_or(true, |c| &t.category == c))
            .filter(|t| {
                query
                    .department
                    .as_ref()
                    .map_or(true, |d| t.departments.contains(d))
            })
            .filter(|t| {
                query
                    .complexity
                    .as_ref()
                    .map_or(true, |c| &t.complexity == c)
            })
            .filter(|t| query.who_approved.map_or(true, |w| t.who_approved == w))
            .take(limit)
            .collect();

        metrics::record_catalog_search(CATALOG, results.len());
        Ok(results)
    }

    pub async fn get(&self, id: &str) -> Result<HospitalTool> {
        self.find(id)
            .await?
            .ok_or_else(|| Error::NotFound("Hospital tool not found".to_string()))
    }

    pub fn categories(&self) -> Vec<Category> {
        reference::tool_categories()
    }

    pub fn departments(&self) -> &'static [&'static str] {
        reference::HOSPITAL_DEPARTMENTS
    }

    pub async fn safety_report(&self, id: &str) -> Result<ToolSafetyReport> {
        let tool = self
            .find(id)
            .await?
            .ok_or_else(|| Error::NotFound("Tool not found".to_string()))?;
        Ok(ToolSafetyReport::from(&tool))
    }

    pub fn who_standards(&self) -> JsonValue {
        reference::who_device_standards()
    }

    async fn find(&self, id: &str) -> Result<Option<HospitalTool>> {
        Ok(self
            .catalog
            .hospital_tools()
            .await?
            .into_iter()
            .find(|t| t.id == id))
    }
}
