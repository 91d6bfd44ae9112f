//! Catalog storage
//!
//! Catalogs are small, read-mostly record sets. The server only ever reads
//! them, so the store trait exposes whole-list fetches with an optional
//! region pre-filter and leaves matching and ranking to the services.

pub mod reference;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::{
    HealthcareLocation, HospitalTool, JanAushadhiMedicine, JanAushadhiStore, Medicine,
};
use crate::Result;

/// Built-in demonstration data, in snapshot format.
const SEED_SNAPSHOT: &str = include_str!("seed.json");

/// Region pre-filter pushed down to the store.
///
/// City and state compare case-insensitively; pincode compares exactly.
/// Records without a pincode (healthcare locations) ignore that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionFilter {
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
}

impl RegionFilter {
    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.state.is_none() && self.pincode.is_none()
    }

    pub fn matches(&self, city: &str, state: &str, pincode: Option<&str>) -> bool {
        if let Some(wanted) = &self.city {
            if !city.eq_ignore_ascii_case(wanted) {
                return false;
            }
        }
        if let Some(wanted) = &self.state {
            if !state.eq_ignore_ascii_case(wanted) {
                return false;
            }
        }
        match (&self.pincode, pincode) {
            (Some(wanted), Some(actual)) => wanted == actual,
            _ => true,
        }
    }
}

/// Source of catalog records.
///
/// Implementations return records in a stable order; services rely on it for
/// unranked listings.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn medicines(&self) -> Result<Vec<Medicine>>;

    async fn hospital_tools(&self) -> Result<Vec<HospitalTool>>;

    async fn locations(&self, region: &RegionFilter) -> Result<Vec<HealthcareLocation>>;

    async fn jan_aushadhi_stores(&self, region: &RegionFilter) -> Result<Vec<JanAushadhiStore>>;

    async fn jan_aushadhi_medicines(&self) -> Result<Vec<JanAushadhiMedicine>>;
}

/// On-disk catalog format. Missing lists load as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSnapshot {
    pub medicines: Vec<Medicine>,
    pub hospital_tools: Vec<HospitalTool>,
    pub locations: Vec<HealthcareLocation>,
    pub jan_aushadhi_stores: Vec<JanAushadhiStore>,
    pub jan_aushadhi_medicines: Vec<JanAushadhiMedicine>,
}

/// Catalog held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    snapshot: CatalogSnapshot,
}

impl InMemoryCatalog {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self { snapshot }
    }

    /// Built-in demonstration data for Bangalore.
    pub fn seeded() -> Self {
        let snapshot = serde_json::from_str(SEED_SNAPSHOT)
            .expect("embedded catalog seed must be a valid snapshot");
        Self::new(snapshot)
    }

    pub async fn from_snapshot_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read catalog snapshot {}", path.display()))?;
        let snapshot: CatalogSnapshot = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse catalog snapshot {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            medicines = snapshot.medicines.len(),
            hospital_tools = snapshot.hospital_tools.len(),
            locations = snapshot.locations.len(),
            jan_aushadhi_stores = snapshot.jan_aushadhi_stores.len(),
            jan_aushadhi_medicines = snapshot.jan_aushadhi_medicines.len(),
            "Loaded catalog snapshot"
        );

        Ok(Self::new(snapshot))
    }

    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn medicines(&self) -> Result<Vec<Medicine>> {
        Ok(self.snapshot.medicines.clone())
    }

    async fn hospital_tools(&self) -> Result<Vec<HospitalTool>> {
        Ok(self.snapshot.hospital_tools.clone())
    }

    async fn locations(&self, region: &RegionFilter) -> Result<Vec<HealthcareLocation>> {
        Ok(self
            .snapshot
            .locations
            .iter()
            .filter(|l| region.matches(&l.city, &l.state, None))
            .cloned()
            .collect())
    }

    async fn jan_aushadhi_stores(&self, region: &RegionFilter) -> Result<Vec<JanAushadhiStore>> {
        Ok(self
            .snapshot
            .jan_aushadhi_stores
            .iter()
            .filter(|s| region.matches(&s.city, &s.state, Some(&s.pincode)))
            .cloned()
            .collect())
    }

    async fn jan_aushadhi_medicines(&self) -> Result<Vec<JanAushadhiMedicine>> {
        Ok(self.snapshot.jan_aushadhi_medicines.clone())
    }
}
