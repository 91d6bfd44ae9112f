use aarogya_geo::{GeoPoint, Locatable};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::contains_ci;

/// A Pradhan Mantri Bhartiya Janaushadhi Kendra (generic-medicine store).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JanAushadhiStore {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub phone: String,
    #[serde(flatten)]
    pub coordinates: GeoPoint,
    pub operating_hours: String,
    pub medicines_available: u32,
    pub verified: bool,
}

impl Locatable for JanAushadhiStore {
    fn position(&self) -> GeoPoint {
        self.coordinates
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JanAushadhiMedicine {
    pub id: String,
    pub name: String,
    pub generic_name: String,
    pub price: String,
    pub pack_size: String,
    pub manufacturer: String,
    pub availability: String,
}

impl JanAushadhiMedicine {
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        contains_ci(&self.name, needle_lower) || contains_ci(&self.generic_name, needle_lower)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct StoreSearchQuery {
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: Option<f64>,
    #[validate(range(min = 1, message = "limit must be at least 1"))]
    pub limit: Option<usize>,
}

/// A store in a search response. `distance_km` is present only for
/// coordinate searches.
#[derive(Debug, Clone, Serialize)]
pub struct StoreMatch {
    #[serde(flatten)]
    pub store: JanAushadhiStore,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailableMedicinesQuery {
    pub store_id: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailableMedicines {
    pub store_id: Option<String>,
    pub medicines_count: usize,
    pub medicines: Vec<JanAushadhiMedicine>,
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SavingsQuery {
    #[validate(length(min = 1, message = "medicine_name must not be empty"))]
    pub medicine_name: String,
    #[serde(default = "one")]
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SavingsEstimate {
    pub medicine_name: String,
    pub quantity: u32,
    pub jan_aushadhi_price: String,
    pub brand_price: String,
    pub savings_amount: String,
    pub savings_percentage: String,
    pub recommendation: String,
}
