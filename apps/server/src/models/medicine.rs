use serde::{Deserialize, Serialize};
use validator::Validate;

use super::contains_ci;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: String,
    pub name: String,
    pub generic_name: String,
    pub category: String,
    pub description: String,
    pub composition: String,
    pub dosage: String,
    pub side_effects: Vec<String>,
    pub benefits: Vec<String>,
    pub contraindications: Vec<String>,
    pub jan_aushadhi_price: Option<String>,
    pub brand_price: Option<String>,
    pub who_approved: bool,
    pub fda_approved: bool,
    pub jan_aushadhi_available: bool,
    pub prescription_required: bool,
    pub manufacturer: Vec<String>,
}

impl Medicine {
    /// Name, generic name or description contains the (lowercased) needle.
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        contains_ci(&self.name, needle_lower)
            || contains_ci(&self.generic_name, needle_lower)
            || contains_ci(&self.description, needle_lower)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MedicineSearchQuery {
    pub query: String,
    pub category: Option<String>,
    pub prescription_required: Option<bool>,
    #[serde(default)]
    pub jan_aushadhi_only: bool,
    #[validate(range(min = 1, message = "limit must be at least 1"))]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceComparison {
    pub medicine_name: String,
    pub jan_aushadhi_price: Option<String>,
    pub brand_price: Option<String>,
    pub savings_percentage: String,
    pub availability: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugInteraction {
    pub medicine_1: String,
    pub medicine_2: String,
    pub severity: String,
    pub description: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InteractionReport {
    pub interactions_found: usize,
    pub interactions: Vec<DrugInteraction>,
    pub safe_to_combine: bool,
}

impl From<Vec<DrugInteraction>> for InteractionReport {
    fn from(interactions: Vec<DrugInteraction>) -> Self {
        Self {
            interactions_found: interactions.len(),
            safe_to_combine: interactions.is_empty(),
            interactions,
        }
    }
}
