//! Query shapes for the third-party lookup endpoints.

use serde::Deserialize;
use validator::Validate;

fn default_fda_limit() -> u32 {
    10
}

fn default_place_type() -> String {
    "hospital".to_string()
}

fn default_country() -> String {
    "IND".to_string()
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FdaDrugQuery {
    #[validate(length(min = 1, message = "query must not be empty"))]
    pub query: String,
    #[serde(default = "default_fda_limit")]
    #[validate(range(min = 1, max = 100, message = "limit must be 1-100"))]
    pub limit: u32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DrugNameQuery {
    #[validate(length(min = 1, message = "query must not be empty"))]
    pub query: String,
}

/// Fewer than two resolvable drugs yields an empty interaction group.
#[derive(Debug, Clone, Deserialize)]
pub struct DrugInteractionsRequest {
    #[serde(default)]
    pub drugs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlacesQuery {
    #[validate(length(min = 1, message = "query must not be empty"))]
    pub query: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_place_type")]
    pub place_type: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GeocodeQuery {
    #[validate(length(min = 1, message = "address must not be empty"))]
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhoQuery {
    #[serde(default = "default_country")]
    pub country: String,
}
