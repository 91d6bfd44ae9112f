//! Domain models for the Aarogya server

pub mod consultation;
pub mod external;
pub mod hospital;
pub mod jan_aushadhi;
pub mod location;
pub mod medicine;

use serde::{Deserialize, Serialize};

pub use consultation::{
    AgentConfig, AgentKnowledge, AgentPayload, ConsultationMessage, CreateAgentRequest,
    KnowledgePayload, MessagePayload, SessionPayload, SessionRequest,
};
pub use external::{
    DrugInteractionsRequest, DrugNameQuery, FdaDrugQuery, GeocodeQuery, PlacesQuery, WhoQuery,
};
pub use hospital::{HospitalTool, SafetyGuidelines, ToolSafetyReport, ToolSearchQuery};
pub use jan_aushadhi::{
    AvailableMedicines, AvailableMedicinesQuery, JanAushadhiMedicine, JanAushadhiStore,
    SavingsEstimate, SavingsQuery, StoreMatch, StoreSearchQuery,
};
pub use location::{
    DirectionsQuery, DirectionsResponse, HealthcareLocation, LocationQuery, LocationSearchRequest,
    NearbyQuery,
};
pub use medicine::{
    DrugInteraction, InteractionReport, Medicine, MedicineSearchQuery, PriceComparison,
};

/// Catalog category with an indicative item count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub count: u32,
}

impl Category {
    pub fn new(id: &str, name: &str, count: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            count,
        }
    }
}

/// Case-insensitive substring match.
pub(crate) fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}
