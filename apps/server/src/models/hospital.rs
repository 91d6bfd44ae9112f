use serde::{Deserialize, Serialize};
use validator::Validate;

use super::contains_ci;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalTool {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub uses: Vec<String>,
    pub specifications: Vec<String>,
    pub price_range: String,
    pub manufacturer: Vec<String>,
    pub who_approved: bool,
    pub fda_approved: bool,
    pub departments: Vec<String>,
    /// Basic, Intermediate or Advanced
    pub complexity: String,
    pub training_required: String,
}

impl HospitalTool {
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        contains_ci(&self.name, needle_lower)
            || contains_ci(&self.description, needle_lower)
            || self.uses.iter().any(|u| contains_ci(u, needle_lower))
    }

    pub fn certification_required(&self) -> bool {
        self.who_approved || self.fda_approved
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ToolSearchQuery {
    pub query: Option<String>,
    pub category: Option<String>,
    pub department: Option<String>,
    pub complexity: Option<String>,
    pub who_approved: Option<bool>,
    #[validate(range(min = 1, message = "limit must be at least 1"))]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SafetyGuidelines {
    pub pre_use_checks: Vec<&'static str>,
    pub during_use: Vec<&'static str>,
    pub post_use: Vec<&'static str>,
    pub emergency_procedures: Vec<&'static str>,
}

impl Default for SafetyGuidelines {
    fn default() -> Self {
        Self {
            pre_use_checks: vec![
                "Verify equipment calibration",
                "Check power connections",
                "Ensure sterile conditions",
            ],
            during_use: vec![
                "Follow manufacturer protocols",
                "Monitor patient vitals",
                "Maintain sterile technique",
            ],
            post_use: vec![
                "Clean and disinfect",
                "Store in designated area",
                "Log usage details",
            ],
            emergency_procedures: vec![
                "Immediate shutdown protocol",
                "Patient safety measures",
                "Contact technical support",
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolSafetyReport {
    pub tool_name: String,
    pub safety_guidelines: SafetyGuidelines,
    pub certification_required: bool,
    pub training_duration: String,
}

impl From<&HospitalTool> for ToolSafetyReport {
    fn from(tool: &HospitalTool) -> Self {
        Self {
            tool_name: tool.name.clone(),
            safety_guidelines: SafetyGuidelines::default(),
            certification_required: tool.certification_required(),
            training_duration: tool.training_required.clone(),
        }
    }
}
