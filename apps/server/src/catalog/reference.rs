//! Fixed reference lists served alongside the catalogs.

use serde::Serialize;
use serde_json::{json, Value as JsonValue};

use crate::models::{AgentConfig, Category, DrugInteraction};

pub fn medicine_categories() -> Vec<Category> {
    vec![
        Category::new("analgesic", "Pain Relief", 15),
        Category::new("antibiotic", "Antibiotics", 25),
        Category::new("diabetes", "Diabetes", 12),
        Category::new("cardiovascular", "Heart & Blood", 18),
        Category::new("respiratory", "Respiratory", 10),
        Category::new("gastrointestinal", "Digestive", 14),
    ]
}

pub fn tool_categories() -> Vec<Category> {
    vec![
        Category::new("diagnostic", "Diagnostic Equipment", 45),
        Category::new("surgical", "Surgical Instruments", 120),
        Category::new("monitoring", "Monitoring Systems", 35),
        Category::new("imaging", "Medical Imaging", 25),
        Category::new("laboratory", "Laboratory Equipment", 60),
        Category::new("emergency", "Emergency Equipment", 30),
    ]
}

pub const HOSPITAL_DEPARTMENTS: &[&str] = &[
    "Cardiology",
    "Neurology",
    "Orthopedics",
    "Pediatrics",
    "Radiology",
    "Emergency",
    "ICU",
    "Surgery",
    "Laboratory",
    "Pulmonology",
    "Gastroenterology",
    "Oncology",
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LocationType {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

pub const LOCATION_TYPES: &[LocationType] = &[
    LocationType { id: "hospital", name: "Hospitals", icon: "🏥" },
    LocationType { id: "pharmacy", name: "Pharmacies", icon: "💊" },
    LocationType { id: "clinic", name: "Clinics", icon: "🩺" },
    LocationType { id: "diagnostic", name: "Diagnostic Centers", icon: "🔬" },
    LocationType { id: "jan-aushadhi", name: "Jan Aushadhi Stores", icon: "🏪" },
    LocationType { id: "emergency", name: "Emergency Services", icon: "🚑" },
];

pub const HEALTHCARE_SERVICES: &[&str] = &[
    "Emergency",
    "ICU",
    "Surgery",
    "Cardiology",
    "Neurology",
    "Orthopedics",
    "Pediatrics",
    "Gynecology",
    "Oncology",
    "Radiology",
    "Laboratory",
    "Pharmacy",
    "Physiotherapy",
];

/// Known pairwise interactions, matched on medicine name in either order.
pub fn known_interactions() -> Vec<DrugInteraction> {
    vec![DrugInteraction {
        medicine_1: "Paracetamol".to_string(),
        medicine_2: "Warfarin".to_string(),
        severity: "moderate".to_string(),
        description: "May increase bleeding risk".to_string(),
        recommendation: "Monitor INR levels closely".to_string(),
    }]
}

pub fn who_device_standards() -> JsonValue {
    json!({
        "who_standards": {
            "quality_management": "ISO 13485",
            "risk_management": "ISO 14971",
            "usability": "IEC 62366",
            "electrical_safety": "IEC 60601"
        },
        "compliance_requirements": [
            "Design controls and documentation",
            "Clinical evaluation and testing",
            "Post-market surveillance",
            "Quality management system"
        ],
        "certification_process": [
            "Technical documentation review",
            "Quality system assessment",
            "Clinical data evaluation",
            "Ongoing compliance monitoring"
        ]
    })
}

pub fn jan_aushadhi_statistics() -> JsonValue {
    json!({
        "total_stores": 8500,
        "states_covered": 36,
        "medicines_available": 1500,
        "average_savings": "50-90%",
        "beneficiaries": "10+ crores",
        "quality_certification": "WHO-GMP",
        "government_initiative": true,
        "established_year": 2008
    })
}

/// Reference unit prices (₹) used by the savings calculator.
pub const JAN_AUSHADHI_UNIT_PRICE: f64 = 2.50;
pub const BRAND_UNIT_PRICE: f64 = 12.00;

pub const JAN_AUSHADHI_SAVINGS_RANGE: &str = "60-80%";
pub const JAN_AUSHADHI_AVAILABILITY: &str = "Available at 8000+ Jan Aushadhi stores";

/// Built-in health agent personas, keyed by preset name.
pub fn agent_presets() -> Vec<(&'static str, AgentConfig)> {
    fn preset(
        name: &str,
        description: &str,
        personality: &str,
        specialties: &[&str],
        avatar_type: &str,
        voice_id: &str,
    ) -> AgentConfig {
        AgentConfig {
            name: name.to_string(),
            description: description.to_string(),
            personality: personality.to_string(),
            specialties: specialties.iter().map(|s| s.to_string()).collect(),
            avatar_type: avatar_type.to_string(),
            voice_id: voice_id.to_string(),
        }
    }

    vec![
        (
            "general_doctor",
            preset(
                "Dr. Aarogya",
                "General Medicine AI Doctor",
                "professional, empathetic, thorough",
                &["general_medicine", "preventive_care", "health_screening"],
                "doctor",
                "professional_male",
            ),
        ),
        (
            "pediatrician",
            preset(
                "Dr. Priya",
                "Pediatric AI Specialist",
                "gentle, patient, child-friendly",
                &["pediatrics", "child_development", "vaccination"],
                "pediatrician",
                "gentle_female",
            ),
        ),
        (
            "pharmacist",
            preset(
                "Pharmacist Raj",
                "AI Pharmacist for Medicine Guidance",
                "knowledgeable, precise, safety-focused",
                &["pharmacology", "drug_interactions", "dosage_guidance"],
                "pharmacist",
                "professional_male",
            ),
        ),
    ]
}

pub fn agent_preset(name: &str) -> Option<AgentConfig> {
    agent_presets()
        .into_iter()
        .find(|(key, _)| *key == name)
        .map(|(_, config)| config)
}
