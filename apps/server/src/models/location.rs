use aarogya_geo::{GeoPoint, Locatable};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A hospital, pharmacy, clinic or diagnostic centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthcareLocation {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    #[serde(flatten)]
    pub coordinates: GeoPoint,
    pub phone: String,
    pub website: Option<String>,
    pub rating: f64,
    pub reviews_count: u32,
    pub services: Vec<String>,
    pub operating_hours: String,
    pub emergency_services: bool,
    pub insurance_accepted: Vec<String>,
}

impl Locatable for HealthcareLocation {
    fn position(&self) -> GeoPoint {
        self.coordinates
    }
}

impl HealthcareLocation {
    /// True when the location offers at least one of `wanted`.
    pub fn offers_any(&self, wanted: &[String]) -> bool {
        wanted.iter().any(|w| self.services.contains(w))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationSearchRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: Option<f64>,
    pub location_type: Option<String>,
    pub services: Option<Vec<String>>,
    #[serde(default)]
    pub emergency_only: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: Option<f64>,
    pub location_type: Option<String>,
    #[serde(default)]
    pub emergency_only: bool,
    #[validate(range(min = 1, message = "limit must be at least 1"))]
    pub limit: Option<usize>,
}

/// Normalized proximity query shared by the POST search and nearby routes.
#[derive(Debug, Clone, Default)]
pub struct LocationQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: Option<f64>,
    pub location_type: Option<String>,
    pub services: Option<Vec<String>>,
    pub emergency_only: bool,
}

impl From<LocationSearchRequest> for LocationQuery {
    fn from(r: LocationSearchRequest) -> Self {
        Self {
            latitude: r.latitude,
            longitude: r.longitude,
            radius_km: r.radius_km,
            location_type: r.location_type,
            services: r.services,
            emergency_only: r.emergency_only,
        }
    }
}

impl From<NearbyQuery> for LocationQuery {
    fn from(q: NearbyQuery) -> Self {
        Self {
            latitude: q.latitude,
            longitude: q.longitude,
            radius_km: q.radius_km,
            location_type: q.location_type,
            services: None,
            emergency_only: q.emergency_only,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DirectionsQuery {
    #[validate(range(min = -90.0, max = 90.0, message = "from_latitude must be within [-90, 90]"))]
    pub from_latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "from_longitude must be within [-180, 180]"))]
    pub from_longitude: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DirectionsResponse {
    pub location_name: String,
    pub distance_km: f64,
    pub eta_minutes: u64,
    pub estimated_time: String,
    pub google_maps_url: String,
    pub coordinates: GeoPoint,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coordinates_flatten_into_the_record() {
        let raw = json!({
            "id": "loc_x",
            "name": "Test Clinic",
            "type": "clinic",
            "address": "1 Main Road",
            "city": "Pune",
            "state": "Maharashtra",
            "country": "India",
            "latitude": 18.52,
            "longitude": 73.85,
            "phone": "+91 20 0000 0000",
            "website": null,
            "rating": 4.0,
            "reviews_count": 10,
            "services": ["Pediatrics"],
            "operating_hours": "9-5",
            "emergency_services": false,
            "insurance_accepted": []
        });

        let location: HealthcareLocation = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(location.kind, "clinic");
        assert_eq!(location.coordinates.latitude(), 18.52);
        assert_eq!(serde_json::to_value(&location).unwrap(), raw);
    }

    #[test]
    fn out_of_range_coordinates_do_not_deserialize() {
        let raw = json!({
            "id": "loc_x", "name": "Bad", "type": "clinic", "address": "", "city": "",
            "state": "", "country": "", "latitude": 123.0, "longitude": 0.0, "phone": "",
            "website": null, "rating": 0.0, "reviews_count": 0, "services": [],
            "operating_hours": "", "emergency_services": false, "insurance_accepted": []
        });
        assert!(serde_json::from_value::<HealthcareLocation>(raw).is_err());
    }
}
