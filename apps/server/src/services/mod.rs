//! Domain services: catalog queries, proximity search, and provider gateways.

pub mod consultation;
pub mod external;
pub mod hospital;
pub mod jan_aushadhi;
pub mod location;
pub mod medicine;
pub mod tavus;

pub use consultation::{ConsultationService, ANONYMOUS_USER};
pub use external::{empty_interactions, GeocodedAddress, HttpGateway, ThirdPartyGateway};
pub use hospital::HospitalService;
pub use jan_aushadhi::JanAushadhiService;
pub use location::{google_maps_directions_url, LocationService};
pub use medicine::MedicineService;
pub use tavus::{ConsultationGateway, TavusClient};
