//! Aarogya healthcare-information backend.
//!
//! Medicine, hospital-equipment and Jan Aushadhi catalogs, Haversine
//! proximity search over healthcare locations and generic-medicine stores,
//! third-party drug and places lookups, and AI video consultations.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod request_context;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::{AppState, AppStateOptions};
