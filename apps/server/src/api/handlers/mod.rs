//! Request handlers.
//!
//! Handlers extract and validate input, call one service method, and let
//! `crate::Error` shape failures.

pub mod auth;
pub mod consultations;
pub mod external;
pub mod health;
pub mod hospital;
pub mod jan_aushadhi;
pub mod locations;
pub mod medicines;
pub mod metrics;
