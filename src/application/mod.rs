//! Application layer services implementing business logic.
//!
//! Services consume the store traits of [`crate::domain::repositories`] and
//! expose the operations used by the HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::admission_controller::AdmissionController`] - Global and per-user in-flight limits
//! - [`services::link_registry::LinkRegistry`] - URL to code mapping with lazy expiry
//! - [`services::resolution_service::ResolutionService`] - Create-or-fetch, inspect, redirect

pub mod services;
