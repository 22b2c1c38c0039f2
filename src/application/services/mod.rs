//! Business logic services for the application layer.

pub mod admission_controller;
pub mod link_registry;
pub mod resolution_service;

pub use admission_controller::{
    Admission, AdmissionController, AdmissionLimits, AdmissionPermit, GLOBAL_COUNTER_KEY,
    user_counter_key,
};
pub use link_registry::{LINK_TTL, LinkRegistry, LinkResolution, UpsertOutcome};
pub use resolution_service::{ResolutionService, ServiceSettings};
