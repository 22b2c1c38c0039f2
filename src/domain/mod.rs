//! Domain layer containing entities and store contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Store trait definitions implemented by the infrastructure layer
//!
//! The domain layer has no dependency on HTTP or on a concrete database;
//! the services in [`crate::application::services`] consume these traits.

pub mod entities;
pub mod repositories;
