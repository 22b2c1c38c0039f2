//! Infrastructure layer for external stores.
//!
//! This layer implements the store traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`counters`] - In-flight counter stores (Redis and in-process)
//! - [`persistence`] - Link repositories (PostgreSQL and in-process)

pub mod counters;
pub mod persistence;
