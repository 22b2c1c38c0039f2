//! Utility functions used across the application.
//!
//! - [`code_generator`] - Deterministic short code derivation

pub mod code_generator;
