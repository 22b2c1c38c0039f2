//! Data Transfer Objects for API requests and responses.

pub mod error;
pub mod generate;
pub mod health;
pub mod inspect;
