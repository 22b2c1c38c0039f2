//! Store trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure`. Mock implementations are generated via `mockall`
//! for unit tests.
//!
//! # Available Stores
//!
//! - [`LinkRepository`] - Durable URL to short code mapping
//! - [`CounterStore`] - Shared, atomic, TTL-bearing in-flight counters

pub mod counter_store;
pub mod link_repository;

pub use counter_store::CounterStore;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use counter_store::MockCounterStore;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
