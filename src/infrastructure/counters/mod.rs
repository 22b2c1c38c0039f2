//! Counter store implementations backing admission control.
//!
//! - [`RedisCounterStore`] - Redis-backed, shared by every service instance
//! - [`MemoryCounterStore`] - In-process counters for tests; never shared, so the server does not use it

mod memory_counter_store;
mod redis_counter_store;

pub use memory_counter_store::MemoryCounterStore;
pub use redis_counter_store::RedisCounterStore;
