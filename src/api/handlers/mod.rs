//! HTTP request handlers.
//!
//! Each handler module corresponds to one endpoint.

pub mod generate;
pub mod health;
pub mod inspect;
pub mod redirect;

pub use generate::generate_handler;
pub use health::health_handler;
pub use inspect::inspect_handler;
pub use redirect::redirect_handler;
