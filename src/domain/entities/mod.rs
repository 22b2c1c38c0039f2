//! Core domain entities.
//!
//! - [`LinkRecord`] - A persisted URL to short code mapping
//! - [`NewLinkRecord`] - Input for inserting or refreshing a mapping

pub mod link_record;

pub use link_record::{
    CREATED_AT_FORMAT, LinkRecord, NewLinkRecord, format_created_at, parse_created_at,
};
