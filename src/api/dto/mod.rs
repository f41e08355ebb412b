//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Response bodies use camelCase field names.

pub mod health;
pub mod index;
pub mod link;
pub mod pagination;
