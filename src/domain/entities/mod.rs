//! Core domain entities.
//!
//! A shortener has exactly one entity, the [`Link`]. Creation goes through
//! [`NewLink`], which carries the values allocated by the lifecycle manager
//! before the record is persisted.

pub mod link;

pub use link::{DuplicateKey, Link, NewLink, timestamp_now};
