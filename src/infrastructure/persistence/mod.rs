//! SQLite repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries against the schema in `migrations/`.
//!
//! # Repositories
//!
//! - [`SqliteLinkRepository`] - Link storage, lookup and access counting

pub mod sqlite_link_repository;

pub use sqlite_link_repository::SqliteLinkRepository;
