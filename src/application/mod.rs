//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link lifecycle: create, read, update, delete
//! - [`services::redirect_service::RedirectService`] - Short code resolution and visit counting

pub mod services;
