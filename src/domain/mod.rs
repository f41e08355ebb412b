//! Domain layer containing business entities and the Link Store contract.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits defined here are implemented in
//! [`crate::infrastructure::persistence`] and consumed by
//! [`crate::application::services`].
//!
//! # Modules
//!
//! - [`entities`] - The [`entities::Link`] record and its creation input
//! - [`repositories`] - The [`repositories::LinkRepository`] trait

pub mod entities;
pub mod repositories;
