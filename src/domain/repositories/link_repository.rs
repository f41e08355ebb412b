//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Durable storage of [`Link`] records, keyed by `short_code` and by `id`.
///
/// The store is the sole arbiter of uniqueness: [`LinkRepository::insert`]
/// is an atomic insert-if-absent on both keys, so callers never need a
/// prior existence check to stay correct.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteLinkRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link with `access_count = 0` and `updated_at = created_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateKey`] naming the colliding key if either
    /// `id` or `short_code` already exists.
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn insert(&self, new_link: &NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Checks whether a short code is currently assigned.
    async fn exists(&self, code: &str) -> Result<bool, AppError>;

    /// Returns the next id to allocate: the highest id ever assigned plus one,
    /// or `1` for an empty store.
    ///
    /// Not atomic with the following insert; a concurrent writer can observe
    /// the same value, in which case one insert fails with a duplicate `id`.
    async fn next_id(&self) -> Result<i64, AppError>;

    /// Replaces the target URL and `updated_at` of a link.
    ///
    /// Returns the updated link, or `Ok(None)` if the code is unknown.
    async fn update_url(
        &self,
        code: &str,
        url: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Link>, AppError>;

    /// Removes a link. Returns the number of removed rows (0 or 1).
    async fn remove_by_code(&self, code: &str) -> Result<u64, AppError>;

    /// Atomically increments `access_count` by one.
    ///
    /// When `touched_at` is `Some`, `updated_at` is set to it in the same
    /// statement. Returns `false` if the code is unknown.
    async fn increment_access(
        &self,
        code: &str,
        touched_at: Option<DateTime<Utc>>,
    ) -> Result<bool, AppError>;

    /// Lists links ordered by ascending id.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Link>, AppError>;

    /// Counts live links.
    async fn count(&self) -> Result<i64, AppError>;

    /// Sums `access_count` over all live links.
    async fn total_accesses(&self) -> Result<i64, AppError>;

    /// Cheap connectivity check used by health checks.
    async fn ping(&self) -> Result<(), AppError>;
}
