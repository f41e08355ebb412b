//! Link lifecycle service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::application::services::link_not_found;
use crate::domain::entities::{DuplicateKey, Link, NewLink, timestamp_now};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use crate::utils::url_validator::validate_url;

/// A page of links together with the total number of links.
#[derive(Debug, Clone)]
pub struct LinkPage {
    pub items: Vec<Link>,
    pub total: i64,
}

/// Store-wide totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSummary {
    pub links: i64,
    pub accesses: i64,
}

/// Service for creating, reading, updating and deleting short links.
///
/// Validates target URLs and allocates ids and short codes. Uniqueness is
/// ultimately decided by [`LinkRepository::insert`]; a duplicate-key failure
/// there triggers a fresh allocation and another attempt.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
    code_length: usize,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service producing codes of `code_length` characters.
    pub fn new(link_repository: Arc<L>, code_length: usize) -> Self {
        Self {
            link_repository,
            code_length,
        }
    }

    /// Length of generated short codes.
    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Creates a short link for `url`.
    ///
    /// # Allocation
    ///
    /// - `id` comes from [`LinkRepository::next_id`]
    /// - `short_code` comes from [`Self::generate_unique_code`]
    /// - On a duplicate `short_code` a new code is drawn, on a duplicate `id`
    ///   a new id is read, then the insert is retried
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if `url` is not an absolute
    /// `http`/`https` URL. Nothing is persisted in that case.
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    pub async fn create(&self, url: &str) -> Result<Link, AppError> {
        ensure_valid_url(url)?;

        let created_at = timestamp_now();
        let mut id = self.link_repository.next_id().await?;
        let mut short_code = self.generate_unique_code().await?;

        loop {
            let new_link = NewLink {
                id,
                url: url.to_string(),
                short_code: short_code.clone(),
                created_at,
            };

            let err = match self.link_repository.insert(&new_link).await {
                Ok(link) => {
                    metrics::counter!("shortener_links_created_total").increment(1);
                    info!(id = link.id, code = %link.short_code, "Short link created");
                    return Ok(link);
                }
                Err(err) => err,
            };

            match err.duplicate() {
                Some(DuplicateKey::ShortCode) => {
                    warn!(code = %short_code, "Short code taken on insert, drawing a new one");
                    metrics::counter!("shortener_insert_retries_total", "key" => "short_code")
                        .increment(1);
                    short_code = self.generate_unique_code().await?;
                }
                Some(DuplicateKey::Id) => {
                    warn!(id, "Id taken on insert, allocating a new one");
                    metrics::counter!("shortener_insert_retries_total", "key" => "id")
                        .increment(1);
                    id = self.link_repository.next_id().await?;
                }
                None => return Err(err),
            }
        }
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    pub async fn get(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| link_not_found(code))
    }

    /// Replaces the target URL of a link.
    ///
    /// Only `url` and `updated_at` change; `id`, `short_code`, `created_at`
    /// and `access_count` are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] on a bad URL (checked before any
    /// lookup) and [`AppError::NotFound`] if the code is unknown.
    pub async fn update(&self, code: &str, url: &str) -> Result<Link, AppError> {
        ensure_valid_url(url)?;

        let link = self
            .link_repository
            .update_url(code, url, timestamp_now())
            .await?
            .ok_or_else(|| link_not_found(code))?;

        info!(code, "Short link updated");
        Ok(link)
    }

    /// Deletes a link.
    ///
    /// Returns `true` if a link was removed and `false` if nothing matched,
    /// so repeating a delete is harmless.
    pub async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let removed = self.link_repository.remove_by_code(code).await? > 0;

        if removed {
            info!(code, "Short link deleted");
        }

        Ok(removed)
    }

    /// Returns the full link including its access counter.
    pub async fn stats(&self, code: &str) -> Result<Link, AppError> {
        self.get(code).await
    }

    /// Lists links ordered by id.
    pub async fn list(&self, offset: i64, limit: i64) -> Result<LinkPage, AppError> {
        let items = self.link_repository.list(offset, limit).await?;
        let total = self.link_repository.count().await?;

        Ok(LinkPage { items, total })
    }

    /// Returns the number of links and the sum of their access counters.
    pub async fn summary(&self) -> Result<LinkSummary, AppError> {
        Ok(LinkSummary {
            links: self.link_repository.count().await?,
            accesses: self.link_repository.total_accesses().await?,
        })
    }

    /// Probes the underlying store.
    pub async fn check_store(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }

    /// Draws random codes until one is not assigned to a live link.
    ///
    /// There is no attempt limit: the code space is far larger than the
    /// number of links, so collisions are rare. Nothing is reserved; the
    /// following insert still has to win the race.
    pub async fn generate_unique_code(&self) -> Result<String, AppError> {
        loop {
            let code = generate_code(self.code_length);

            if !self.link_repository.exists(&code).await? {
                return Ok(code);
            }

            debug!(code = %code, "Generated short code already exists");
            metrics::counter!("shortener_code_collisions_total").increment(1);
        }
    }
}

fn ensure_valid_url(url: &str) -> Result<(), AppError> {
    validate_url(url).map(|_| ()).map_err(|e| {
        AppError::invalid_input(
            "url must be a valid http/https URL",
            json!({ "reason": e.to_string() }),
        )
    })
}
