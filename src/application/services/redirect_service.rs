//! Short code resolution for redirects.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::services::link_not_found;
use crate::domain::entities::timestamp_now;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Translates a short code into its redirect target and records the visit.
///
/// Visit counting is best-effort: the redirect decision is made once the
/// link is found, and a failing counter update is logged, not returned.
pub struct RedirectService<L: LinkRepository> {
    link_repository: Arc<L>,
    touch_updated_at: bool,
}

impl<L: LinkRepository> RedirectService<L> {
    /// Creates a new redirect service.
    ///
    /// When `touch_updated_at` is `true` every counted visit also refreshes
    /// the link's `updated_at`.
    pub fn new(link_repository: Arc<L>, touch_updated_at: bool) -> Self {
        Self {
            link_repository,
            touch_updated_at,
        }
    }

    /// Resolves `code` to the stored target URL and increments its access counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown and
    /// [`AppError::StoreUnavailable`] if the lookup itself fails.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let link = self
            .link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| link_not_found(code))?;

        let touched_at = self.touch_updated_at.then(timestamp_now);

        match self.link_repository.increment_access(code, touched_at).await {
            Ok(true) => {}
            Ok(false) => debug!(code, "Link removed before its visit was counted"),
            Err(e) => {
                warn!(code, error = %e, "Failed to record visit");
                metrics::counter!("shortener_access_increment_failures_total").increment(1);
            }
        }

        metrics::counter!("shortener_redirects_total").increment(1);
        Ok(link.url)
    }
}
