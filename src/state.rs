//! Shared application state injected into every handler.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::application::services::{LinkService, RedirectService};
use crate::config::PaginationConfig;
use crate::infrastructure::persistence::SqliteLinkRepository;

/// Process-scoped state, created once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<SqliteLinkRepository>>,
    pub redirect_service: Arc<RedirectService<SqliteLinkRepository>>,
    pub pagination: PaginationConfig,
}

impl AppState {
    /// Wires repositories and services on top of a connection pool.
    pub fn new(
        pool: Arc<SqlitePool>,
        code_length: usize,
        access_touches_updated_at: bool,
        pagination: PaginationConfig,
    ) -> Self {
        let link_repository = Arc::new(SqliteLinkRepository::new(pool));

        Self {
            link_service: Arc::new(LinkService::new(link_repository.clone(), code_length)),
            redirect_service: Arc::new(RedirectService::new(
                link_repository,
                access_touches_updated_at,
            )),
            pagination,
        }
    }
}
