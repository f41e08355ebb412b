//! Pagination query parameters.

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::{DisplayFromStr, serde_as};

use crate::config::PaginationConfig;
use crate::error::AppError;

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl PaginationParams {
    /// Resolves defaults and validates the requested page.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `page_size`: `config.default_page_size`
    ///
    /// # Validation
    ///
    /// - Page must be > 0
    /// - Page size must be between 1 and `config.max_page_size`
    ///
    /// # Returns
    ///
    /// `(page, page_size)` after defaults are applied.
    pub fn resolve(&self, config: PaginationConfig) -> Result<(u32, u32), AppError> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(config.default_page_size);

        if page == 0 {
            return Err(AppError::invalid_input(
                "Page must be greater than 0",
                json!({ "page": page }),
            ));
        }

        if !(1..=config.max_page_size).contains(&page_size) {
            return Err(AppError::invalid_input(
                format!("Page size must be between 1 and {}", config.max_page_size),
                json!({ "page_size": page_size }),
            ));
        }

        Ok((page, page_size))
    }
}

/// Converts a 1-based page into a database `(offset, limit)` pair.
pub fn offset_limit(page: u32, page_size: u32) -> (i64, i64) {
    let offset = (i64::from(page) - 1) * i64::from(page_size);
    (offset, i64::from(page_size))
}

/// Pagination metadata for responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn new(page: u32, page_size: u32, total_items: i64) -> Self {
        let total_pages = if total_items <= 0 {
            0
        } else {
            ((total_items - 1) / i64::from(page_size) + 1) as u32
        };

        Self {
            page,
            page_size,
            total_items,
            total_pages,
        }
    }
}
