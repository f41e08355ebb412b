//! DTOs for link endpoints.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::dto::pagination::PaginationMeta;
use crate::domain::entities::Link;

/// Request body for `POST /shorten` and `PUT /shorten/{code}`.
///
/// Scheme and syntax of `url` are checked by the link service so that create
/// and update reject the same inputs.
#[derive(Debug, Deserialize, Validate)]
pub struct LinkRequest {
    #[validate(required(message = "url is required"))]
    pub url: Option<String>,
}

/// Public representation of a link.
///
/// `id` is rendered as a string.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: String,
    pub url: String,
    pub short_code: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id.to_string(),
            url: link.url,
            short_code: link.short_code,
            created_at: format_timestamp(link.created_at),
            updated_at: format_timestamp(link.updated_at),
        }
    }
}

/// A link together with its access counter.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStatsResponse {
    #[serde(flatten)]
    pub link: LinkResponse,
    pub access_count: i64,
}

impl From<Link> for LinkStatsResponse {
    fn from(link: Link) -> Self {
        let access_count = link.access_count;
        Self {
            link: link.into(),
            access_count,
        }
    }
}

/// Paginated list of links.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<LinkStatsResponse>,
}

/// Renders a timestamp as ISO-8601 with milliseconds and a `Z` suffix.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
