//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, SubsecRound, Utc};
use std::fmt;

/// Current UTC time truncated to millisecond precision.
///
/// Link timestamps are rendered as ISO-8601 with a millisecond fraction, so
/// they are stored at that precision to round-trip unchanged.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// A stored association between a short code and its target URL.
///
/// `id` and `short_code` are both unique and never change after creation.
/// `access_count` only grows; it is reset only by deleting and recreating
/// the link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub access_count: i64,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        url: String,
        short_code: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        access_count: i64,
    ) -> Self {
        Self {
            id,
            url,
            short_code,
            created_at,
            updated_at,
            access_count,
        }
    }
}

/// Input data for inserting a new link.
///
/// The lifecycle manager allocates `id` and `short_code` before the insert;
/// the store is the final arbiter of their uniqueness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub id: i64,
    pub url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
}

impl From<NewLink> for Link {
    fn from(new_link: NewLink) -> Self {
        Link::new(
            new_link.id,
            new_link.url,
            new_link.short_code,
            new_link.created_at,
            new_link.created_at,
            0,
        )
    }
}

/// The unique key an insert collided on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateKey {
    Id,
    ShortCode,
}

impl fmt::Display for DuplicateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicateKey::Id => f.write_str("id"),
            DuplicateKey::ShortCode => f.write_str("short code"),
        }
    }
}
