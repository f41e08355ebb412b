#![allow(dead_code)]

use chrono::{DateTime, Utc};
use shortener_api::config::PaginationConfig;
use shortener_api::domain::entities::timestamp_now;
use shortener_api::state::AppState;
use sqlx::SqlitePool;
use std::sync::Arc;

pub const TEST_CODE_LENGTH: usize = 6;

pub async fn create_test_link(pool: &SqlitePool, code: &str, url: &str) -> i64 {
    create_test_link_at(pool, code, url, timestamp_now()).await
}

pub async fn create_test_link_at(
    pool: &SqlitePool,
    code: &str,
    url: &str,
    created_at: DateTime<Utc>,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO links (short_code, url, created_at, updated_at) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(code)
    .bind(url)
    .bind(created_at)
    .bind(created_at)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn access_count(pool: &SqlitePool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT access_count FROM links WHERE short_code = ?")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn link_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    create_test_state_with(pool, true)
}

pub fn create_test_state_with(pool: SqlitePool, access_touches_updated_at: bool) -> AppState {
    AppState::new(
        Arc::new(pool),
        TEST_CODE_LENGTH,
        access_touches_updated_at,
        PaginationConfig {
            default_page_size: 25,
            max_page_size: 100,
        },
    )
}
