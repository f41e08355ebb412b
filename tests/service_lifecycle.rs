mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use shortener_api::AppError;
use shortener_api::routes::app_router;
use sqlx::SqlitePool;
use std::collections::HashSet;
use std::sync::Arc;

#[sqlx::test]
async fn test_thousand_links_have_unique_codes_and_ids(pool: SqlitePool) {
    let state = common::create_test_state(pool.clone());

    let mut codes = HashSet::new();
    let mut ids = HashSet::new();

    for i in 0..1000 {
        let link = state
            .link_service
            .create(&format!("https://example.com/{i}"))
            .await
            .unwrap();

        assert_eq!(link.short_code.len(), common::TEST_CODE_LENGTH);
        assert!(link.short_code.chars().all(|c| c.is_ascii_alphanumeric()));

        codes.insert(link.short_code);
        ids.insert(link.id);
    }

    assert_eq!(codes.len(), 1000);
    assert_eq!(ids.len(), 1000);
    assert_eq!(common::link_count(&pool).await, 1000);
}

#[sqlx::test]
async fn test_concurrent_creates_do_not_collide(pool: SqlitePool) {
    let state = common::create_test_state(pool.clone());
    let service = Arc::clone(&state.link_service);

    let tasks: Vec<_> = (0..20)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.create(&format!("https://example.com/{i}")).await })
        })
        .collect();

    let mut ids = HashSet::new();
    for task in tasks {
        let link = task.await.unwrap().unwrap();
        ids.insert(link.id);
    }

    assert_eq!(ids.len(), 20);
    assert_eq!(common::link_count(&pool).await, 20);
}

#[sqlx::test]
async fn test_get_returns_created_link(pool: SqlitePool) {
    let state = common::create_test_state(pool);

    let created = state
        .link_service
        .create("https://example.com/page")
        .await
        .unwrap();
    let fetched = state.link_service.get(&created.short_code).await.unwrap();

    assert_eq!(fetched, created);
}

#[sqlx::test]
async fn test_invalid_update_leaves_link_unchanged(pool: SqlitePool) {
    let state = common::create_test_state(pool);
    let created = state
        .link_service
        .create("https://example.com")
        .await
        .unwrap();

    let result = state
        .link_service
        .update(&created.short_code, "not-a-url")
        .await;
    assert!(matches!(result, Err(AppError::InvalidInput { .. })));

    let fetched = state.link_service.get(&created.short_code).await.unwrap();
    assert_eq!(fetched, created);
}

#[sqlx::test]
async fn test_ids_are_not_reused_after_delete(pool: SqlitePool) {
    let state = common::create_test_state(pool);

    let first = state.link_service.create("https://a.example").await.unwrap();
    let second = state.link_service.create("https://b.example").await.unwrap();
    assert!(state.link_service.delete(&second.short_code).await.unwrap());

    let third = state.link_service.create("https://c.example").await.unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(third.id, 3);
}

#[sqlx::test]
async fn test_full_link_lifecycle_over_http(pool: SqlitePool) {
    let state = common::create_test_state(pool);
    let server = TestServer::new(app_router(state, None).unwrap()).unwrap();

    let created = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/page" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let created: Value = created.json();
    assert_eq!(created["id"], "1");
    assert_eq!(created["url"], "https://example.com/page");
    let code = created["shortCode"].as_str().unwrap();

    let redirect = server.get(&format!("/r/{code}")).await;
    redirect.assert_status(StatusCode::FOUND);
    assert_eq!(redirect.header("location"), "https://example.com/page");

    let stats: Value = server.get(&format!("/shorten/{code}/stats")).await.json();
    assert_eq!(stats["accessCount"], 1);

    server
        .delete(&format!("/shorten/{code}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get(&format!("/shorten/{code}"))
        .await
        .assert_status_not_found();
    server
        .get(&format!("/r/{code}"))
        .await
        .assert_status_not_found();
}
