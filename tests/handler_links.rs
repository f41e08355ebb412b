mod common;

use axum::ServiceExt;
use axum::body::Bytes;
use axum::extract::Request;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use shortener_api::config::RateLimitConfig;
use shortener_api::routes::{app_router, normalize};
use sqlx::SqlitePool;

fn make_server(pool: SqlitePool) -> TestServer {
    let state = common::create_test_state(pool);
    TestServer::new(app_router(state, None).unwrap()).unwrap()
}

fn assert_error_code(body: &Value, code: &str) {
    assert_eq!(body["error"]["code"], code, "unexpected body: {body}");
    assert!(body["error"]["message"].is_string());
}

// ─── CREATE ──────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_create_link_success(pool: SqlitePool) {
    let server = make_server(pool.clone());

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/page" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();

    assert_eq!(body["id"], "1");
    assert_eq!(body["url"], "https://example.com/page");
    assert_eq!(body["createdAt"], body["updatedAt"]);
    assert!(body.get("accessCount").is_none());

    let code = body["shortCode"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));

    let created_at = body["createdAt"].as_str().unwrap();
    assert!(created_at.ends_with('Z'));
    assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());

    assert_eq!(common::link_count(&pool).await, 1);
}

#[sqlx::test]
async fn test_create_assigns_increasing_ids(pool: SqlitePool) {
    let server = make_server(pool);

    let first: Value = server
        .post("/shorten")
        .json(&json!({ "url": "https://a.example" }))
        .await
        .json();
    let second: Value = server
        .post("/shorten")
        .json(&json!({ "url": "https://b.example" }))
        .await
        .json();

    assert_eq!(first["id"], "1");
    assert_eq!(second["id"], "2");
    assert_ne!(first["shortCode"], second["shortCode"]);
}

#[sqlx::test]
async fn test_create_rejects_invalid_urls(pool: SqlitePool) {
    let server = make_server(pool.clone());

    for url in ["not-a-url", "ftp://host/x", "", "/relative/path"] {
        let response = server.post("/shorten").json(&json!({ "url": url })).await;

        response.assert_status_bad_request();
        assert_error_code(&response.json(), "invalid_input");
    }

    assert_eq!(common::link_count(&pool).await, 0);
}

#[sqlx::test]
async fn test_create_missing_url(pool: SqlitePool) {
    let server = make_server(pool);

    let response = server.post("/shorten").json(&json!({})).await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_error_code(&body, "invalid_input");
    assert_eq!(body["error"]["details"]["fields"], json!(["url"]));
}

#[sqlx::test]
async fn test_create_malformed_json(pool: SqlitePool) {
    let server = make_server(pool);

    let response = server
        .post("/shorten")
        .content_type("application/json")
        .bytes(Bytes::from_static(b"{\"url\": "))
        .await;

    response.assert_status_bad_request();
    assert_error_code(&response.json(), "invalid_input");
}

#[sqlx::test]
async fn test_create_wrong_url_type(pool: SqlitePool) {
    let server = make_server(pool);

    let response = server.post("/shorten").json(&json!({ "url": 42 })).await;

    response.assert_status_bad_request();
    assert_error_code(&response.json(), "invalid_input");
}

#[sqlx::test]
async fn test_create_rate_limited(pool: SqlitePool) {
    let state = common::create_test_state(pool);
    let rate_limit = RateLimitConfig {
        enabled: true,
        per_second: 60,
        burst_size: 2,
        behind_proxy: true,
    };
    let server = TestServer::new(app_router(state, Some(&rate_limit)).unwrap()).unwrap();

    for _ in 0..2 {
        server
            .post("/shorten")
            .add_header("X-Forwarded-For", "203.0.113.7")
            .json(&json!({ "url": "https://example.com" }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    server
        .post("/shorten")
        .add_header("X-Forwarded-For", "203.0.113.7")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);

    // Other clients and other routes are unaffected.
    server
        .post("/shorten")
        .add_header("X-Forwarded-For", "198.51.100.1")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .assert_status(StatusCode::CREATED);
    server.get("/shorten").await.assert_status_ok();
}

// ─── GET ─────────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_get_link_matches_create(pool: SqlitePool) {
    let server = make_server(pool);

    let created: Value = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/page" }))
        .await
        .json();
    let code = created["shortCode"].as_str().unwrap();

    let response = server.get(&format!("/shorten/{code}")).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), created);
}

#[sqlx::test]
async fn test_get_link_not_found(pool: SqlitePool) {
    let server = make_server(pool);

    let response = server.get("/shorten/nope42").await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_error_code(&body, "not_found");
    assert_eq!(body["error"]["details"]["code"], "nope42");
}

// ─── LIST ────────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_list_links_paginated(pool: SqlitePool) {
    for i in 0..5 {
        common::create_test_link(&pool, &format!("list0{i}"), "https://example.com").await;
    }
    let server = make_server(pool);

    let response = server
        .get("/shorten")
        .add_query_param("page", 2)
        .add_query_param("page_size", 2)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();

    assert_eq!(body["pagination"]["page"], 2);
    assert_eq!(body["pagination"]["pageSize"], 2);
    assert_eq!(body["pagination"]["totalItems"], 5);
    assert_eq!(body["pagination"]["totalPages"], 3);

    let codes: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["shortCode"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["list02", "list03"]);
    assert_eq!(body["items"][0]["accessCount"], 0);
}

#[sqlx::test]
async fn test_list_links_empty(pool: SqlitePool) {
    let server = make_server(pool);

    let body: Value = server.get("/shorten").await.json();

    assert_eq!(body["items"], json!([]));
    assert_eq!(body["pagination"]["totalItems"], 0);
    assert_eq!(body["pagination"]["pageSize"], 25);
}

#[sqlx::test]
async fn test_list_links_invalid_page(pool: SqlitePool) {
    let server = make_server(pool);

    let response = server.get("/shorten").add_query_param("page", 0).await;
    response.assert_status_bad_request();
    assert_error_code(&response.json(), "invalid_input");

    let response = server
        .get("/shorten")
        .add_query_param("page_size", 101)
        .await;
    response.assert_status_bad_request();
}

#[sqlx::test]
async fn test_list_links_malformed_query(pool: SqlitePool) {
    let server = make_server(pool);

    let response = server.get("/shorten").add_query_param("page", "abc").await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_error_code(&body, "invalid_input");
    assert!(body["error"]["details"]["reason"].is_string());
}

// ─── UPDATE ──────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_update_link_success(pool: SqlitePool) {
    let server = make_server(pool.clone());

    let created: Value = server
        .post("/shorten")
        .json(&json!({ "url": "https://old.example" }))
        .await
        .json();
    let code = created["shortCode"].as_str().unwrap();

    server
        .get(&format!("/r/{code}"))
        .await
        .assert_status(StatusCode::FOUND);

    let response = server
        .put(&format!("/shorten/{code}"))
        .json(&json!({ "url": "https://new.example/path" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();

    assert_eq!(body["url"], "https://new.example/path");
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["shortCode"], created["shortCode"]);
    assert_eq!(body["createdAt"], created["createdAt"]);
    assert_eq!(common::access_count(&pool, code).await, 1);
}

#[sqlx::test]
async fn test_update_link_invalid_url(pool: SqlitePool) {
    common::create_test_link(&pool, "upd001", "https://old.example").await;
    let server = make_server(pool.clone());

    let response = server
        .put("/shorten/upd001")
        .json(&json!({ "url": "ftp://host/x" }))
        .await;

    response.assert_status_bad_request();
    assert_error_code(&response.json(), "invalid_input");

    let body: Value = server.get("/shorten/upd001").await.json();
    assert_eq!(body["url"], "https://old.example");
}

#[sqlx::test]
async fn test_update_link_not_found(pool: SqlitePool) {
    let server = make_server(pool);

    let response = server
        .put("/shorten/ghost1")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_not_found();
    assert_error_code(&response.json(), "not_found");
}

// ─── DELETE ──────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_delete_link_success(pool: SqlitePool) {
    common::create_test_link(&pool, "del001", "https://example.com").await;
    let server = make_server(pool.clone());

    server
        .delete("/shorten/del001")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server.get("/shorten/del001").await.assert_status_not_found();
    assert_eq!(common::link_count(&pool).await, 0);
}

#[sqlx::test]
async fn test_delete_link_twice(pool: SqlitePool) {
    common::create_test_link(&pool, "del002", "https://example.com").await;
    let server = make_server(pool);

    server
        .delete("/shorten/del002")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = server.delete("/shorten/del002").await;
    response.assert_status_not_found();
    assert_error_code(&response.json(), "not_found");
}

// ─── INDEX ───────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_index_lists_endpoints(pool: SqlitePool) {
    let server = make_server(pool);

    let response = server.get("/").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["service"], "shortener-api");
    assert!(
        body["endpoints"]
            .as_array()
            .unwrap()
            .iter()
            .any(|e| e["path"] == "/r/{code}")
    );
}

// ─── TRAILING SLASH ──────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_trailing_slash_is_trimmed(pool: SqlitePool) {
    let state = common::create_test_state(pool);
    let app = normalize(app_router(state, None).unwrap());
    let server = TestServer::new(ServiceExt::<Request>::into_make_service(app)).unwrap();

    let response = server
        .post("/shorten/")
        .json(&json!({ "url": "https://example.com/page" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let code = response.json::<Value>()["shortCode"]
        .as_str()
        .unwrap()
        .to_string();

    let response = server.get(&format!("/shorten/{code}/stats/")).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["shortCode"], code);
    assert_eq!(body["accessCount"], 0);
}
