mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use serde_json::Value;
use shortener_api::api::handlers::link_stats_handler;
use sqlx::SqlitePool;

fn make_server(pool: SqlitePool) -> TestServer {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/shorten/{code}/stats", get(link_stats_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_stats_success(pool: SqlitePool) {
    let id = common::create_test_link(&pool, "stat01", "https://example.com/page").await;
    sqlx::query("UPDATE links SET access_count = 3 WHERE short_code = ?")
        .bind("stat01")
        .execute(&pool)
        .await
        .unwrap();

    let server = make_server(pool);
    let response = server.get("/shorten/stat01/stats").await;

    response.assert_status_ok();
    let body: Value = response.json();

    assert_eq!(body["id"], id.to_string());
    assert_eq!(body["url"], "https://example.com/page");
    assert_eq!(body["shortCode"], "stat01");
    assert_eq!(body["accessCount"], 3);
    assert!(body["createdAt"].is_string());
    assert!(body["updatedAt"].is_string());
}

#[sqlx::test]
async fn test_stats_not_found(pool: SqlitePool) {
    let server = make_server(pool);

    let response = server.get("/shorten/nonexistent/stats").await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "not_found");
}
