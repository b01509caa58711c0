mod common;

use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use serde_json::json;
use shortlink::api::handlers::{info_handler, redirect_handler};
use shortlink::state::AppState;

fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/api/info/{code}", get(info_handler))
        .route("/{code}", get(redirect_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_redirect_success() {
    let pool = common::memory_pool().await;
    common::create_test_short_url(&pool, "abc123", "https://www.rust-lang.org/learn").await;
    let server = server(common::create_test_state(pool.clone()));

    let response = server.get("/abc123").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(
        response.header("location"),
        "https://www.rust-lang.org/learn"
    );
    assert_eq!(common::get_clicks(&pool, "abc123").await, 1);
}

#[tokio::test]
async fn test_redirect_counts_every_visit() {
    let pool = common::memory_pool().await;
    common::create_test_short_url(&pool, "count1", "https://example.com").await;
    let server = server(common::create_test_state(pool.clone()));

    for _ in 0..3 {
        server
            .get("/count1")
            .await
            .assert_status(StatusCode::FOUND);
    }

    assert_eq!(common::get_clicks(&pool, "count1").await, 3);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let pool = common::memory_pool().await;
    let server = server(common::create_test_state(pool));

    let response = server.get("/nonexistent").await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "error": "not found" }));
}

#[tokio::test]
async fn test_redirect_is_case_sensitive() {
    let pool = common::memory_pool().await;
    common::create_test_short_url(&pool, "AbCdEf", "https://example.com").await;
    let server = server(common::create_test_state(pool));

    server.get("/AbCdEf").await.assert_status(StatusCode::FOUND);
    server.get("/abcdef").await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_redirect_expired_link() {
    let pool = common::memory_pool().await;
    common::create_expired_short_url(&pool, "expired", "https://example.com").await;
    let server = server(common::create_test_state(pool.clone()));

    let response = server.get("/expired").await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "error": "not found" }));

    // The record itself is kept and still visible through metadata.
    server.get("/api/info/expired").await.assert_status_ok();
    assert_eq!(common::get_clicks(&pool, "expired").await, 0);
}

#[tokio::test]
async fn test_redirect_keeps_query_and_fragment() {
    let pool = common::memory_pool().await;
    let target = "https://example.com/search?q=rust&page=2#results";
    common::create_test_short_url(&pool, "query1", target).await;
    let server = server(common::create_test_state(pool));

    let response = server.get("/query1").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), target);
}

#[tokio::test]
async fn test_redirect_unsendable_target_is_not_counted() {
    let pool = common::memory_pool().await;
    // Bypasses validation: neither a valid header value nor a parseable URL.
    common::create_test_short_url(&pool, "broken", "not a url\u{7f}").await;
    let server = server(common::create_test_state(pool.clone()));

    let response = server.get("/broken").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({ "error": "internal error" }));
    assert_eq!(common::get_clicks(&pool, "broken").await, 0);
}
