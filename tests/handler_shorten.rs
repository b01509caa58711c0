mod common;

use axum::{Router, http::StatusCode, routing::post};
use axum_test::TestServer;
use serde_json::{Value, json};
use shortlink::api::handlers::shorten_handler;
use shortlink::state::AppState;
use shortlink::utils::code_generator::ALPHABET;

fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/shorten", post(shorten_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_shorten_success() {
    let pool = common::memory_pool().await;
    let server = server(common::create_test_state(pool.clone()));

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://www.example.com/some/long/path?x=1" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    let code = json["code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.bytes().all(|b| ALPHABET.contains(&b)));
    assert_eq!(
        json["original_url"],
        "https://www.example.com/some/long/path?x=1"
    );
    assert_eq!(json["clicks"], 0);
    assert!(json["created_at"].is_string());
    assert!(json["expires_at"].is_null());
    assert_eq!(
        json["short_url"],
        format!("{}/{}", common::TEST_BASE_URL, code)
    );

    assert_eq!(common::count_short_urls(&pool).await, 1);
}

#[tokio::test]
async fn test_shorten_same_url_returns_same_code() {
    let pool = common::memory_pool().await;
    let server = server(common::create_test_state(pool.clone()));

    let first = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;
    let second = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    first.assert_status(StatusCode::CREATED);
    second.assert_status(StatusCode::CREATED);
    assert_eq!(
        first.json::<Value>()["code"],
        second.json::<Value>()["code"]
    );
    assert_eq!(common::count_short_urls(&pool).await, 1);
}

#[tokio::test]
async fn test_shorten_dedup_ignores_new_expiry() {
    let pool = common::memory_pool().await;
    let server = server(common::create_test_state(pool));

    let first = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .json::<Value>();
    let second = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com", "expiry_days": 3 }))
        .await
        .json::<Value>();

    assert_eq!(first["code"], second["code"]);
    assert!(second["expires_at"].is_null());
}

#[tokio::test]
async fn test_shorten_different_urls_get_different_codes() {
    let pool = common::memory_pool().await;
    let server = server(common::create_test_state(pool.clone()));

    let a = server
        .post("/shorten")
        .json(&json!({ "url": "https://a.example.com" }))
        .await
        .json::<Value>();
    let b = server
        .post("/shorten")
        .json(&json!({ "url": "https://b.example.com" }))
        .await
        .json::<Value>();

    assert_ne!(a["code"], b["code"]);
    assert_eq!(common::count_short_urls(&pool).await, 2);
}

#[tokio::test]
async fn test_shorten_with_expiry_days() {
    let pool = common::memory_pool().await;
    let server = server(common::create_test_state(pool));

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com", "expiry_days": 7 }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    let created_at: chrono::DateTime<chrono::Utc> =
        json["created_at"].as_str().unwrap().parse().unwrap();
    let expires_at: chrono::DateTime<chrono::Utc> =
        json["expires_at"].as_str().unwrap().parse().unwrap();

    assert_eq!(expires_at - created_at, chrono::Duration::days(7));
}

#[tokio::test]
async fn test_shorten_accepts_string_expiry() {
    let pool = common::memory_pool().await;
    let server = server(common::create_test_state(pool));

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com", "expiry_days": "2" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert!(response.json::<Value>()["expires_at"].is_string());
}

#[tokio::test]
async fn test_shorten_zero_expiry_means_never() {
    let pool = common::memory_pool().await;
    let server = server(common::create_test_state(pool));

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com", "expiry_days": 0 }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert!(response.json::<Value>()["expires_at"].is_null());
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let pool = common::memory_pool().await;
    let server = server(common::create_test_state(pool.clone()));

    for url in ["not a url", "ftp://example.com/file", "https://", "example.com"] {
        let response = server.post("/shorten").json(&json!({ "url": url })).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "invalid url");
    }

    assert_eq!(common::count_short_urls(&pool).await, 0);
}

#[tokio::test]
async fn test_shorten_missing_url() {
    let pool = common::memory_pool().await;
    let server = server(common::create_test_state(pool.clone()));

    let response = server
        .post("/shorten")
        .json(&json!({ "expiry_days": 5 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "url is required");
    assert_eq!(common::count_short_urls(&pool).await, 0);
}

#[tokio::test]
async fn test_shorten_empty_url() {
    let pool = common::memory_pool().await;
    let server = server(common::create_test_state(pool));

    let response = server.post("/shorten").json(&json!({ "url": "" })).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "url is required");
}

#[tokio::test]
async fn test_shorten_rejects_non_json_body() {
    let pool = common::memory_pool().await;
    let server = server(common::create_test_state(pool));

    let response = server.post("/shorten").text("url=https://example.com").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "invalid request body" }));
}

#[tokio::test]
async fn test_shorten_rejects_non_numeric_expiry() {
    let pool = common::memory_pool().await;
    let server = server(common::create_test_state(pool.clone()));

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com", "expiry_days": "soon" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "invalid request body" }));
    assert_eq!(common::count_short_urls(&pool).await, 0);
}

#[tokio::test]
async fn test_shorten_accepts_fractional_expiry() {
    let pool = common::memory_pool().await;
    let server = server(common::create_test_state(pool));

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.org", "expiry_days": 7.0 }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    let created_at: chrono::DateTime<chrono::Utc> =
        json["created_at"].as_str().unwrap().parse().unwrap();
    let expires_at: chrono::DateTime<chrono::Utc> =
        json["expires_at"].as_str().unwrap().parse().unwrap();

    assert_eq!(expires_at - created_at, chrono::Duration::days(7));
}

#[tokio::test]
async fn test_shorten_blank_expiry_means_never() {
    let pool = common::memory_pool().await;
    let server = server(common::create_test_state(pool));

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.org", "expiry_days": "" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert!(response.json::<Value>()["expires_at"].is_null());
}
