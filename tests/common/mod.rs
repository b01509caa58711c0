#![allow(dead_code)]

use axum::extract::ConnectInfo;
use chrono::{Duration, Utc};
use shortlink::application::services::GenerationPolicy;
use shortlink::infrastructure::persistence::{connect_in_memory, migrate};
use shortlink::state::AppState;
use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;

pub const TEST_BASE_URL: &str = "http://sho.rt";

/// Fresh in-memory database with the schema applied.
pub async fn memory_pool() -> SqlitePool {
    let pool = connect_in_memory().await.unwrap();
    migrate(&pool).await.unwrap();
    pool
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    AppState::new(
        Arc::new(pool),
        GenerationPolicy::default(),
        Some(TEST_BASE_URL.to_string()),
    )
}

pub fn create_test_state_without_base_url(pool: SqlitePool) -> AppState {
    AppState::new(Arc::new(pool), GenerationPolicy::default(), None)
}

pub async fn create_test_short_url(pool: &SqlitePool, code: &str, url: &str) {
    sqlx::query("INSERT INTO short_urls (code, original_url, created_at) VALUES (?1, ?2, ?3)")
        .bind(code)
        .bind(url)
        .bind(Utc::now())
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_expired_short_url(pool: &SqlitePool, code: &str, url: &str) {
    let created_at = Utc::now() - Duration::days(2);

    sqlx::query(
        "INSERT INTO short_urls (code, original_url, created_at, expires_at) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(code)
    .bind(url)
    .bind(created_at)
    .bind(created_at + Duration::days(1))
    .execute(pool)
    .await
    .unwrap();
}

pub async fn count_short_urls(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM short_urls")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn get_clicks(pool: &SqlitePool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT clicks FROM short_urls WHERE code = ?1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Inserts a fixed peer address so per-IP rate limiting works without a socket.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
