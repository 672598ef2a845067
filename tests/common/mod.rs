//! Common test utilities and helpers for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::HeaderValue;
use axum_test::TestServer;
use country_atlas::auth::{AuthManager, TokenService};
use country_atlas::database::SqliteDatabase;
use country_atlas::favorites::FavoritesService;
use country_atlas::ratelimit::{RateLimitConfig, RateLimiter};
use country_atlas::server::{build_router, AppState};

/// Signing secret shared by all integration tests
pub const TEST_JWT_SECRET: &str = "integration_test_secret_32_bytes!!";

/// Create an in-memory database for testing
pub async fn create_test_database() -> Arc<SqliteDatabase> {
    Arc::new(
        SqliteDatabase::in_memory()
            .await
            .expect("Failed to create test database"),
    )
}

/// Create a token service using the shared test secret
pub fn create_test_token_service() -> TokenService {
    TokenService::new(TEST_JWT_SECRET, 3600)
}

/// Create a test application state with a generous rate limit
pub async fn create_test_state() -> AppState<SqliteDatabase> {
    create_test_state_with_rate_limit(10_000).await
}

/// Create a test application state with a specific per-window request budget
pub async fn create_test_state_with_rate_limit(max_requests: u32) -> AppState<SqliteDatabase> {
    let database = create_test_database().await;

    AppState {
        auth_manager: Arc::new(AuthManager::new(
            Arc::clone(&database),
            create_test_token_service(),
        )),
        favorites: Arc::new(FavoritesService::new(database)),
        rate_limiter: Arc::new(RateLimiter::new(RateLimitConfig {
            max_requests,
            window: std::time::Duration::from_secs(60),
        })),
    }
}

/// Create an in-process test server over a fresh state
pub async fn create_test_server() -> TestServer {
    let state = create_test_state().await;
    TestServer::new(build_router(state)).expect("Failed to start test server")
}

/// Build an Authorization header value for a bearer token
pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).expect("token is a valid header value")
}

/// Register a user and return the issued bearer token
pub async fn register_user(server: &TestServer, username: &str, email: &str) -> String {
    let response = server
        .post("/api/auth/register")
        .json(&serde_json::json!({
            "username": username,
            "email": email,
            "password": "password123"
        }))
        .await;

    let body: serde_json::Value = response.json();
    body["token"]
        .as_str()
        .expect("registration should return a token")
        .to_string()
}

/// Run a test server on a real TCP socket and return the address
///
/// The server shuts down when the returned sender is dropped or sent.
pub async fn run_test_server(
    state: AppState<SqliteDatabase>,
) -> (std::net::SocketAddr, tokio::sync::oneshot::Sender<()>) {
    use tokio::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to get local address");

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let app = build_router(state);

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        })
        .await
        .expect("Server error");
    });

    (addr, shutdown_tx)
}
