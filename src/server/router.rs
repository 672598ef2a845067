//! HTTP router for country-atlas
//!
//! This module defines the axum router that handles all HTTP requests:
//! - Health check
//! - Registration and login (public)
//! - Profile and favorites (bearer-token protected)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::middleware::{
    auth_middleware, logging_middleware, rate_limit_middleware, AuthenticatedUser,
};
use super::response::{ApiError, AuthResponse, DataResponse};
use crate::auth::AuthManager;
use crate::database::Database;
use crate::favorites::FavoritesService;
use crate::models::{AddFavoriteRequest, LoginRequest, PublicUser, RegisterRequest};
use crate::ratelimit::RateLimiter;

/// Shared application state
pub struct AppState<D: Database> {
    /// Identity service
    pub auth_manager: Arc<AuthManager<D>>,

    /// Favorites service
    pub favorites: Arc<FavoritesService<D>>,

    /// Process-wide request rate limiter
    pub rate_limiter: Arc<RateLimiter>,
}

impl<D: Database> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            auth_manager: Arc::clone(&self.auth_manager),
            favorites: Arc::clone(&self.favorites),
            rate_limiter: Arc::clone(&self.rate_limiter),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Build the main application router
///
/// The interceptor chain is ordered: rate limiting ahead of every route,
/// authentication only on the protected subset, logging around everything.
pub fn build_router<D: Database + 'static>(state: AppState<D>) -> Router {
    let protected = Router::new()
        .route("/api/auth/me", get(me_handler::<D>))
        .route(
            "/api/favorites",
            get(list_favorites_handler::<D>).post(add_favorite_handler::<D>),
        )
        .route(
            "/api/favorites/:country_code",
            delete(remove_favorite_handler::<D>),
        )
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state.auth_manager),
            auth_middleware::<D>,
        ));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/auth/register", post(register_handler::<D>))
        .route("/api/auth/login", post(login_handler::<D>))
        .merge(protected)
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state.rate_limiter),
            rate_limit_middleware,
        ))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

// =============================================================================
// Health Handler
// =============================================================================

/// Health check endpoint handler
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Identity Handlers
// =============================================================================

/// Register a new user
async fn register_handler<D: Database + 'static>(
    State(state): State<AppState<D>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (token, user) = state.auth_manager.register(request).await?;
    Ok((StatusCode::CREATED, Json(AuthResponse::new(token, user))))
}

/// Log an existing user in
async fn login_handler<D: Database + 'static>(
    State(state): State<AppState<D>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (token, user) = state.auth_manager.login(request).await?;
    Ok(Json(AuthResponse::new(token, user)))
}

/// Return the authenticated user's profile
async fn me_handler<D: Database + 'static>(
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> impl IntoResponse {
    Json(DataResponse::new(PublicUser::from(user)))
}

// =============================================================================
// Favorites Handlers
// =============================================================================

/// List the authenticated user's favorites
async fn list_favorites_handler<D: Database + 'static>(
    State(state): State<AppState<D>>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, ApiError> {
    let codes = state.favorites.list(&user.id).await?;
    Ok(Json(DataResponse::new(codes)))
}

/// Add a country to the authenticated user's favorites
async fn add_favorite_handler<D: Database + 'static>(
    State(state): State<AppState<D>>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    Json(request): Json<AddFavoriteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let codes = state
        .favorites
        .add(&user.id, &request.country_code)
        .await?;
    Ok(Json(DataResponse::new(codes)))
}

/// Remove a country from the authenticated user's favorites
async fn remove_favorite_handler<D: Database + 'static>(
    State(state): State<AppState<D>>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    Path(country_code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let codes = state.favorites.remove(&user.id, &country_code).await?;
    Ok(Json(DataResponse::new(codes)))
}
