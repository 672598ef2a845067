//! HTTP middleware for country-atlas
//!
//! The request pipeline is an ordered chain of interceptors: rate limiting
//! runs ahead of every route, bearer-token authentication guards the
//! protected routes, and request logging wraps the whole thing. Each
//! interceptor either continues the chain or short-circuits with an envelope
//! response.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Instant;

use super::response::ApiError;
use crate::auth::AuthManager;
use crate::database::Database;
use crate::models::User;
use crate::ratelimit::RateLimiter;

/// Authenticated identity attached to requests that passed the auth guard
#[derive(Clone, Debug)]
pub struct AuthenticatedUser(pub User);

/// Authentication middleware
///
/// Extracts the bearer token from the Authorization header, verifies it, and
/// resolves the identity it references. Downstream handlers may assume the
/// [`AuthenticatedUser`] extension is present and valid. Every failure mode
/// produces the same 401 response.
pub async fn auth_middleware<D: Database + 'static>(
    State(auth_manager): State<Arc<AuthManager<D>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(ApiError::unauthorized)?;

    let user = auth_manager.authenticate(token).await.map_err(|e| {
        tracing::debug!(error = %e, "Bearer token rejected");
        ApiError::unauthorized()
    })?;

    request.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(request).await)
}

/// Rate limiting middleware
///
/// Applied ahead of all routes. Over-limit requests are rejected before any
/// authentication or store access happens.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|connect_info| connect_info.0.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if !limiter.check(ip) {
        return Err(ApiError::too_many_requests());
    }

    Ok(next.run(request).await)
}

/// Logging middleware
///
/// Logs request and response details including:
/// - Method and path
/// - Status code
/// - Response time
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let elapsed = start.elapsed();
    let status = response.status();

    tracing::info!(
        method = %method,
        path = %uri.path(),
        status = %status.as_u16(),
        duration_ms = %elapsed.as_millis(),
        "Request completed"
    );

    response
}
