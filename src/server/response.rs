//! Uniform JSON envelopes for the REST surface
//!
//! Every response body carries a `success` flag. Successes are typed per
//! endpoint family; every failure funnels through [`ApiError`], which is the
//! single place service errors are translated into status codes and
//! client-visible messages.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, FavoriteError};
use crate::models::PublicUser;

/// Body returned by register and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: PublicUser,
}

impl AuthResponse {
    pub fn new(token: String, user: PublicUser) -> Self {
        Self {
            success: true,
            token,
            user,
        }
    }
}

/// Body returned by data-carrying endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Body returned for every handler-level failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

/// A failure ready to be rendered at the HTTP boundary
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// The uniform rejection for protected routes; deliberately does not
    /// reveal whether the token was missing, malformed, or expired
    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "Not authorized to access this route",
        )
    }

    pub fn too_many_requests() -> Self {
        Self::new(
            StatusCode::TOO_MANY_REQUESTS,
            "Too many requests, please try again later.",
        )
    }

    /// Generic 500; the detail has already been logged server-side
    fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingFields | AuthError::DuplicateEmail => {
                Self::new(StatusCode::BAD_REQUEST, err.to_string())
            }
            AuthError::InvalidCredentials => {
                Self::new(StatusCode::UNAUTHORIZED, err.to_string())
            }
            AuthError::InvalidToken | AuthError::Expired | AuthError::NotAuthorized => {
                Self::unauthorized()
            }
            AuthError::Hash(_) | AuthError::Signing(_) | AuthError::Database(_) => {
                tracing::error!(error = %err, "Identity operation failed");
                Self::internal()
            }
        }
    }
}

impl From<FavoriteError> for ApiError {
    fn from(err: FavoriteError) -> Self {
        match err {
            FavoriteError::MissingCountryCode
            | FavoriteError::AlreadyFavorite
            | FavoriteError::NotFavorite => Self::new(StatusCode::BAD_REQUEST, err.to_string()),
            FavoriteError::Database(_) => {
                tracing::error!(error = %err, "Favorites operation failed");
                Self::internal()
            }
        }
    }
}
