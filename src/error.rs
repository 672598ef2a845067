//! Application error types for country-atlas
//!
//! This module defines common error types used throughout the application.
//! All error types use `thiserror` for ergonomic error handling.
//!
//! The `Display` strings of the handler-visible variants are part of the API
//! contract: they are returned verbatim in the `{success:false, message}`
//! envelope.

use thiserror::Error;

/// Authentication and identity errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AuthError {
    /// A required registration field was missing or empty
    #[error("Please provide username, email and password")]
    MissingFields,

    /// Registration attempted with an email that already exists
    #[error("User Mail already exists")]
    DuplicateEmail,

    /// Login failed: unknown email or wrong password (never distinguished)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Token failed signature or structural validation
    #[error("Invalid token")]
    InvalidToken,

    /// Token expired
    #[error("Token expired")]
    Expired,

    /// Request carried no usable bearer token, or the token's identity no
    /// longer resolves
    #[error("Not authorized to access this route")]
    NotAuthorized,

    /// Secret hashing failed
    #[error("Hash failed: {0}")]
    Hash(String),

    /// Token signing failed
    #[error("Token signing failed: {0}")]
    Signing(String),

    /// Underlying store failure
    #[error("Database failure: {0}")]
    Database(String),
}

/// Favorites collection errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FavoriteError {
    /// No country code supplied
    #[error("Please provide a country code")]
    MissingCountryCode,

    /// Country code already present in the caller's favorites
    #[error("Country already in favorites")]
    AlreadyFavorite,

    /// Country code not present in the caller's favorites
    #[error("Country not in favorites")]
    NotFavorite,

    /// Underlying store failure
    #[error("Database failure: {0}")]
    Database(String),
}

/// Database-related errors
#[derive(Debug, Error)]
pub enum DbError {
    /// SQLite error
    #[error("Database error: {0}")]
    Sqlite(String),

    /// Record not found
    #[error("Record not found")]
    NotFound,

    /// Constraint violation (unique email, duplicate favorite)
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Connection-level failure
    #[error("Connection error: {0}")]
    Connection(String),
}

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(code, ref msg) = err {
            if code.code == rusqlite::ErrorCode::ConstraintViolation {
                return DbError::ConstraintViolation(
                    msg.clone()
                        .unwrap_or_else(|| "constraint violation".to_string()),
                );
            }
        }
        DbError::Sqlite(err.to_string())
    }
}

impl From<tokio_rusqlite::Error> for DbError {
    fn from(err: tokio_rusqlite::Error) -> Self {
        match err {
            tokio_rusqlite::Error::Rusqlite(e) => e.into(),
            other => DbError::Connection(other.to_string()),
        }
    }
}

impl From<DbError> for AuthError {
    fn from(err: DbError) -> Self {
        AuthError::Database(err.to_string())
    }
}

impl From<DbError> for FavoriteError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConstraintViolation(_) => FavoriteError::AlreadyFavorite,
            DbError::NotFound => FavoriteError::NotFavorite,
            other => FavoriteError::Database(other.to_string()),
        }
    }
}
