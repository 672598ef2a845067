//! Identity service
//!
//! This module provides the main identity interface for the application:
//! registration, login, and resolving a bearer token to a stored identity.

use std::sync::Arc;

use crate::auth::jwt::TokenService;
use crate::auth::password::{hash_password, verify_password};
use crate::database::Database;
use crate::error::{AuthError, DbError};
use crate::models::{LoginRequest, PublicUser, RegisterRequest, User};

/// Identity service
///
/// Coordinates the credential store, the password hasher, and the token
/// service.
pub struct AuthManager<D: Database> {
    db: Arc<D>,
    tokens: TokenService,
}

impl<D: Database> AuthManager<D> {
    /// Create a new identity service
    pub fn new(db: Arc<D>, tokens: TokenService) -> Self {
        Self { db, tokens }
    }

    /// Register a new identity
    ///
    /// Hashes the secret, creates the record with an empty favorites
    /// collection, and issues a token for the fresh id. Email uniqueness is
    /// checked by the store's unique index, so two concurrent registrations
    /// with the same email cannot both succeed.
    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<(String, PublicUser), AuthError> {
        let username = request.username.trim();
        let email = request.email.trim();
        if username.is_empty() || email.is_empty() || request.password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::new(username, email, password_hash);

        self.db.create_user(&user).await.map_err(|e| match e {
            DbError::ConstraintViolation(_) => AuthError::DuplicateEmail,
            other => AuthError::Database(other.to_string()),
        })?;

        let token = self.tokens.issue(&user.id)?;
        Ok((token, PublicUser::from(user)))
    }

    /// Log an existing identity in
    ///
    /// Unknown email and wrong password produce the same error, so a caller
    /// cannot probe which addresses are registered.
    pub async fn login(&self, request: LoginRequest) -> Result<(String, PublicUser), AuthError> {
        let user = self
            .db
            .find_user_by_email(&request.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&request.password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.id)?;
        Ok((token, PublicUser::from(user)))
    }

    /// Resolve a bearer token to its stored identity
    ///
    /// Used by the auth middleware. Fails when the token does not verify or
    /// when the referenced identity no longer exists.
    pub async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let user_id = self.tokens.verify(token)?;

        self.db
            .find_user_by_id(&user_id)
            .await?
            .ok_or(AuthError::NotAuthorized)
    }
}
