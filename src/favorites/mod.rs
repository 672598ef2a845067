//! Favorites service
//!
//! Operations on the authenticated identity's favorite country codes. The
//! collection behaves as an order-preserving set: adds are conditional on
//! absence (a duplicate add is an error, not a no-op — deliberate contract),
//! removes are conditional on presence, and both conditions are enforced by
//! the store itself.

use std::sync::Arc;

use crate::database::Database;
use crate::error::{DbError, FavoriteError};

/// Favorites service
pub struct FavoritesService<D: Database> {
    db: Arc<D>,
}

impl<D: Database> FavoritesService<D> {
    /// Create a new favorites service
    pub fn new(db: Arc<D>) -> Self {
        Self { db }
    }

    /// Return the caller's favorites, possibly empty
    pub async fn list(&self, user_id: &str) -> Result<Vec<String>, FavoriteError> {
        Ok(self.db.list_favorites(user_id).await?)
    }

    /// Add a country code; returns the updated sequence
    pub async fn add(&self, user_id: &str, code: &str) -> Result<Vec<String>, FavoriteError> {
        if code.is_empty() {
            return Err(FavoriteError::MissingCountryCode);
        }

        self.db.add_favorite(user_id, code).await.map_err(|e| match e {
            DbError::ConstraintViolation(_) => FavoriteError::AlreadyFavorite,
            other => FavoriteError::Database(other.to_string()),
        })
    }

    /// Remove a country code; returns the updated sequence
    pub async fn remove(&self, user_id: &str, code: &str) -> Result<Vec<String>, FavoriteError> {
        self.db
            .remove_favorite(user_id, code)
            .await
            .map_err(|e| match e {
                DbError::NotFound => FavoriteError::NotFavorite,
                other => FavoriteError::Database(other.to_string()),
            })
    }
}
