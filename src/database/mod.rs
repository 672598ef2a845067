//! Credential store for country-atlas
//!
//! This module defines the storage trait and its SQLite implementation. The
//! trait covers identity records plus the favorites collection owned by each
//! identity; favorites mutations are conditional at the storage layer
//! (add-if-absent, remove-if-present) so set semantics hold under concurrent
//! requests without application-level locking.

pub mod migrations;
pub mod sqlite;

pub use sqlite::SqliteDatabase;

use async_trait::async_trait;

use crate::error::DbError;
use crate::models::User;

/// Database trait for data persistence
///
/// It uses `async_trait` for async methods and `mockall::automock` for
/// testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Database: Send + Sync {
    // =========================================================================
    // Identity operations
    // =========================================================================

    /// Create a new identity record
    ///
    /// Fails with [`DbError::ConstraintViolation`] when the email is already
    /// registered; the unique index performs the check atomically.
    async fn create_user(&self, user: &User) -> Result<(), DbError>;

    /// Look up an identity by its id
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, DbError>;

    /// Look up an identity by email (exact, case-sensitive match)
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DbError>;

    // =========================================================================
    // Favorites operations
    // =========================================================================

    /// Return the identity's favorites in insertion order
    async fn list_favorites(&self, user_id: &str) -> Result<Vec<String>, DbError>;

    /// Append a country code if absent; returns the updated sequence
    ///
    /// Fails with [`DbError::ConstraintViolation`] when the code is already
    /// present.
    async fn add_favorite(&self, user_id: &str, code: &str) -> Result<Vec<String>, DbError>;

    /// Remove a country code if present; returns the updated sequence
    ///
    /// Fails with [`DbError::NotFound`] when the code is absent.
    async fn remove_favorite(&self, user_id: &str, code: &str) -> Result<Vec<String>, DbError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test 1: MockDatabase identity operations
    #[tokio::test]
    async fn test_mock_database_user_operations() {
        let mut mock = MockDatabase::new();

        mock.expect_create_user().returning(|_| Ok(()));

        mock.expect_find_user_by_email()
            .withf(|email| email == "alice@example.com")
            .returning(|_| {
                Ok(Some(User::new(
                    "alice",
                    "alice@example.com",
                    "$argon2id$hash",
                )))
            });

        mock.expect_find_user_by_id()
            .withf(|id| id == "missing")
            .returning(|_| Ok(None));

        let user = User::new("alice", "alice@example.com", "$argon2id$hash");
        assert!(mock.create_user(&user).await.is_ok());

        let found = mock.find_user_by_email("alice@example.com").await.unwrap();
        assert_eq!(found.unwrap().username, "alice");

        let missing = mock.find_user_by_id("missing").await.unwrap();
        assert!(missing.is_none());
    }

    // Test 2: MockDatabase reports duplicate emails as constraint violations
    #[tokio::test]
    async fn test_mock_database_duplicate_email() {
        let mut mock = MockDatabase::new();

        mock.expect_create_user()
            .returning(|_| Err(DbError::ConstraintViolation("users.email".to_string())));

        let user = User::new("bob", "taken@example.com", "hash");
        let result = mock.create_user(&user).await;
        assert!(matches!(result, Err(DbError::ConstraintViolation(_))));
    }

    // Test 3: MockDatabase favorites operations
    #[tokio::test]
    async fn test_mock_database_favorites_operations() {
        let mut mock = MockDatabase::new();

        mock.expect_list_favorites()
            .returning(|_| Ok(vec!["USA".to_string()]));

        mock.expect_add_favorite()
            .withf(|id, code| id == "u1" && code == "CAN")
            .returning(|_, _| Ok(vec!["USA".to_string(), "CAN".to_string()]));

        mock.expect_remove_favorite()
            .withf(|id, code| id == "u1" && code == "USA")
            .returning(|_, _| Ok(vec!["CAN".to_string()]));

        let codes = mock.list_favorites("u1").await.unwrap();
        assert_eq!(codes, vec!["USA"]);

        let codes = mock.add_favorite("u1", "CAN").await.unwrap();
        assert_eq!(codes, vec!["USA", "CAN"]);

        let codes = mock.remove_favorite("u1", "USA").await.unwrap();
        assert_eq!(codes, vec!["CAN"]);
    }

    // Test 4: MockDatabase error handling
    #[tokio::test]
    async fn test_mock_database_error_handling() {
        let mut mock = MockDatabase::new();

        mock.expect_remove_favorite()
            .returning(|_, _| Err(DbError::NotFound));

        let result = mock.remove_favorite("u1", "XXX").await;
        assert!(matches!(result, Err(DbError::NotFound)));
    }
}
