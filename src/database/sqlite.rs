//! SQLite implementation of the Database trait
//!
//! This module provides a SQLite-based implementation of the Database trait
//! using rusqlite and tokio-rusqlite for async operations. All calls against
//! one connection run on a single background thread, so each trait method
//! executes atomically with respect to the others.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension;
use tokio_rusqlite::Connection;

use super::migrations::CREATE_SCHEMA;
use super::Database;
use crate::error::DbError;
use crate::models::User;

/// SQLite database implementation
pub struct SqliteDatabase {
    conn: Connection,
}

impl SqliteDatabase {
    /// Create a new SQLite database connection
    ///
    /// Use `:memory:` for an in-memory database or a file path for
    /// persistent storage.
    pub async fn new(path: &str) -> Result<Self, DbError> {
        let conn = Connection::open(path).await?;

        // Run migrations
        conn.call(|conn| {
            conn.execute_batch(CREATE_SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    /// Create a new in-memory database (useful for testing)
    pub async fn in_memory() -> Result<Self, DbError> {
        Self::new(":memory:").await
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn create_user(&self, user: &User) -> Result<(), DbError> {
        let id = user.id.clone();
        let username = user.username.clone();
        let email = user.email.clone();
        let password_hash = user.password_hash.clone();
        let created_at = user.created_at.to_rfc3339();

        self.conn
            .call(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO users (id, username, email, password_hash, created_at)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    "#,
                    rusqlite::params![id, username, email, password_hash, created_at],
                )?;
                Ok(())
            })
            .await
            .map_err(Into::into)
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, DbError> {
        let id = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT id, username, email, password_hash, created_at
                    FROM users
                    WHERE id = ?1
                    "#,
                )?;

                let user = stmt.query_row([&id], row_to_user).optional()?;
                Ok(user)
            })
            .await
            .map_err(Into::into)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let email = email.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT id, username, email, password_hash, created_at
                    FROM users
                    WHERE email = ?1
                    "#,
                )?;

                let user = stmt.query_row([&email], row_to_user).optional()?;
                Ok(user)
            })
            .await
            .map_err(Into::into)
    }

    async fn list_favorites(&self, user_id: &str) -> Result<Vec<String>, DbError> {
        let user_id = user_id.to_string();

        self.conn
            .call(move |conn| Ok(select_favorites(conn, &user_id)?))
            .await
            .map_err(Into::into)
    }

    async fn add_favorite(&self, user_id: &str, code: &str) -> Result<Vec<String>, DbError> {
        let user_id = user_id.to_string();
        let code = code.to_string();

        let (inserted, codes) = self
            .conn
            .call(move |conn| {
                let inserted = conn.execute(
                    "INSERT OR IGNORE INTO favorites (user_id, country_code) VALUES (?1, ?2)",
                    rusqlite::params![user_id, code],
                )?;
                let codes = select_favorites(conn, &user_id)?;
                Ok((inserted, codes))
            })
            .await?;

        if inserted == 0 {
            return Err(DbError::ConstraintViolation(
                "favorites.country_code".to_string(),
            ));
        }
        Ok(codes)
    }

    async fn remove_favorite(&self, user_id: &str, code: &str) -> Result<Vec<String>, DbError> {
        let user_id = user_id.to_string();
        let code = code.to_string();

        let (removed, codes) = self
            .conn
            .call(move |conn| {
                let removed = conn.execute(
                    "DELETE FROM favorites WHERE user_id = ?1 AND country_code = ?2",
                    rusqlite::params![user_id, code],
                )?;
                let codes = select_favorites(conn, &user_id)?;
                Ok((removed, codes))
            })
            .await?;

        if removed == 0 {
            return Err(DbError::NotFound);
        }
        Ok(codes)
    }
}

/// Map a users row to a [`User`]
fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    let created_at: String = row.get(4)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        created_at,
    })
}

/// Read an identity's favorites in insertion order
fn select_favorites(conn: &rusqlite::Connection, user_id: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT country_code FROM favorites WHERE user_id = ?1 ORDER BY rowid")?;
    let codes = stmt
        .query_map([user_id], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(codes)
}
