//! Database migrations for country-atlas
//!
//! This module contains SQL migrations for the SQLite database schema.

/// SQL statement to create the initial database schema
///
/// Email uniqueness and the duplicate-free favorites invariant are both
/// enforced here, at the storage layer, so concurrent writers cannot race an
/// application-level membership check.
pub const CREATE_SCHEMA: &str = r#"
-- Registered identities
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- Favorite country codes, one row per (user, code)
CREATE TABLE IF NOT EXISTS favorites (
    user_id TEXT NOT NULL,
    country_code TEXT NOT NULL,
    UNIQUE(user_id, country_code),
    FOREIGN KEY(user_id) REFERENCES users(id)
);

CREATE INDEX IF NOT EXISTS idx_favorites_user ON favorites(user_id);
"#;
