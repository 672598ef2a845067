//! User-related domain models
//!
//! A [`User`] is one registered identity: credentials plus a favorites
//! collection. The struct deliberately does not implement `Serialize`; the
//! only user shape that ever crosses the HTTP boundary is [`PublicUser`],
//! which carries no secret material.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Length of the random part of a user id in bytes
const USER_ID_BYTES: usize = 16;

/// A registered identity stored in the credential store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Opaque unique identifier, assigned at creation, immutable
    pub id: String,

    /// Display label; not unique
    pub username: String,

    /// Globally unique, case-sensitive as stored
    pub email: String,

    /// Argon2id hash of the user's password (PHC string format)
    pub password_hash: String,

    /// When the identity was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new identity with a freshly generated id
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: generate_user_id(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }
}

/// Generate an opaque user id: 16 random bytes, URL-safe base64
pub fn generate_user_id() -> String {
    use rand::RngCore;

    let mut id_bytes = [0u8; USER_ID_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut id_bytes);
    URL_SAFE_NO_PAD.encode(id_bytes)
}

/// The client-visible projection of a [`User`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// Registration request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body for adding a country to the caller's favorites
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFavoriteRequest {
    #[serde(rename = "countryCode", default)]
    pub country_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test 1: User::new generates distinct ids
    #[test]
    fn test_user_ids_are_unique() {
        let a = User::new("alice", "alice@example.com", "hash");
        let b = User::new("bob", "bob@example.com", "hash");
        assert_ne!(a.id, b.id);
    }

    // Test 2: user ids decode to the expected byte length
    #[test]
    fn test_user_id_format() {
        let id = generate_user_id();
        let decoded = URL_SAFE_NO_PAD.decode(&id).unwrap();
        assert_eq!(decoded.len(), USER_ID_BYTES);
    }

    // Test 3: PublicUser projection drops the password hash
    #[test]
    fn test_public_user_projection() {
        let user = User::new("alice", "alice@example.com", "$argon2id$secret");
        let public = PublicUser::from(&user);

        assert_eq!(public.id, user.id);
        assert_eq!(public.username, "alice");
        assert_eq!(public.email, "alice@example.com");

        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password"));
    }

    // Test 4: AddFavoriteRequest uses the countryCode wire name
    #[test]
    fn test_add_favorite_request_field_name() {
        let req: AddFavoriteRequest = serde_json::from_str(r#"{"countryCode":"USA"}"#).unwrap();
        assert_eq!(req.country_code, "USA");
    }

    // Test 5: missing request fields deserialize to empty strings
    #[test]
    fn test_register_request_missing_fields_default_empty() {
        let req: RegisterRequest = serde_json::from_str(r#"{"username":"alice"}"#).unwrap();
        assert_eq!(req.username, "alice");
        assert!(req.email.is_empty());
        assert!(req.password.is_empty());
    }
}
