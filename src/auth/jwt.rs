//! Bearer token issuance and verification
//!
//! Tokens are stateless JWTs signed with a process-wide symmetric secret
//! (HS256). The payload references exactly one identity id and an absolute
//! expiration instant; nothing is persisted server-side, so there is no
//! revocation — logout is a client-side token discard.

use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Claims embedded in every issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the identity id
    pub sub: String,

    /// Issued at (unix timestamp)
    pub iat: i64,

    /// Expiry (unix timestamp)
    pub exp: i64,
}

/// Token service holding the signing secret and lifetime
///
/// Constructed once at startup from configuration and shared by reference.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: u64,
}

impl TokenService {
    /// Create a new token service from a symmetric secret and a lifetime
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Issue a signed token for an identity id
    pub fn issue(&self, user_id: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.ttl_secs as i64,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify a token and return the identity id it references
    ///
    /// Fails closed: any signature mismatch or malformed token is
    /// [`AuthError::InvalidToken`], an expiration in the past is
    /// [`AuthError::Expired`].
    pub fn verify(&self, token: &str) -> Result<String, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default()).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken,
            },
        )?;

        Ok(data.claims.sub)
    }
}
