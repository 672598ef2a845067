//! Authentication system for country-atlas
//!
//! This module provides identity and authentication functionality:
//! - Password hashing and verification (Argon2id)
//! - Stateless signed bearer tokens with a fixed lifetime
//! - Registration, login, and bearer-token resolution

pub mod jwt;
pub mod manager;
pub mod password;

pub use jwt::{Claims, TokenService};
pub use manager::AuthManager;
pub use password::{hash_password, verify_password};
