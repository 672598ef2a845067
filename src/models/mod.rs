//! Domain models for country-atlas

pub mod user;

pub use user::{AddFavoriteRequest, LoginRequest, PublicUser, RegisterRequest, User};
