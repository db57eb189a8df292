//! Authentication primitives for the single admin identity.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`credentials`] -- the configured admin identity and constant-time checks.
//! - [`session`] -- signed session cookies (HS256 JWT).

pub mod credentials;
pub mod password;
pub mod session;
