//! The configured admin identity and constant-time credential checks.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::password::verify_password;

/// Subject recorded in every admin session.
pub const ADMIN_PRINCIPAL_ID: &str = "admin";

type HmacSha256 = Hmac<Sha256>;

/// Fixed key for comparison tags. The tags never leave the process; HMAC is
/// only used so equality is decided by `verify_slice`, which runs in
/// constant time regardless of where the inputs differ.
const COMPARE_KEY: &[u8] = b"lessonsite/credential-compare/v1";

/// Compare two secrets without an early exit on the first differing byte.
pub fn constant_time_eq(expected: &str, presented: &str) -> bool {
    let Ok(mut mac) = HmacSha256::new_from_slice(COMPARE_KEY) else {
        return false;
    };
    mac.update(expected.as_bytes());
    let expected_tag = mac.finalize().into_bytes();

    let Ok(mut mac) = HmacSha256::new_from_slice(COMPARE_KEY) else {
        return false;
    };
    mac.update(presented.as_bytes());
    mac.verify_slice(&expected_tag).is_ok()
}

/// How an admin request proved its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    /// Signed `admin_session` cookie from a prior login.
    Session,
    /// Shared-secret `token` query parameter.
    Token,
}

/// The single administrative principal. Every admin credential, whatever
/// its form, resolves to this one identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminPrincipal {
    pub credential: CredentialKind,
}

impl AdminPrincipal {
    pub fn id(&self) -> &'static str {
        ADMIN_PRINCIPAL_ID
    }
}

/// Admin login and token secrets, built once from configuration.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    /// Shared secret accepted as `?token=` on admin endpoints.
    pub token: String,
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl AdminCredentials {
    /// Check a username/password pair.
    ///
    /// The password hash is always verified, even for a wrong username, so
    /// response timing does not reveal which half failed.
    pub fn verify_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, argon2::password_hash::Error> {
        let username_ok = constant_time_eq(&self.username, username);
        let password_ok = verify_password(password, &self.password_hash)?;
        Ok(username_ok && password_ok)
    }

    /// Check a presented admin token.
    pub fn token_matches(&self, presented: &str) -> bool {
        !self.token.is_empty() && constant_time_eq(&self.token, presented)
    }
}
