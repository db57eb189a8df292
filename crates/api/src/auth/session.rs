//! Signed admin session cookies.
//!
//! A successful login stores an HS256-signed JWT in the `admin_session`
//! cookie. The token carries the fixed admin subject, an expiry and a
//! unique `jti`; nothing is stored server-side, so logout simply expires the
//! cookie.

use std::fmt;

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::credentials::ADMIN_PRINCIPAL_ID;

/// Name of the admin session cookie.
pub const SESSION_COOKIE: &str = "admin_session";

/// Default session lifetime in hours.
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 12;

/// Claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Always [`ADMIN_PRINCIPAL_ID`].
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier for audit logs.
    pub jti: String,
}

/// Session signing configuration.
#[derive(Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret (`SECRET_KEY`).
    pub secret: String,
    pub ttl_hours: i64,
    /// Add the `Secure` attribute to the cookie (production).
    pub secure_cookie: bool,
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"<redacted>")
            .field("ttl_hours", &self.ttl_hours)
            .field("secure_cookie", &self.secure_cookie)
            .finish()
    }
}

/// Sign a new admin session token.
pub fn issue_session_token(config: &SessionConfig) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = SessionClaims {
        sub: ADMIN_PRINCIPAL_ID.to_string(),
        exp: now + config.ttl_hours * 3600,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate a session token's signature, expiry and subject.
pub fn validate_session_token(
    token: &str,
    config: &SessionConfig,
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default(); // HS256, validates exp
    validation.sub = Some(ADMIN_PRINCIPAL_ID.to_string());
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}

/// `Set-Cookie` value that installs a session token.
pub fn session_cookie(token: &str, config: &SessionConfig) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}{}",
        config.ttl_hours * 3600,
        secure_attr(config)
    )
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(config: &SessionConfig) -> String {
    format!(
        "{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0{}",
        secure_attr(config)
    )
}

fn secure_attr(config: &SessionConfig) -> &'static str {
    if config.secure_cookie {
        "; Secure"
    } else {
        ""
    }
}
