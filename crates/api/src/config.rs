use std::path::PathBuf;

use argon2::password_hash::PasswordHash;

use crate::auth::credentials::AdminCredentials;
use crate::auth::password::hash_password;
use crate::auth::session::{SessionConfig, DEFAULT_SESSION_TTL_HOURS};

/// Deployment environment, selected by `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn from_env() -> Self {
        match std::env::var("APP_ENV").as_deref() {
            Ok("production") => Self::Production,
            _ => Self::Development,
        }
    }
}

/// Filesystem locations for content and persisted data.
#[derive(Debug, Clone)]
pub struct SitePaths {
    /// JSON content documents (default: `data`).
    pub data_dir: PathBuf,
    /// Markdown guides (default: `guides`).
    pub guides_dir: PathBuf,
    /// Static assets served under `/static` (default: `static`).
    pub static_dir: PathBuf,
    /// Writable instance directory for the database and CSV stores
    /// (default: `instance`).
    pub instance_dir: PathBuf,
    /// SQLite database file (default: `<instance_dir>/analytics.db`).
    pub database_path: PathBuf,
}

impl SitePaths {
    pub fn leads_csv(&self) -> PathBuf {
        self.instance_dir.join("leads.csv")
    }

    pub fn seminars_csv(&self) -> PathBuf {
        self.instance_dir.join("seminars.csv")
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production
/// (`APP_ENV=production`) the secrets have no defaults and must be set.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub environment: Environment,
    /// Bind address (default: `127.0.0.1`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Public base URL used for canonical links, robots and sitemap.
    pub site_url: String,
    pub paths: SitePaths,
    /// The single administrative identity.
    pub admin: AdminCredentials,
    /// Admin session cookie signing and lifetime.
    pub session: SessionConfig,
}

const DEV_SITE_URL: &str = "http://127.0.0.1:5000";
const DEV_ADMIN_PASSWORD: &str = "admin123";
const DEV_ADMIN_TOKEN: &str = "changeme-admin-token";
const DEV_SECRET_KEY: &str = "dev-secret-key-change-in-production";

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                              |
    /// |------------------------|--------------------------------------|
    /// | `APP_ENV`              | `development`                        |
    /// | `HOST`                 | `127.0.0.1`                          |
    /// | `PORT`                 | `5000`                               |
    /// | `CORS_ORIGINS`         | `http://127.0.0.1:5000`              |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                 |
    /// | `SITE_URL`             | `http://127.0.0.1:5000` (dev only)   |
    /// | `DATA_DIR`             | `data`                               |
    /// | `GUIDES_DIR`           | `guides`                             |
    /// | `STATIC_DIR`           | `static`                             |
    /// | `INSTANCE_DIR`         | `instance`                           |
    /// | `DATABASE_PATH`        | `<INSTANCE_DIR>/analytics.db`        |
    /// | `ADMIN_USERNAME`       | `admin`                              |
    /// | `ADMIN_PASSWORD_HASH`  | --                                   |
    /// | `ADMIN_PASSWORD`       | `admin123` (dev only)                |
    /// | `ADMIN_TOKEN`          | `changeme-admin-token` (dev only)    |
    /// | `SECRET_KEY`           | dev key (dev only)                   |
    /// | `SESSION_TTL_HOURS`    | `12`                                 |
    ///
    /// # Panics
    ///
    /// Panics on unparsable numbers, and in production when a secret is
    /// missing. Misconfiguration should stop the process at startup.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();

        let host = env_or("HOST", "127.0.0.1");

        let port: u16 = env_or("PORT", "5000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", DEV_SITE_URL)
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let site_url = secret(environment, "SITE_URL", DEV_SITE_URL);

        let instance_dir = PathBuf::from(env_or("INSTANCE_DIR", "instance"));
        let database_path = std::env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| instance_dir.join("analytics.db"));
        let paths = SitePaths {
            data_dir: env_or("DATA_DIR", "data").into(),
            guides_dir: env_or("GUIDES_DIR", "guides").into(),
            static_dir: env_or("STATIC_DIR", "static").into(),
            instance_dir,
            database_path,
        };

        let password_hash = match std::env::var("ADMIN_PASSWORD_HASH") {
            Ok(hash) if !hash.is_empty() => checked_password_hash(hash),
            _ => {
                let plain = secret(environment, "ADMIN_PASSWORD", DEV_ADMIN_PASSWORD);
                hash_password(&plain).expect("failed to hash ADMIN_PASSWORD")
            }
        };
        let admin = AdminCredentials {
            username: env_or("ADMIN_USERNAME", "admin"),
            password_hash,
            token: secret(environment, "ADMIN_TOKEN", DEV_ADMIN_TOKEN),
        };

        let session = SessionConfig {
            secret: secret(environment, "SECRET_KEY", DEV_SECRET_KEY),
            ttl_hours: env_or("SESSION_TTL_HOURS", &DEFAULT_SESSION_TTL_HOURS.to_string())
                .parse()
                .expect("SESSION_TTL_HOURS must be a valid i64"),
            secure_cookie: environment == Environment::Production,
        };

        Self {
            environment,
            host,
            port,
            cors_origins,
            request_timeout_secs,
            site_url,
            paths,
            admin,
            session,
        }
    }
}

/// Reject a stored hash that is not an Argon2 PHC string.
fn checked_password_hash(hash: String) -> String {
    if let Err(e) = PasswordHash::new(&hash) {
        panic!("ADMIN_PASSWORD_HASH must be an Argon2 PHC string: {e}");
    }
    hash
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read a secret. Development falls back to a well-known default; production
/// refuses to start without an explicit non-empty value.
fn secret(environment: Environment, key: &str, dev_default: &str) -> String {
    match (std::env::var(key), environment) {
        (Ok(value), _) if !value.is_empty() => value,
        (_, Environment::Development) => dev_default.to_string(),
        (_, Environment::Production) => panic!("{key} must be set when APP_ENV=production"),
    }
}
