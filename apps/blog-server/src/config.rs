//! Application configuration loaded from environment variables.

use std::env;

use quill_infra::database::DatabaseConfig;

pub const DEFAULT_LOGIN_URL: &str = "/accounts/login";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Where anonymous visitors of gated pages are sent.
    pub login_url: String,
    /// Mark the session cookie `Secure` (HTTPS only).
    pub secure_cookies: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database: None,
            login_url: DEFAULT_LOGIN_URL.to_string(),
            secure_cookies: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parsed_var("DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parsed_var("DB_MIN_CONNECTIONS").unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parsed_var("PORT").unwrap_or(defaults.port),
            database,
            login_url: env::var("LOGIN_URL").unwrap_or(defaults.login_url),
            secure_cookies: env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(defaults.secure_cookies),
        }
    }
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.parse().ok())
}
