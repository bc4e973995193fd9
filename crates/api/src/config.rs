use std::str::FromStr;

use pronostiek_core::ruleset::{
    Ruleset, Rulesets, DEFAULT_MAX_PER_AFFILIATION, DEFAULT_MAX_RIDERS, DEFAULT_NORMAL_BUDGET,
    DEFAULT_PRO_BUDGET,
};

use crate::auth::jwt::JwtConfig;

/// Default location of the rider feed (path on disk or `http(s)://` URL).
const DEFAULT_RIDER_FEED: &str = "renners.json";

/// Default minimum password length for registration.
const DEFAULT_PASSWORD_MIN_LENGTH: usize = 8;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Where the rider catalog is read from at startup.
    pub rider_feed: String,
    /// Selection rules per competition variant.
    pub rulesets: Rulesets,
    /// Minimum accepted password length on registration.
    pub password_min_length: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `RIDER_FEED`           | `renners.json`             |
    /// | `MAX_RIDERS`           | `15`                       |
    /// | `MAX_PER_AFFILIATION`  | `4`                        |
    /// | `NORMAL_BUDGET_LIMIT`  | `11000`                    |
    /// | `PRO_BUDGET_LIMIT`     | `5500`                     |
    /// | `PASSWORD_MIN_LENGTH`  | `8`                        |
    /// | `JWT_SECRET`           | required                   |
    /// | `JWT_ACCESS_EXPIRY_MINS` | `15`                     |
    /// | `JWT_REFRESH_EXPIRY_DAYS` | `7`                     |
    ///
    /// # Panics
    ///
    /// Panics when `JWT_SECRET` is missing or empty, and on values that do not
    /// parse.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_or("PORT", 3000);

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", 30);
        let rider_feed = std::env::var("RIDER_FEED").unwrap_or_else(|_| DEFAULT_RIDER_FEED.into());

        let max_riders: usize = env_or("MAX_RIDERS", DEFAULT_MAX_RIDERS);
        let max_per_affiliation: usize = env_or("MAX_PER_AFFILIATION", DEFAULT_MAX_PER_AFFILIATION);
        let rulesets = Rulesets::new(
            Ruleset::new(
                max_riders,
                max_per_affiliation,
                env_or("NORMAL_BUDGET_LIMIT", DEFAULT_NORMAL_BUDGET),
            ),
            Ruleset::new(
                max_riders,
                max_per_affiliation,
                env_or("PRO_BUDGET_LIMIT", DEFAULT_PRO_BUDGET),
            ),
        );

        let password_min_length: usize = env_or("PASSWORD_MIN_LENGTH", DEFAULT_PASSWORD_MIN_LENGTH);

        let jwt = JwtConfig {
            secret: required_env("JWT_SECRET"),
            access_token_expiry_mins: env_or("JWT_ACCESS_EXPIRY_MINS", 15),
            refresh_token_expiry_days: env_or("JWT_REFRESH_EXPIRY_DAYS", 7),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            rider_feed,
            rulesets,
            password_min_length,
        }
    }
}

fn required_env(key: &str) -> String {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => panic!("{key} must be set to a non-empty value"),
    }
}

/// Read `key` from the environment, falling back to `default` when unset.
///
/// # Panics
///
/// Panics if the variable is set but does not parse as `T`.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} must be a valid {}: {e}", std::any::type_name::<T>())),
        Err(_) => default,
    }
}
