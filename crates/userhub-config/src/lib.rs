//! # userhub Config
//!
//! Configuration types for the userhub API, loaded from environment variables.
//!
//! - [`jwt`]: Token signing configuration
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`rate_limit`]: Rate limiting for the public auth endpoints
//! - [`registration`]: Registration secret and role default permissions
//! - [`server`]: Listen addresses
//!
//! Every type has a `from_env()` constructor and a `from_lookup()` constructor
//! that takes a key lookup function, so parsing can be tested without touching
//! the process environment.
//!
//! # Example
//!
//! ```ignore
//! use userhub_config::{JwtConfig, RegistrationConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let registration = RegistrationConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod rate_limit;
pub mod registration;
pub mod server;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;
pub use registration::{RegistrationConfig, RoleDefaults};
pub use server::ServerConfig;

/// Reads `key` through `lookup` and parses it, falling back to `default`.
pub(crate) fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Splits a comma-separated list, trimming entries and dropping empty ones.
pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
pub(crate) fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
    move |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    }
}
