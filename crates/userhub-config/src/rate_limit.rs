//! Rate limiting configuration for the public endpoints.
//!
//! Login and registration are the only routes reachable without a bearer
//! token, so they are the only routes behind the limiter. Limits are keyed by
//! peer IP address, which requires the server to be started with
//! `into_make_service_with_connect_info::<SocketAddr>()`.
//!
//! # Configuration
//!
//! - `RATE_LIMIT_ENABLED`: `false` or `0` disables the limiter (default: enabled)
//! - `RATE_LIMIT_AUTH_PER_SECOND`: Seconds per replenished request (default: 10)
//! - `RATE_LIMIT_AUTH_BURST_SIZE`: Burst size (default: 5)
//!
//! # Example
//!
//! ```ignore
//! let config = RateLimitConfig::from_env();
//! if let Some(governor) = config.auth_governor_config() {
//!     router = router.layer(GovernorLayer::new(governor));
//! }
//! ```

use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::PeerIpKeyExtractor;

use crate::{env_lookup, parse_or};

/// Rate limit configuration for the public auth endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,

    /// Token replenishment period in seconds.
    pub auth_per_second: u64,

    /// Maximum tokens that can accumulate, allowing short bursts.
    pub auth_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auth_per_second: 10,
            auth_burst_size: 5,
        }
    }
}

impl RateLimitConfig {
    /// A configuration with the limiter switched off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let enabled = lookup("RATE_LIMIT_ENABLED")
            .map(|v| {
                let v = v.trim().to_lowercase();
                v != "false" && v != "0"
            })
            .unwrap_or(defaults.enabled);

        Self {
            enabled,
            auth_per_second: parse_or(&lookup, "RATE_LIMIT_AUTH_PER_SECOND", defaults.auth_per_second),
            auth_burst_size: parse_or(&lookup, "RATE_LIMIT_AUTH_BURST_SIZE", defaults.auth_burst_size),
        }
    }

    /// Creates a `GovernorConfig` for the auth endpoints.
    ///
    /// Returns `None` when the limiter is disabled or when either limit is zero.
    #[must_use]
    pub fn auth_governor_config(
        &self,
    ) -> Option<GovernorConfig<PeerIpKeyExtractor, ::governor::middleware::NoOpMiddleware>> {
        if !self.enabled {
            return None;
        }

        GovernorConfigBuilder::default()
            .per_second(self.auth_per_second)
            .burst_size(self.auth_burst_size)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup_from;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.auth_per_second, 10);
        assert_eq!(config.auth_burst_size, 5);
    }

    #[test]
    fn test_disabled_has_no_governor() {
        assert!(RateLimitConfig::disabled().auth_governor_config().is_none());
    }

    #[test]
    fn test_enabled_builds_governor() {
        assert!(RateLimitConfig::default().auth_governor_config().is_some());
    }

    #[test]
    fn test_zero_burst_has_no_governor() {
        let config = RateLimitConfig {
            auth_burst_size: 0,
            ..RateLimitConfig::default()
        };
        assert!(config.auth_governor_config().is_none());
    }

    #[test]
    fn test_from_lookup() {
        let config = RateLimitConfig::from_lookup(lookup_from(&[
            ("RATE_LIMIT_ENABLED", "FALSE"),
            ("RATE_LIMIT_AUTH_PER_SECOND", "3"),
            ("RATE_LIMIT_AUTH_BURST_SIZE", "9"),
        ]));
        assert_eq!(
            config,
            RateLimitConfig {
                enabled: false,
                auth_per_second: 3,
                auth_burst_size: 9,
            }
        );
    }
}
