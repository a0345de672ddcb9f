//! Registration secret and per-role default permissions.
//!
//! # Configuration
//!
//! - `REGISTER_TOKEN`: Shared secret required by `POST /api/users`. When unset
//!   or empty, every registration attempt is rejected.
//! - `ADMIN_DEFAULT_PERMISSIONS`: Comma-separated tokens granted when a user is
//!   promoted to admin (default: `admin`)
//! - `FOUNDER_DEFAULT_PERMISSIONS`: Comma-separated tokens granted when a user
//!   is promoted to founder (default: `founder`)

use subtle::ConstantTimeEq;

use crate::{env_lookup, split_list};

/// Permission lists assigned on role change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleDefaults {
    pub admin: Vec<String>,
    pub founder: Vec<String>,
}

impl Default for RoleDefaults {
    fn default() -> Self {
        Self {
            admin: vec!["admin".to_string()],
            founder: vec!["founder".to_string()],
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RegistrationConfig {
    pub register_token: Option<String>,
    pub role_defaults: RoleDefaults,
}

impl RegistrationConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let register_token = lookup("REGISTER_TOKEN").filter(|t| !t.is_empty());
        if register_token.is_none() {
            tracing::warn!("REGISTER_TOKEN is not set, registration is disabled");
        }

        let defaults = RoleDefaults::default();
        let role_defaults = RoleDefaults {
            admin: lookup("ADMIN_DEFAULT_PERMISSIONS")
                .map(|v| split_list(&v))
                .unwrap_or(defaults.admin),
            founder: lookup("FOUNDER_DEFAULT_PERMISSIONS")
                .map(|v| split_list(&v))
                .unwrap_or(defaults.founder),
        };

        Self {
            register_token,
            role_defaults,
        }
    }

    /// Compares `candidate` against the configured secret in constant time.
    ///
    /// Always false when no secret is configured. A length mismatch still
    /// runs one comparison so timing does not reveal the secret's length.
    pub fn token_matches(&self, candidate: &str) -> bool {
        let Some(expected) = self.register_token.as_deref() else {
            return false;
        };

        let (candidate, expected) = (candidate.as_bytes(), expected.as_bytes());
        if candidate.len() != expected.len() {
            let _ = expected.ct_eq(expected);
            return false;
        }

        candidate.ct_eq(expected).into()
    }
}
