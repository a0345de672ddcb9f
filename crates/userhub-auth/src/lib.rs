//! # userhub Auth
//!
//! Bearer token types and HS256 utilities for the userhub API.
//!
//! - [`claims`]: The access token payload
//! - [`jwt`]: Token creation and verification
//!
//! # Example
//!
//! ```ignore
//! use userhub_auth::{create_access_token, verify_token};
//! use userhub_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user.uuid, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.uuid, user.uuid);
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_access_token, create_token_with_times, verify_token};
