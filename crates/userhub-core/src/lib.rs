//! # userhub Core
//!
//! Core types, errors, and utilities for the userhub API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification
//! - [`permissions`]: Permission tokens and the stored permission-list codec
//!
//! # Example
//!
//! ```ignore
//! use userhub_core::errors::AppError;
//! use userhub_core::password::hash_password;
//! use userhub_core::permissions;
//!
//! let error = AppError::not_found("User not found");
//! let hash = hash_password("secure_password")?;
//! let blob = permissions::encode(&["admin".to_string()]);
//! ```

pub mod errors;
pub mod password;
pub mod permissions;

pub use errors::AppError;
pub use password::{hash_password, verify_password};
pub use permissions::PermissionDecodeError;
