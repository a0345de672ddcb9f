//! Request-level authentication and authorization.
//!
//! - [`auth`]: The `AuthUser` extractor (bearer token -> stored user)
//! - [`policy`]: The authorization predicate shared by user mutations
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//! use crate::middleware::policy::{UserAction, authorize};
//!
//! async fn update(auth_user: AuthUser, Path(uuid): Path<Uuid>) -> Result<(), AppError> {
//!     authorize(auth_user.user(), UserAction::UpdateProfile { target: uuid })?;
//!     // ...
//! }
//! ```

pub mod auth;
pub mod policy;
