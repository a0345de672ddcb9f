//! # userhub Models
//!
//! Domain models and DTOs for the userhub API.
//!
//! - [`users`]: The persisted user record, role tag, projections and request bodies
//! - [`auth`]: Login request/response and generic message bodies
//!
//! # Example
//!
//! ```ignore
//! use userhub_models::users::{User, UserProfile, UserType};
//!
//! let profile = UserProfile::from(&user);
//! assert_eq!(profile.user_type, UserType::Basic);
//! ```

pub mod auth;
pub mod users;

pub use auth::{LoginRequest, LoginResponse, MessageResponse, UserResponse};
pub use users::{
    NewUser, RegisterUserDto, UpdatePermissionsDto, UpdateProfileDto, UpdateUserTypeDto, User,
    UserProfile, UserSummary, UserType,
};
