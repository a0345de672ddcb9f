//! User domain models and DTOs.
//!
//! [`User`] is the persisted record and is never serialized directly. Responses
//! use the [`UserSummary`] and [`UserProfile`] projections, which decode the
//! stored permission blob and never carry the password hash.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use userhub_core::permissions;

/// Role tag stored on every user.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "user_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Basic,
    Founder,
    Admin,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Basic => "basic",
            UserType::Founder => "founder",
            UserType::Admin => "admin",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(UserType::Basic),
            "founder" => Ok(UserType::Founder),
            "admin" => Ok(UserType::Admin),
            other => Err(format!("unknown user type '{other}'")),
        }
    }
}

/// A user row.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    /// bcrypt hash
    pub password: String,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub linkedin: Option<String>,
    pub discord: Option<String>,
    pub user_type: UserType,
    /// Encoded permission list, see [`userhub_core::permissions`].
    pub permissions: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Decoded permission list, or empty when the stored value is corrupt.
    pub fn permission_list(&self) -> Vec<String> {
        permissions::decode(&self.permissions).unwrap_or_else(|e| {
            tracing::warn!(user_uuid = %self.uuid, error = %e, "Stored permissions do not decode");
            Vec::new()
        })
    }
}

/// Values for a row about to be inserted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub linkedin: Option<String>,
    pub discord: Option<String>,
    pub user_type: UserType,
    pub permissions: String,
}

/// List projection. Omits email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub uuid: Uuid,
    pub name: String,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub linkedin: Option<String>,
    pub discord: Option<String>,
    pub user_type: UserType,
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            uuid: user.uuid,
            name: user.name.clone(),
            cidade: user.cidade.clone(),
            estado: user.estado.clone(),
            linkedin: user.linkedin.clone(),
            discord: user.discord.clone(),
            user_type: user.user_type,
            permissions: user.permission_list(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Projection returned by mutations and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub uuid: Uuid,
    pub name: String,
    #[schema(example = "ana@example.com")]
    pub email: String,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub linkedin: Option<String>,
    pub discord: Option<String>,
    pub user_type: UserType,
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            uuid: user.uuid,
            name: user.name.clone(),
            email: user.email.clone(),
            cidade: user.cidade.clone(),
            estado: user.estado.clone(),
            linkedin: user.linkedin.clone(),
            discord: user.discord.clone(),
            user_type: user.user_type,
            permissions: user.permission_list(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Registration body.
///
/// `register_token` is checked against the raw body before this type is
/// parsed, so a wrong token is rejected even when the rest is invalid.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterUserDto {
    #[validate(length(min = 1))]
    #[schema(example = "Ana Souza")]
    pub name: String,
    #[validate(email)]
    #[schema(example = "ana@example.com")]
    pub email: String,
    #[validate(length(min = 8))]
    #[schema(example = "password123")]
    pub password: String,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub linkedin: Option<String>,
    pub discord: Option<String>,
    pub register_token: String,
}

/// Partial profile update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub linkedin: Option<String>,
    pub discord: Option<String>,
    #[validate(length(min = 8))]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateUserTypeDto {
    pub user_type: UserType,
}

/// Replacement permission list. `permissions` is accepted as a legacy key.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdatePermissionsDto {
    #[serde(alias = "permissions")]
    #[validate(custom(function = "validate_permission_tokens"))]
    #[schema(example = json!(["admin"]))]
    pub permission: Vec<String>,
}

fn validate_permission_tokens(tokens: &[String]) -> Result<(), ValidationError> {
    if tokens.iter().any(|t| t.trim().is_empty()) {
        return Err(ValidationError::new("empty_permission")
            .with_message("Permission tokens must not be empty".into()));
    }
    Ok(())
}
