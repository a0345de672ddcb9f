//! The single authorization predicate for user mutations.
//!
//! | Action | Allowed when |
//! |---|---|
//! | `UpdateProfile` | caller is the target |
//! | `Delete` | caller is the target (an unparseable path never matches) |
//! | `ChangeRole` | caller's `user_type` is `admin` |
//! | `UpdatePermissions` | target's decoded permission list contains `admin` |
//!
//! Each action carries the facts about its target that the rule reads.

use uuid::Uuid;

use userhub_core::{AppError, permissions};
use userhub_models::users::{User, UserType};

use crate::metrics::track_authorization_check;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction<'a> {
    UpdateProfile { target: Uuid },
    ChangeRole,
    /// `None` when the path segment is not a uuid.
    Delete { target: Option<Uuid> },
    UpdatePermissions { target_permissions: &'a [String] },
}

impl UserAction<'_> {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserAction::UpdateProfile { .. } => "update_profile",
            UserAction::ChangeRole => "change_role",
            UserAction::Delete { .. } => "delete",
            UserAction::UpdatePermissions { .. } => "update_permissions",
        }
    }
}

pub fn is_allowed(caller: &User, action: &UserAction<'_>) -> bool {
    match action {
        UserAction::UpdateProfile { target } => caller.uuid == *target,
        UserAction::Delete { target } => *target == Some(caller.uuid),
        UserAction::ChangeRole => caller.user_type == UserType::Admin,
        UserAction::UpdatePermissions { target_permissions } => {
            permissions::has_permission(target_permissions, permissions::ADMIN)
        }
    }
}

/// Returns 403 unless `caller` may perform `action`.
pub fn authorize(caller: &User, action: UserAction<'_>) -> Result<(), AppError> {
    let allowed = is_allowed(caller, &action);
    track_authorization_check(action.as_str(), allowed);

    if allowed {
        Ok(())
    } else {
        tracing::debug!(caller = %caller.uuid, action = action.as_str(), "Authorization denied");
        Err(AppError::forbidden("Access denied"))
    }
}
