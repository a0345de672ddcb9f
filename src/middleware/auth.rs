use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use userhub_auth::verify_token;
use userhub_core::AppError;
use userhub_models::users::User;

use crate::metrics::track_auth_gate;
use crate::state::AppState;

/// The authenticated caller, resolved from the bearer token.
///
/// Declared as a handler argument; the handler only runs when the header
/// carries a valid token for a user that still exists.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn user(&self) -> &User {
        &self.0
    }

    pub fn uuid(&self) -> uuid::Uuid {
        self.0.uuid
    }
}

/// Extracts the credential from an `Authorization` value of the form
/// `Bearer <token>`. The scheme is matched case-insensitively.
pub fn bearer_credential(value: &str) -> Option<&str> {
    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Some(token),
        _ => None,
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                track_auth_gate("missing");
                AppError::unauthorized("Missing authentication token")
            })?;

        let token = bearer_credential(auth_header).ok_or_else(|| {
            track_auth_gate("invalid");
            AppError::unauthorized("Invalid or expired token")
        })?;

        let claims = verify_token(token, &state.jwt_config).inspect_err(|_| {
            track_auth_gate("invalid");
        })?;

        let user = state
            .users
            .find_by_uuid(claims.uuid)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| {
                track_auth_gate("user_not_found");
                AppError::not_found("User not found")
            })?;

        track_auth_gate("ok");
        Ok(AuthUser(user))
    }
}
