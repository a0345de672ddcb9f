use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use userhub_core::AppError;
use userhub_models::auth::{MessageResponse, UserResponse};
use userhub_models::users::{
    RegisterUserDto, UpdatePermissionsDto, UpdateProfileDto, UpdateUserTypeDto, UserSummary,
};

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::service::{UserService, parse_user_uuid};
use crate::state::AppState;
use crate::validator::JsonBody;

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users ordered by creation time", body = Vec<UserSummary>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Token user no longer exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_users(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<UserSummary>>, AppError> {
    let users = UserService::list(state.users.as_ref()).await?;
    Ok(Json(users))
}

/// Register a new user
///
/// The body must carry the server's registration secret in `register_token`.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterUserDto,
    responses(
        (status = 201, description = "User registered successfully", body = MessageResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 403, description = "Invalid registration token", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Could not complete registration", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, body))]
pub async fn register_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let dto = UserService::parse_registration(&state.registration_config, &body)?;
    UserService::register(state.users.as_ref(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// Update your own profile
///
/// Only fields present in the body are changed.
#[utoipa::path(
    put,
    path = "/api/users/{uuid}",
    params(("uuid" = String, Path, description = "User uuid")),
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid uuid or body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not your profile", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(uuid): Path<String>,
    JsonBody(dto): JsonBody<UpdateProfileDto>,
) -> Result<Json<UserResponse>, AppError> {
    let target = parse_user_uuid(&uuid)?;
    let user =
        UserService::update_profile(state.users.as_ref(), auth_user.user(), target, dto).await?;

    Ok(Json(UserResponse {
        message: "User updated successfully".to_string(),
        user,
    }))
}

/// Change a user's role (admins only)
///
/// Promoting to `founder` or `admin` replaces the user's permissions with the
/// configured defaults for that role.
#[utoipa::path(
    put,
    path = "/api/users/{uuid}/type",
    params(("uuid" = String, Path, description = "User uuid")),
    request_body = UpdateUserTypeDto,
    responses(
        (status = 200, description = "User type updated", body = UserResponse),
        (status = 400, description = "Invalid uuid or user type", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, auth_user))]
pub async fn update_user_type(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(uuid): Path<String>,
    JsonBody(dto): JsonBody<UpdateUserTypeDto>,
) -> Result<Json<UserResponse>, AppError> {
    let target = parse_user_uuid(&uuid)?;
    let user = UserService::change_user_type(
        state.users.as_ref(),
        auth_user.user(),
        target,
        dto.user_type,
        &state.registration_config.role_defaults,
    )
    .await?;

    Ok(Json(UserResponse {
        message: "User type updated successfully".to_string(),
        user,
    }))
}

/// Delete your own account
#[utoipa::path(
    delete,
    path = "/api/users/{uuid}",
    params(("uuid" = String, Path, description = "User uuid")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not your account", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(uuid): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    UserService::delete(state.users.as_ref(), auth_user.user(), &uuid).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}

/// Replace a user's permissions (allowed while the target holds `admin`)
///
/// Also served at `/api/users/{uuid}/permissions-alt`; the body key
/// `permissions` is accepted in place of `permission`.
#[utoipa::path(
    put,
    path = "/api/users/{uuid}/permission",
    params(("uuid" = String, Path, description = "User uuid")),
    request_body = UpdatePermissionsDto,
    responses(
        (status = 200, description = "Permissions updated", body = UserResponse),
        (status = 400, description = "Invalid uuid, body, or stored permissions", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Target does not hold the admin permission", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Empty permission token", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn update_user_permissions(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(uuid): Path<String>,
    JsonBody(dto): JsonBody<UpdatePermissionsDto>,
) -> Result<Json<UserResponse>, AppError> {
    let target = parse_user_uuid(&uuid)?;
    let user =
        UserService::update_permissions(state.users.as_ref(), auth_user.user(), target, dto)
            .await?;

    Ok(Json(UserResponse {
        message: "Permissions updated successfully".to_string(),
        user,
    }))
}
