use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use userhub_models::auth::{LoginRequest, LoginResponse, MessageResponse, UserResponse};
use userhub_models::users::{
    RegisterUserDto, UpdatePermissionsDto, UpdateProfileDto, UpdateUserTypeDto, UserProfile,
    UserSummary, UserType,
};

use crate::modules::auth::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::register_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::update_user_type,
        crate::modules::users::controller::delete_user,
        crate::modules::users::controller::update_user_permissions,
    ),
    components(
        schemas(
            UserType,
            UserSummary,
            UserProfile,
            RegisterUserDto,
            UpdateProfileDto,
            UpdateUserTypeDto,
            UpdatePermissionsDto,
            LoginRequest,
            LoginResponse,
            MessageResponse,
            UserResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Bearer token issuance"),
        (name = "Users", description = "User registration, profile, role and permission management")
    ),
    info(
        title = "userhub API",
        version = "0.1.0",
        description = "User management API built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_user_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/api/users",
            "/api/users/{uuid}",
            "/api/users/{uuid}/type",
            "/api/users/{uuid}/permission",
            "/api/auth/login",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
