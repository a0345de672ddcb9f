use axum::{
    Router,
    routing::{MethodRouter, get, post, put},
};

use crate::modules::users::controller::{
    delete_user, get_users, register_user, update_user, update_user_permissions,
    update_user_type,
};
use crate::state::AppState;

/// User routes. `limit` wraps the public registration route only.
pub fn init_users_router(
    limit: impl Fn(MethodRouter<AppState>) -> MethodRouter<AppState>,
) -> Router<AppState> {
    Router::new()
        .route("/", get(get_users))
        .route("/", limit(post(register_user)))
        .route("/{uuid}", put(update_user).delete(delete_user))
        .route("/{uuid}/type", put(update_user_type))
        .route("/{uuid}/permission", put(update_user_permissions))
        .route("/{uuid}/permissions-alt", put(update_user_permissions))
}
