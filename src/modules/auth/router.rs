use axum::Router;
use axum::routing::{MethodRouter, post};

use super::controller::login_user;
use crate::state::AppState;

/// `limit` wraps each public route, typically with the rate limiter.
pub fn init_auth_router(
    limit: impl Fn(MethodRouter<AppState>) -> MethodRouter<AppState>,
) -> Router<AppState> {
    Router::new().route("/login", limit(post(login_user)))
}
