use std::fmt;
use std::sync::Arc;

use userhub_config::{CorsConfig, JwtConfig, RateLimitConfig, RegistrationConfig};
use userhub_db::{PgUserRepository, UserRepository, init_db_pool, run_migrations};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub jwt_config: JwtConfig,
    pub registration_config: RegistrationConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
}

impl AppState {
    /// State with configuration read from the environment and the given store.
    pub fn with_repository(users: Arc<dyn UserRepository>) -> Self {
        Self {
            users,
            jwt_config: JwtConfig::from_env(),
            registration_config: RegistrationConfig::from_env(),
            cors_config: CorsConfig::from_env(),
            rate_limit_config: RateLimitConfig::from_env(),
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("cors_config", &self.cors_config)
            .field("rate_limit_config", &self.rate_limit_config)
            .finish_non_exhaustive()
    }
}

/// Connects to PostgreSQL, applies migrations and loads configuration.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let pool = init_db_pool().await?;
    run_migrations(&pool).await?;

    Ok(AppState::with_repository(Arc::new(PgUserRepository::new(
        pool,
    ))))
}
