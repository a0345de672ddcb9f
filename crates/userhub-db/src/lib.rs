//! # userhub DB
//!
//! Connection pool, migrations and the user store for the userhub API.
//!
//! Handlers never touch SQL. They go through [`UserRepository`], which has a
//! PostgreSQL implementation ([`PgUserRepository`]) and, behind the
//! `test-utils` feature, an in-memory one ([`InMemoryUserRepository`]).
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use userhub_db::{init_db_pool, run_migrations, PgUserRepository, UserRepository};
//!
//! let pool = init_db_pool().await?;
//! run_migrations(&pool).await?;
//! let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool));
//! ```

pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;
pub mod repository;

use std::env;

use sqlx::postgres::PgPoolOptions;

pub use error::RepositoryError;
#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;
pub use repository::UserRepository;
pub use sqlx::PgPool;

/// Connects to `DATABASE_URL` with up to `DATABASE_MAX_CONNECTIONS` connections (default 10).
pub async fn init_db_pool() -> Result<PgPool, RepositoryError> {
    let database_url = env::var("DATABASE_URL").map_err(|_| RepositoryError::MissingUrl)?;
    let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await?;

    tracing::info!(max_connections, "Connected to PostgreSQL");
    Ok(pool)
}

/// Applies the embedded migrations under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), RepositoryError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
