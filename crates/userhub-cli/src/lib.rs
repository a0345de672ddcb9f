//! # userhub CLI
//!
//! Administrative utilities for the userhub API: bootstrapping the first
//! admin account and seeding fake users for development.
//!
//! ## Usage
//!
//! ```ignore
//! use userhub_cli::{admin, seeder};
//!
//! let repo = userhub_cli::open_repository(init_db_pool().await?).await?;
//! let admin = admin::create_admin(&repo, input, &role_defaults).await?;
//! seeder::seed_users(&repo, 100).await?;
//! ```

pub mod admin;
pub mod seeder;

use userhub_db::{PgPool, PgUserRepository, RepositoryError, run_migrations};

/// Brings the schema up to date and wraps the pool.
///
/// Commands may run before the server ever has, so the CLI migrates on its own.
pub async fn open_repository(pool: PgPool) -> Result<PgUserRepository, RepositoryError> {
    run_migrations(&pool).await?;
    Ok(PgUserRepository::new(pool))
}
