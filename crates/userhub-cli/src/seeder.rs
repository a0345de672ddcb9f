//! Fake user seeding.
//!
//! Seeded users share one email domain so [`clear_seed`] can remove them
//! without touching real accounts.

use std::time::Instant;

use fake::Fake;
use fake::faker::address::en::{CityName, StateAbbr};
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use thiserror::Error;
use uuid::Uuid;

use userhub_core::{hash_password, permissions};
use userhub_db::{PgUserRepository, RepositoryError};
use userhub_models::users::{NewUser, UserType};

pub const SEED_DOMAIN: &str = "seed.userhub.local";

/// Password shared by every seeded user.
pub const SEED_PASSWORD: &str = "password123";

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to hash seed password: {0}")]
    Hash(String),
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Generates `count` basic users sharing `password_hash`.
pub fn generate_users(count: usize, password_hash: &str) -> Vec<NewUser> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let local: String = format!("{}.{}", first_name, last_name)
                .to_lowercase()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
                .collect();

            NewUser {
                uuid: Uuid::new_v4(),
                name: format!("{} {}", first_name, last_name),
                email: format!("{}+{}@{}", local, idx, SEED_DOMAIN),
                password_hash: password_hash.to_string(),
                cidade: Some(CityName().fake()),
                estado: Some(StateAbbr().fake()),
                linkedin: None,
                discord: None,
                user_type: UserType::Basic,
                permissions: permissions::encode(&[]),
            }
        })
        .collect()
}

/// Inserts `count` fake users and returns how many rows were written.
pub async fn seed_users(repo: &PgUserRepository, count: usize) -> Result<u64, SeedError> {
    let start_time = Instant::now();
    println!("👥 Seeding {} users...", count);

    let password_hash =
        hash_password(SEED_PASSWORD).map_err(|e| SeedError::Hash(e.error.to_string()))?;
    let users = generate_users(count, &password_hash);
    println!("   ✓ Generated {} users in {:?}", users.len(), start_time.elapsed());

    let inserted = repo.insert_many(users).await?;
    println!(
        "   ✓ Inserted {} users in {:?} (password: {})",
        inserted,
        start_time.elapsed(),
        SEED_PASSWORD
    );

    Ok(inserted)
}

/// Deletes every user in [`SEED_DOMAIN`].
pub async fn clear_seed(repo: &PgUserRepository) -> Result<u64, RepositoryError> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded users...");

    let deleted = repo.delete_by_email_domain(SEED_DOMAIN).await?;
    println!("   ✓ Deleted {} users in {:?}", deleted, start_time.elapsed());

    Ok(deleted)
}
