//! First-admin bootstrap.
//!
//! Role changes need an authenticated admin caller, so the first admin can
//! only be created here.

use thiserror::Error;
use uuid::Uuid;
use validator::ValidateEmail;

use userhub_config::RoleDefaults;
use userhub_core::{hash_password, permissions};
use userhub_db::{RepositoryError, UserRepository};
use userhub_models::users::{NewUser, User, UserType};

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug)]
pub struct AdminInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum CreateAdminError {
    #[error("{0}")]
    InvalidInput(&'static str),
    #[error("a user with email {0} already exists")]
    EmailTaken(String),
    #[error("failed to hash password: {0}")]
    Hash(String),
    #[error("database error: {0}")]
    Repository(#[source] RepositoryError),
}

fn check_input(input: &AdminInput) -> Result<(), CreateAdminError> {
    if input.name.trim().is_empty() {
        return Err(CreateAdminError::InvalidInput("name must not be empty"));
    }
    if !input.email.validate_email() {
        return Err(CreateAdminError::InvalidInput("email is not a valid address"));
    }
    if input.password.len() < MIN_PASSWORD_LENGTH {
        return Err(CreateAdminError::InvalidInput(
            "password must be at least 8 characters",
        ));
    }
    Ok(())
}

/// Inserts an `admin` user carrying the configured admin default permissions.
pub async fn create_admin(
    users: &dyn UserRepository,
    input: AdminInput,
    defaults: &RoleDefaults,
) -> Result<User, CreateAdminError> {
    check_input(&input)?;

    if users
        .find_by_email(&input.email)
        .await
        .map_err(CreateAdminError::Repository)?
        .is_some()
    {
        return Err(CreateAdminError::EmailTaken(input.email));
    }

    let password_hash =
        hash_password(&input.password).map_err(|e| CreateAdminError::Hash(e.error.to_string()))?;

    users
        .insert(NewUser {
            uuid: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            email: input.email.clone(),
            password_hash,
            cidade: None,
            estado: None,
            linkedin: None,
            discord: None,
            user_type: UserType::Admin,
            permissions: permissions::encode(&defaults.admin),
        })
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => CreateAdminError::EmailTaken(input.email),
            other => CreateAdminError::Repository(other),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use userhub_db::InMemoryUserRepository;

    fn input(email: &str) -> AdminInput {
        AdminInput {
            name: "Root Admin".to_string(),
            email: email.to_string(),
            password: "bootstrap-password".to_string(),
        }
    }

    fn defaults() -> RoleDefaults {
        RoleDefaults {
            admin: vec!["admin".to_string(), "users:manage".to_string()],
            founder: vec!["founder".to_string()],
        }
    }

    #[tokio::test]
    async fn test_create_admin_sets_type_and_defaults() {
        let repo = InMemoryUserRepository::new();
        let user = create_admin(&repo, input("root@example.com"), &defaults())
            .await
            .unwrap();

        assert_eq!(user.user_type, UserType::Admin);
        assert_eq!(
            permissions::decode(&user.permissions).unwrap(),
            vec!["admin", "users:manage"]
        );
        assert!(userhub_core::verify_password("bootstrap-password", &user.password).unwrap());
    }

    #[tokio::test]
    async fn test_create_admin_rejects_existing_email() {
        let repo = InMemoryUserRepository::new();
        create_admin(&repo, input("root@example.com"), &defaults())
            .await
            .unwrap();

        let err = create_admin(&repo, input("root@example.com"), &defaults())
            .await
            .unwrap_err();
        assert!(matches!(err, CreateAdminError::EmailTaken(_)));
    }

    #[tokio::test]
    async fn test_create_admin_validates_input() {
        let repo = InMemoryUserRepository::new();

        let err = create_admin(&repo, input("not-an-email"), &defaults())
            .await
            .unwrap_err();
        assert!(matches!(err, CreateAdminError::InvalidInput(_)));

        let mut short = input("root@example.com");
        short.password = "short".to_string();
        let err = create_admin(&repo, short, &defaults()).await.unwrap_err();
        assert!(matches!(err, CreateAdminError::InvalidInput(_)));

        assert!(repo.list().await.unwrap().is_empty());
    }
}
