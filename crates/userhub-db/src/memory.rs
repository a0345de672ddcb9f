//! In-memory [`UserRepository`] for tests.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use userhub_models::users::{NewUser, User};

use crate::error::RepositoryError;
use crate::repository::UserRepository;

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    inner: RwLock<Store>,
}

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    users: Vec<User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the stored row for `user.uuid` without touching timestamps.
    /// Lets tests plant values the service would never write, such as a
    /// corrupt permission blob.
    pub async fn put_raw(&self, user: User) {
        let mut store = self.inner.write().await;
        match store.users.iter_mut().find(|u| u.uuid == user.uuid) {
            Some(existing) => *existing = user,
            None => store.users.push(user),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let store = self.inner.read().await;
        let mut users = store.users.clone();
        users.sort_by_key(|u| (u.created_at, u.id));
        Ok(users)
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<User>, RepositoryError> {
        let store = self.inner.read().await;
        Ok(store.users.iter().find(|u| u.uuid == uuid).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let store = self.inner.read().await;
        Ok(store.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut store = self.inner.write().await;
        if store.users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict("users_email_key".to_string()));
        }
        if store.users.iter().any(|u| u.uuid == user.uuid) {
            return Err(RepositoryError::Conflict("users_uuid_key".to_string()));
        }

        store.next_id += 1;
        let now = Utc::now();
        let record = User {
            id: store.next_id,
            uuid: user.uuid,
            name: user.name,
            email: user.email,
            password: user.password_hash,
            cidade: user.cidade,
            estado: user.estado,
            linkedin: user.linkedin,
            discord: user.discord,
            user_type: user.user_type,
            permissions: user.permissions,
            created_at: now,
            updated_at: now,
        };
        store.users.push(record.clone());
        Ok(record)
    }

    async fn update(&self, user: &User) -> Result<Option<User>, RepositoryError> {
        let mut store = self.inner.write().await;
        if store
            .users
            .iter()
            .any(|u| u.email == user.email && u.uuid != user.uuid)
        {
            return Err(RepositoryError::Conflict("users_email_key".to_string()));
        }

        let Some(existing) = store.users.iter_mut().find(|u| u.uuid == user.uuid) else {
            return Ok(None);
        };

        existing.name = user.name.clone();
        existing.email = user.email.clone();
        existing.password = user.password.clone();
        existing.cidade = user.cidade.clone();
        existing.estado = user.estado.clone();
        existing.linkedin = user.linkedin.clone();
        existing.discord = user.discord.clone();
        existing.user_type = user.user_type;
        existing.permissions = user.permissions.clone();
        existing.updated_at = Utc::now();
        Ok(Some(existing.clone()))
    }

    async fn delete_by_uuid(&self, uuid: Uuid) -> Result<bool, RepositoryError> {
        let mut store = self.inner.write().await;
        let before = store.users.len();
        store.users.retain(|u| u.uuid != uuid);
        Ok(store.users.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use userhub_models::users::UserType;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            uuid: Uuid::new_v4(),
            name: "Ana".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            cidade: None,
            estado: None,
            linkedin: None,
            discord: None,
            user_type: UserType::Basic,
            permissions: r#"{"v":1,"permissions":[]}"#.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_and_timestamps() {
        let repo = InMemoryUserRepository::new();
        let a = repo.insert(new_user("a@example.com")).await.unwrap();
        let b = repo.insert(new_user("b@example.com")).await.unwrap();

        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(a.created_at, a.updated_at);

        let listed: Vec<_> = repo.list().await.unwrap().into_iter().map(|u| u.id).collect();
        assert_eq!(listed, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_unique_email() {
        let repo = InMemoryUserRepository::new();
        repo.insert(new_user("a@example.com")).await.unwrap();
        let mut other = repo.insert(new_user("b@example.com")).await.unwrap();

        assert!(repo.insert(new_user("a@example.com")).await.unwrap_err().is_conflict());

        other.email = "a@example.com".to_string();
        assert!(repo.update(&other).await.unwrap_err().is_conflict());
    }

    #[tokio::test]
    async fn test_update_missing_and_delete() {
        let repo = InMemoryUserRepository::new();
        let user = repo.insert(new_user("a@example.com")).await.unwrap();

        assert!(repo.delete_by_uuid(user.uuid).await.unwrap());
        assert!(!repo.delete_by_uuid(user.uuid).await.unwrap());
        assert!(repo.update(&user).await.unwrap().is_none());
        assert!(repo.find_by_uuid(user.uuid).await.unwrap().is_none());
    }
}
