use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use userhub_models::users::{NewUser, User};

use crate::error::RepositoryError;
use crate::repository::UserRepository;

const USER_COLUMNS: &str = "id, uuid, name, email, password, cidade, estado, linkedin, discord, \
     user_type, permissions, created_at, updated_at";

/// [`UserRepository`] backed by the `users` table.
#[derive(Clone, Debug)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Inserts many rows in one transaction. Used by the seeding CLI.
    pub async fn insert_many(&self, users: Vec<NewUser>) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for user in users {
            inserted += bind_new_user(
                sqlx::query(
                    "INSERT INTO users (uuid, name, email, password, cidade, estado, linkedin, \
                     discord, user_type, permissions) \
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
                     ON CONFLICT (email) DO NOTHING",
                ),
                &user,
            )
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Deletes every user whose email ends with `@{domain}`.
    pub async fn delete_by_email_domain(&self, domain: &str) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE email LIKE $1")
            .bind(format!("%@{domain}"))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

fn bind_new_user<'q>(
    query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    user: &'q NewUser,
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    query
        .bind(user.uuid)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.cidade)
        .bind(&user.estado)
        .bind(&user.linkedin)
        .bind(&user.discord)
        .bind(user.user_type)
        .bind(&user.permissions)
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE uuid = $1"
        ))
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let sql = format!(
            "INSERT INTO users (uuid, name, email, password, cidade, estado, linkedin, discord, \
             user_type, permissions) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {USER_COLUMNS}"
        );

        let query = sqlx::query_as::<_, User>(&sql)
            .bind(user.uuid)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.cidade)
            .bind(&user.estado)
            .bind(&user.linkedin)
            .bind(&user.discord)
            .bind(user.user_type)
            .bind(&user.permissions);

        query
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from_write)
    }

    async fn update(&self, user: &User) -> Result<Option<User>, RepositoryError> {
        let sql = format!(
            "UPDATE users SET name = $2, email = $3, password = $4, cidade = $5, estado = $6, \
             linkedin = $7, discord = $8, user_type = $9, permissions = $10, updated_at = now() \
             WHERE uuid = $1 \
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(user.uuid)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password)
            .bind(&user.cidade)
            .bind(&user.estado)
            .bind(&user.linkedin)
            .bind(&user.discord)
            .bind(user.user_type)
            .bind(&user.permissions)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::from_write)
    }

    async fn delete_by_uuid(&self, uuid: Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE uuid = $1")
            .bind(uuid)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(all(test, feature = "postgres-tests"))]
mod tests {
    use super::*;
    use userhub_core::permissions;
    use userhub_models::users::UserType;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            uuid: Uuid::new_v4(),
            name: "Ana".to_string(),
            email: email.to_string(),
            password_hash: "$2b$04$hash".to_string(),
            cidade: None,
            estado: None,
            linkedin: None,
            discord: None,
            user_type: UserType::Basic,
            permissions: permissions::encode(&[]),
        }
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_insert_and_find(pool: PgPool) {
        let repo = PgUserRepository::new(pool);
        let inserted = repo.insert(new_user("ana@example.com")).await.unwrap();

        let found = repo.find_by_uuid(inserted.uuid).await.unwrap().unwrap();
        assert_eq!(found.email, "ana@example.com");
        assert_eq!(found.user_type, UserType::Basic);
        assert!(repo.find_by_email("ana@example.com").await.unwrap().is_some());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_duplicate_email_is_conflict(pool: PgPool) {
        let repo = PgUserRepository::new(pool);
        repo.insert(new_user("dup@example.com")).await.unwrap();

        let err = repo.insert(new_user("dup@example.com")).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_update_and_delete(pool: PgPool) {
        let repo = PgUserRepository::new(pool);
        let mut user = repo.insert(new_user("up@example.com")).await.unwrap();

        user.user_type = UserType::Admin;
        user.permissions = permissions::encode(&["admin".to_string()]);
        let updated = repo.update(&user).await.unwrap().unwrap();
        assert_eq!(updated.user_type, UserType::Admin);
        assert!(updated.updated_at >= user.updated_at);

        assert!(repo.delete_by_uuid(user.uuid).await.unwrap());
        assert!(!repo.delete_by_uuid(user.uuid).await.unwrap());
        assert!(repo.update(&user).await.unwrap().is_none());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_seed_helpers(pool: PgPool) {
        let repo = PgUserRepository::new(pool);
        let batch = vec![
            new_user("a@seed.userhub.local"),
            new_user("b@seed.userhub.local"),
        ];
        assert_eq!(repo.insert_many(batch).await.unwrap(), 2);
        repo.insert(new_user("keep@example.com")).await.unwrap();

        assert_eq!(repo.delete_by_email_domain("seed.userhub.local").await.unwrap(), 2);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }
}
