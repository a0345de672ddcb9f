use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A unique column (email or uuid) already holds the value.
    #[error("unique constraint violated: {0}")]
    Conflict(String),

    #[error("DATABASE_URL must be set")]
    MissingUrl,

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl RepositoryError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, RepositoryError::Conflict(_))
    }

    /// Maps unique violations to [`RepositoryError::Conflict`].
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::Conflict(db.constraint().unwrap_or("users").to_string())
            }
            _ => RepositoryError::Database(err),
        }
    }
}
