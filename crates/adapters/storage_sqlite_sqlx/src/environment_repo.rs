//! `SQLite` implementation of [`EnvironmentRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use autorank_app::ports::EnvironmentRepository;
use autorank_domain::environment::Environment;
use autorank_domain::error::{AutorankError, ConflictError};
use autorank_domain::id::EnvironmentId;

use crate::error::StorageError;

struct Wrapper(Environment);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Environment> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let description: Option<String> = row.try_get("description")?;
        let created_at_str: String = row.try_get("created_at")?;

        let id = EnvironmentId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.to_utc())
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Environment {
            id,
            name,
            description,
            created_at,
        }))
    }
}

/// `SQLite`-backed environment repository.
///
/// The `environments.name` column carries a UNIQUE constraint; violations
/// surface as [`AutorankError::Conflict`].
pub struct SqliteEnvironmentRepository {
    pool: SqlitePool,
}

impl SqliteEnvironmentRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl EnvironmentRepository for SqliteEnvironmentRepository {
    async fn create(&self, environment: Environment) -> Result<Environment, AutorankError> {
        let result = sqlx::query(
            "INSERT INTO environments (id, name, description, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(environment.id.to_string())
        .bind(&environment.name)
        .bind(&environment.description)
        .bind(environment.created_at.to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(environment),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(ConflictError {
                    entity: "Environment",
                    name: environment.name,
                }
                .into())
            }
            Err(err) => Err(StorageError::from(err).into()),
        }
    }

    async fn get_by_id(&self, id: EnvironmentId) -> Result<Option<Environment>, AutorankError> {
        let row: Option<Wrapper> = sqlx::query_as("SELECT * FROM environments WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(Wrapper::maybe(row))
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Environment>, AutorankError> {
        let row: Option<Wrapper> = sqlx::query_as("SELECT * FROM environments WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Environment>, AutorankError> {
        let rows: Vec<Wrapper> = sqlx::query_as("SELECT * FROM environments ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}
