//! `SQLite` implementation of [`AutomationRepository`].
//!
//! The sortable columns are mapped from the closed [`SortField`] enum, so
//! no caller-supplied string ever reaches the SQL text. Criticality batch
//! writes run inside one transaction per batch: a batch is all-or-nothing,
//! batches commit independently of each other.

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use autorank_app::ports::AutomationRepository;
use autorank_domain::automation::Automation;
use autorank_domain::error::AutorankError;
use autorank_domain::id::{AutomationId, EnvironmentId};
use autorank_domain::query::{ListQuery, SortDirection, SortField};
use autorank_domain::rank::RankAssignment;

use crate::error::StorageError;

struct Wrapper(Automation);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Automation> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let environment_id: String = row.try_get("environment_id")?;
        let critical_ratio: f64 = row.try_get("critical_ratio")?;
        let criticality: u32 = row.try_get("criticality")?;
        let created_at_str: String = row.try_get("created_at")?;

        let id = AutomationId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let environment_id = EnvironmentId::from_str(&environment_id)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.to_utc())
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Automation {
            id,
            name,
            environment_id,
            critical_ratio,
            criticality,
            created_at,
        }))
    }
}

fn sort_column(field: SortField) -> &'static str {
    match field {
        SortField::Name => "name",
        SortField::CriticalRatio => "critical_ratio",
        SortField::Criticality => "criticality",
    }
}

fn sort_keyword(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    }
}

/// `SQLite`-backed automation repository.
pub struct SqliteAutomationRepository {
    pool: SqlitePool,
}

impl SqliteAutomationRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn page_sql(query: &ListQuery, filtered_by_environment: bool) -> String {
        let column = sort_column(query.sort_by);
        let direction = sort_keyword(query.sort_direction);
        let filter = if filtered_by_environment {
            "WHERE environment_id = ? "
        } else {
            ""
        };
        // Secondary sort on id keeps pages stable when the sort key ties.
        format!(
            "SELECT * FROM automations {filter}ORDER BY {column} {direction}, id ASC LIMIT ? OFFSET ?"
        )
    }
}

impl AutomationRepository for SqliteAutomationRepository {
    async fn create(&self, automation: Automation) -> Result<Automation, AutorankError> {
        sqlx::query(
            "INSERT INTO automations (id, name, environment_id, critical_ratio, criticality, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(automation.id.to_string())
        .bind(&automation.name)
        .bind(automation.environment_id.to_string())
        .bind(automation.critical_ratio)
        .bind(automation.criticality)
        .bind(automation.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        Ok(automation)
    }

    async fn get_by_id(&self, id: AutomationId) -> Result<Option<Automation>, AutorankError> {
        let row: Option<Wrapper> = sqlx::query_as("SELECT * FROM automations WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Automation>, AutorankError> {
        let rows: Vec<Wrapper> = sqlx::query_as("SELECT * FROM automations")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<Automation>, AutorankError> {
        let sql = Self::page_sql(query, false);
        let rows: Vec<Wrapper> = sqlx::query_as(&sql)
            .bind(i64::from(query.limit))
            .bind(i64::try_from(query.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn list_by_environment(
        &self,
        environment_id: EnvironmentId,
        query: &ListQuery,
    ) -> Result<Vec<Automation>, AutorankError> {
        let sql = Self::page_sql(query, true);
        let rows: Vec<Wrapper> = sqlx::query_as(&sql)
            .bind(environment_id.to_string())
            .bind(i64::from(query.limit))
            .bind(i64::try_from(query.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update_critical_ratio(
        &self,
        id: AutomationId,
        critical_ratio: f64,
    ) -> Result<Option<Automation>, AutorankError> {
        let result = sqlx::query("UPDATE automations SET critical_ratio = ? WHERE id = ?")
            .bind(critical_ratio)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    async fn delete(&self, id: AutomationId) -> Result<bool, AutorankError> {
        let result = sqlx::query("DELETE FROM automations WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(result.rows_affected() > 0)
    }

    async fn apply_criticality(
        &self,
        assignments: &[RankAssignment],
    ) -> Result<(), AutorankError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;
        for assignment in assignments {
            sqlx::query("UPDATE automations SET criticality = ? WHERE id = ?")
                .bind(assignment.criticality)
                .bind(assignment.id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
        }
        tx.commit().await.map_err(StorageError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment_repo::SqliteEnvironmentRepository;
    use crate::pool::Config;
    use autorank_app::ports::EnvironmentRepository;
    use autorank_domain::environment::Environment;

    async fn setup() -> (SqliteAutomationRepository, EnvironmentId) {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        let pool = db.pool().clone();

        let environments = SqliteEnvironmentRepository::new(pool.clone());
        let environment = environments
            .create(Environment::builder().name("production").build().unwrap())
            .await
            .unwrap();

        (SqliteAutomationRepository::new(pool), environment.id)
    }

    fn automation(environment_id: EnvironmentId, name: &str, ratio: f64) -> Automation {
        Automation::builder()
            .name(name)
            .environment_id(environment_id)
            .critical_ratio(ratio)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_and_retrieve_automation() {
        let (repo, env_id) = setup().await;
        let auto = automation(env_id, "deploy gate", 0.75);
        let id = auto.id;

        repo.create(auto).await.unwrap();
        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.name, "deploy gate");
        assert_eq!(fetched.environment_id, env_id);
        assert!((fetched.critical_ratio - 0.75).abs() < f64::EPSILON);
        assert_eq!(fetched.criticality, 0);
    }

    #[tokio::test]
    async fn should_return_none_when_automation_not_found() {
        let (repo, _) = setup().await;
        let result = repo.get_by_id(AutomationId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_update_critical_ratio_and_return_fresh_row() {
        let (repo, env_id) = setup().await;
        let auto = automation(env_id, "gate", 0.2);
        let id = auto.id;
        repo.create(auto).await.unwrap();

        let updated = repo.update_critical_ratio(id, 0.9).await.unwrap().unwrap();
        assert!((updated.critical_ratio - 0.9).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn should_return_none_when_updating_unknown_id() {
        let (repo, _) = setup().await;
        let result = repo
            .update_critical_ratio(AutomationId::new(), 0.5)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_report_whether_delete_removed_a_row() {
        let (repo, env_id) = setup().await;
        let auto = automation(env_id, "gone soon", 0.5);
        let id = auto.id;
        repo.create(auto).await.unwrap();

        assert!(repo.delete(id).await.unwrap());
        assert!(!repo.delete(id).await.unwrap());
        assert!(repo.get_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_apply_criticality_assignments_in_one_batch() {
        let (repo, env_id) = setup().await;
        let a = automation(env_id, "a", 0.9);
        let b = automation(env_id, "b", 0.5);
        let (a_id, b_id) = (a.id, b.id);
        repo.create(a).await.unwrap();
        repo.create(b).await.unwrap();

        repo.apply_criticality(&[
            RankAssignment {
                id: a_id,
                criticality: 1,
            },
            RankAssignment {
                id: b_id,
                criticality: 2,
            },
        ])
        .await
        .unwrap();

        assert_eq!(repo.get_by_id(a_id).await.unwrap().unwrap().criticality, 1);
        assert_eq!(repo.get_by_id(b_id).await.unwrap().unwrap().criticality, 2);
    }

    #[tokio::test]
    async fn should_sort_listing_by_requested_column_and_direction() {
        let (repo, env_id) = setup().await;
        repo.create(automation(env_id, "alpha", 0.3)).await.unwrap();
        repo.create(automation(env_id, "bravo", 0.9)).await.unwrap();
        repo.create(automation(env_id, "charlie", 0.6))
            .await
            .unwrap();

        let query = ListQuery {
            sort_by: SortField::CriticalRatio,
            sort_direction: SortDirection::Desc,
            ..ListQuery::default()
        };
        let page = repo.list(&query).await.unwrap();

        let names: Vec<&str> = page.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["bravo", "charlie", "alpha"]);
    }

    #[tokio::test]
    async fn should_return_requested_page_only() {
        let (repo, env_id) = setup().await;
        for i in 0..25u32 {
            repo.create(automation(
                env_id,
                &format!("auto-{i:02}"),
                f64::from(i) / 25.0,
            ))
            .await
            .unwrap();
        }

        let query = ListQuery {
            sort_by: SortField::Name,
            sort_direction: SortDirection::Asc,
            page: 2,
            limit: 10,
        };
        let page = repo.list(&query).await.unwrap();

        let names: Vec<String> = page.iter().map(|a| a.name.clone()).collect();
        let expected: Vec<String> = (10..20).map(|i| format!("auto-{i:02}")).collect();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn should_filter_listing_by_environment() {
        let (repo, env_id) = setup().await;
        let environments = SqliteEnvironmentRepository::new(repo.pool.clone());
        let staging = environments
            .create(Environment::builder().name("staging").build().unwrap())
            .await
            .unwrap();

        repo.create(automation(env_id, "prod job", 0.9))
            .await
            .unwrap();
        repo.create(automation(staging.id, "stage job", 0.5))
            .await
            .unwrap();

        let page = repo
            .list_by_environment(staging.id, &ListQuery::default())
            .await
            .unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "stage job");
    }

    #[tokio::test]
    async fn should_return_empty_page_past_the_end() {
        let (repo, env_id) = setup().await;
        repo.create(automation(env_id, "only", 0.5)).await.unwrap();

        let query = ListQuery {
            page: 3,
            limit: 10,
            ..ListQuery::default()
        };
        let page = repo.list(&query).await.unwrap();
        assert!(page.is_empty());
    }
}
