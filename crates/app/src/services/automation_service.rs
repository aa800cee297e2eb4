//! Automation service — use-cases for managing automations.
//!
//! Every mutation (create, update ratio, delete) runs the
//! [`RankingEngine`] to completion before returning, so a read that follows
//! a completed mutation always observes fully consistent ranks.
//!
//! ## Concurrency contract
//!
//! Mutation + recompute sequences are serialized behind a single async
//! mutex scoped to the automation collection. Without it, two interleaved
//! read-all/rank/write-back cycles could leave torn ranks. Reads take no
//! lock. If a recompute fails after its mutation committed, the mutation
//! stays committed and the error propagates; ranks may be stale until the
//! next successful recompute.

use std::sync::Arc;

use tokio::sync::Mutex;

use autorank_domain::automation::{self, Automation};
use autorank_domain::error::{AutorankError, NotFoundError};
use autorank_domain::id::AutomationId;
use autorank_domain::query::ListQuery;

use crate::ports::{AutomationRepository, EnvironmentRepository};
use crate::ranking_engine::RankingEngine;

/// Application service for automation CRUD plus inline reranking.
pub struct AutomationService<R, E> {
    repo: Arc<R>,
    environments: Arc<E>,
    engine: RankingEngine<R>,
    /// Serializes mutation + recompute sequences over the collection.
    write_lock: Mutex<()>,
}

impl<R, E> AutomationService<R, E>
where
    R: AutomationRepository,
    E: EnvironmentRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(repo: R, environments: E) -> Self {
        let repo = Arc::new(repo);
        Self {
            engine: RankingEngine::new(Arc::clone(&repo)),
            repo,
            environments: Arc::new(environments),
            write_lock: Mutex::new(()),
        }
    }

    /// Create an automation in the named environment, then rerank.
    ///
    /// The environment is resolved *before* anything is inserted: an
    /// unknown name leaves the collection untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AutorankError::NotFound`] when the environment does not
    /// exist, [`AutorankError::Validation`] if invariants fail, or a
    /// storage error from the repository or the recompute.
    #[tracing::instrument(skip(self))]
    pub async fn create_automation(
        &self,
        name: String,
        environment_name: &str,
        critical_ratio: f64,
    ) -> Result<Automation, AutorankError> {
        let environment = self
            .environments
            .get_by_name(environment_name)
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "Environment",
                id: environment_name.to_string(),
            })?;

        let automation = Automation::builder()
            .name(name)
            .environment_id(environment.id)
            .critical_ratio(critical_ratio)
            .build()?;

        let _guard = self.write_lock.lock().await;
        let created = self.repo.create(automation).await?;
        self.engine.recompute_criticality().await?;

        // Reload to expose the rank the recompute just assigned.
        Ok(self.repo.get_by_id(created.id).await?.unwrap_or(created))
    }

    /// Overwrite an automation's critical ratio, then rerank.
    ///
    /// # Errors
    ///
    /// Returns [`AutorankError::Validation`] when the ratio is outside
    /// `[0, 1]`, [`AutorankError::NotFound`] when the id is unknown (the
    /// collection is untouched and no recompute runs), or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn update_critical_ratio(
        &self,
        id: AutomationId,
        critical_ratio: f64,
    ) -> Result<Automation, AutorankError> {
        automation::validate_ratio(critical_ratio)?;

        let _guard = self.write_lock.lock().await;
        let updated = self
            .repo
            .update_critical_ratio(id, critical_ratio)
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "Automation",
                id: id.to_string(),
            })?;
        self.engine.recompute_criticality().await?;

        Ok(self.repo.get_by_id(id).await?.unwrap_or(updated))
    }

    /// Delete an automation, then rerank the remainder.
    ///
    /// # Errors
    ///
    /// Returns [`AutorankError::NotFound`] when the id is unknown (no
    /// recompute runs), or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn delete_automation(&self, id: AutomationId) -> Result<AutomationId, AutorankError> {
        let _guard = self.write_lock.lock().await;
        if !self.repo.delete(id).await? {
            return Err(NotFoundError {
                entity: "Automation",
                id: id.to_string(),
            }
            .into());
        }
        self.engine.recompute_criticality().await?;
        Ok(id)
    }

    /// List one page of automations.
    ///
    /// # Errors
    ///
    /// Returns [`AutorankError::Validation`] for zero page or limit, or a
    /// storage error propagated from the repository.
    pub async fn list_automations(&self, query: ListQuery) -> Result<Vec<Automation>, AutorankError> {
        query.validate()?;
        self.repo.list(&query).await
    }

    /// List one page of automations belonging to the named environment.
    ///
    /// # Errors
    ///
    /// Returns [`AutorankError::NotFound`] when the environment does not
    /// exist, [`AutorankError::Validation`] for zero page or limit, or a
    /// storage error propagated from the repository.
    pub async fn list_by_environment(
        &self,
        environment_name: &str,
        query: ListQuery,
    ) -> Result<Vec<Automation>, AutorankError> {
        query.validate()?;
        let environment = self
            .environments
            .get_by_name(environment_name)
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "Environment",
                id: environment_name.to_string(),
            })?;
        self.repo.list_by_environment(environment.id, &query).await
    }
}
