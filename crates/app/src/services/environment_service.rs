//! Environment service — use-cases for managing environments.
//!
//! Environments are immutable once created: there is no update or delete.
//! Automations reference them by id, so an environment can never be
//! orphaned out from under its automations.

use autorank_domain::environment::Environment;
use autorank_domain::error::{AutorankError, NotFoundError};
use autorank_domain::id::EnvironmentId;

use crate::ports::EnvironmentRepository;

/// Application service for environment operations.
pub struct EnvironmentService<E> {
    repo: E,
}

impl<E: EnvironmentRepository> EnvironmentService<E> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: E) -> Self {
        Self { repo }
    }

    /// Create a new environment after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AutorankError::Validation`] if invariants fail,
    /// [`AutorankError::Conflict`] when the name is already taken, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, environment), fields(environment_name = %environment.name))]
    pub async fn create_environment(
        &self,
        environment: Environment,
    ) -> Result<Environment, AutorankError> {
        environment.validate()?;
        self.repo.create(environment).await
    }

    /// Look up an environment by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`AutorankError::NotFound`] when no environment with `id`
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_environment(&self, id: EnvironmentId) -> Result<Environment, AutorankError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Environment",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Look up an environment by name, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`AutorankError::NotFound`] when no environment named `name`
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_environment_by_name(
        &self,
        name: &str,
    ) -> Result<Environment, AutorankError> {
        self.repo.get_by_name(name).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Environment",
                id: name.to_string(),
            }
            .into()
        })
    }

    /// List all environments.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_environments(&self) -> Result<Vec<Environment>, AutorankError> {
        self.repo.get_all().await
    }
}
