//! Environment repository port — persistence for environments.

use std::future::Future;

use autorank_domain::environment::Environment;
use autorank_domain::error::AutorankError;
use autorank_domain::id::EnvironmentId;

/// Repository for persisting and querying [`Environment`]s.
///
/// `name` uniqueness is enforced by the storage layer; creating a duplicate
/// fails with [`AutorankError::Conflict`].
pub trait EnvironmentRepository {
    /// Insert a new environment.
    fn create(
        &self,
        environment: Environment,
    ) -> impl Future<Output = Result<Environment, AutorankError>> + Send;

    /// Get an environment by its unique identifier.
    fn get_by_id(
        &self,
        id: EnvironmentId,
    ) -> impl Future<Output = Result<Option<Environment>, AutorankError>> + Send;

    /// Get an environment by its unique name.
    fn get_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Environment>, AutorankError>> + Send;

    /// Get all environments.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Environment>, AutorankError>> + Send;
}
