//! Automation repository port — persistence for automations.

use std::future::Future;

use autorank_domain::automation::Automation;
use autorank_domain::error::AutorankError;
use autorank_domain::id::{AutomationId, EnvironmentId};
use autorank_domain::query::ListQuery;
use autorank_domain::rank::RankAssignment;

/// Repository for persisting and querying [`Automation`]s.
pub trait AutomationRepository {
    /// Insert a new automation.
    fn create(
        &self,
        automation: Automation,
    ) -> impl Future<Output = Result<Automation, AutorankError>> + Send;

    /// Get an automation by its unique identifier.
    fn get_by_id(
        &self,
        id: AutomationId,
    ) -> impl Future<Output = Result<Option<Automation>, AutorankError>> + Send;

    /// Get every automation, in no particular order. Feeds the ranking
    /// engine's full recompute.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Automation>, AutorankError>> + Send;

    /// Get one page of automations, sorted per the query.
    fn list(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<Vec<Automation>, AutorankError>> + Send;

    /// Get one page of automations belonging to the given environment.
    fn list_by_environment(
        &self,
        environment_id: EnvironmentId,
        query: &ListQuery,
    ) -> impl Future<Output = Result<Vec<Automation>, AutorankError>> + Send;

    /// Overwrite the critical ratio of an existing automation.
    ///
    /// Returns `None` when no automation with `id` exists; the collection
    /// is untouched in that case.
    fn update_critical_ratio(
        &self,
        id: AutomationId,
        critical_ratio: f64,
    ) -> impl Future<Output = Result<Option<Automation>, AutorankError>> + Send;

    /// Delete an automation. Returns whether a record was removed.
    fn delete(
        &self,
        id: AutomationId,
    ) -> impl Future<Output = Result<bool, AutorankError>> + Send;

    /// Persist one batch of `(id, criticality)` assignments as a single
    /// bulk write. Each call commits independently of the others.
    fn apply_criticality(
        &self,
        assignments: &[RankAssignment],
    ) -> impl Future<Output = Result<(), AutorankError>> + Send;
}
