//! Ranking engine — recomputes criticality for the whole collection.
//!
//! Reranking is an explicit, named operation rather than a side effect
//! buried in the mutation handlers: [`RankingEngine::recompute_criticality`]
//! is what every mutating use-case invokes, and what tests exercise
//! directly.
//!
//! Each recompute reads the full automation set, ranks it, and rewrites
//! every `criticality` — O(N) work per mutation. That full-scan-per-write
//! policy is the dominant scalability bound of the whole system; it buys
//! strict read-after-write consistency while collections stay small.

use std::sync::Arc;

use autorank_domain::error::AutorankError;
use autorank_domain::rank;

use crate::ports::AutomationRepository;

/// Number of `(id, criticality)` assignments written per bulk update.
///
/// Bounds the size of a single write so a full-table rewrite never turns
/// into one unbounded statement or a long-lived lock.
const WRITE_BATCH_SIZE: usize = 500;

/// Recomputes and persists dense criticality ranks.
pub struct RankingEngine<R> {
    repo: Arc<R>,
}

impl<R: AutomationRepository> RankingEngine<R> {
    /// Create an engine over the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Recompute `criticality` for every automation and persist the result
    /// in bounded batches. Returns the number of automations ranked.
    ///
    /// Idempotent: running twice without an intervening mutation writes the
    /// same ranks both times.
    ///
    /// # Errors
    ///
    /// Propagates storage errors from the read or from any batch write.
    /// Batches commit independently: if one fails mid-sequence, prior
    /// batches stay applied and the collection is partially reranked until
    /// the next successful recompute overwrites it. The error always
    /// reaches the caller.
    #[tracing::instrument(skip(self))]
    pub async fn recompute_criticality(&self) -> Result<usize, AutorankError> {
        let automations = self.repo.get_all().await?;
        let assignments = rank::dense_ranks(&automations);

        for batch in assignments.chunks(WRITE_BATCH_SIZE) {
            self.repo.apply_criticality(batch).await?;
        }

        tracing::debug!(ranked = assignments.len(), "criticality recomputed");
        Ok(assignments.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autorank_domain::automation::Automation;
    use autorank_domain::id::{AutomationId, EnvironmentId};
    use autorank_domain::query::ListQuery;
    use autorank_domain::rank::RankAssignment;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;

    /// In-memory repository that also counts and optionally fails batch
    /// writes, to observe the engine's batching behaviour.
    struct RecordingRepo {
        store: Mutex<HashMap<AutomationId, Automation>>,
        batch_calls: Mutex<usize>,
        fail_from_batch: Option<usize>,
    }

    impl RecordingRepo {
        fn new(automations: Vec<Automation>) -> Self {
            Self {
                store: Mutex::new(automations.into_iter().map(|a| (a.id, a)).collect()),
                batch_calls: Mutex::new(0),
                fail_from_batch: None,
            }
        }

        fn failing_from(automations: Vec<Automation>, batch: usize) -> Self {
            Self {
                fail_from_batch: Some(batch),
                ..Self::new(automations)
            }
        }

        fn criticality_of(&self, id: AutomationId) -> u32 {
            self.store.lock().unwrap().get(&id).unwrap().criticality
        }
    }

    impl AutomationRepository for RecordingRepo {
        fn create(
            &self,
            automation: Automation,
        ) -> impl Future<Output = Result<Automation, AutorankError>> + Send {
            let mut store = self.store.lock().unwrap();
            store.insert(automation.id, automation.clone());
            async { Ok(automation) }
        }

        fn get_by_id(
            &self,
            id: AutomationId,
        ) -> impl Future<Output = Result<Option<Automation>, AutorankError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.get(&id).cloned();
            async { Ok(result) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Automation>, AutorankError>> + Send {
            let store = self.store.lock().unwrap();
            let result: Vec<Automation> = store.values().cloned().collect();
            async { Ok(result) }
        }

        fn list(
            &self,
            _query: &ListQuery,
        ) -> impl Future<Output = Result<Vec<Automation>, AutorankError>> + Send {
            async { Ok(vec![]) }
        }

        fn list_by_environment(
            &self,
            _environment_id: EnvironmentId,
            _query: &ListQuery,
        ) -> impl Future<Output = Result<Vec<Automation>, AutorankError>> + Send {
            async { Ok(vec![]) }
        }

        fn update_critical_ratio(
            &self,
            id: AutomationId,
            critical_ratio: f64,
        ) -> impl Future<Output = Result<Option<Automation>, AutorankError>> + Send {
            let mut store = self.store.lock().unwrap();
            let result = store.get_mut(&id).map(|automation| {
                automation.critical_ratio = critical_ratio;
                automation.clone()
            });
            async { Ok(result) }
        }

        fn delete(
            &self,
            id: AutomationId,
        ) -> impl Future<Output = Result<bool, AutorankError>> + Send {
            let mut store = self.store.lock().unwrap();
            let removed = store.remove(&id).is_some();
            async move { Ok(removed) }
        }

        fn apply_criticality(
            &self,
            assignments: &[RankAssignment],
        ) -> impl Future<Output = Result<(), AutorankError>> + Send {
            let mut calls = self.batch_calls.lock().unwrap();
            *calls += 1;
            let result = if self.fail_from_batch.is_some_and(|from| *calls >= from) {
                Err(AutorankError::Storage("injected batch failure".into()))
            } else {
                let mut store = self.store.lock().unwrap();
                for assignment in assignments {
                    if let Some(automation) = store.get_mut(&assignment.id) {
                        automation.criticality = assignment.criticality;
                    }
                }
                Ok(())
            };
            async move { result }
        }
    }

    fn automation(ratio: f64) -> Automation {
        Automation::builder()
            .name(format!("auto {ratio}"))
            .environment_id(EnvironmentId::new())
            .critical_ratio(ratio)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_assign_dense_ranks_across_the_collection() {
        let a = automation(0.9);
        let b = automation(0.9);
        let c = automation(0.5);
        let repo = Arc::new(RecordingRepo::new(vec![a.clone(), b.clone(), c.clone()]));
        let engine = RankingEngine::new(Arc::clone(&repo));

        let ranked = engine.recompute_criticality().await.unwrap();

        assert_eq!(ranked, 3);
        assert_eq!(repo.criticality_of(a.id), 1);
        assert_eq!(repo.criticality_of(b.id), 1);
        assert_eq!(repo.criticality_of(c.id), 2);
    }

    #[tokio::test]
    async fn should_be_idempotent_without_intervening_mutations() {
        let autos: Vec<Automation> = [0.3, 0.3, 0.8, 0.1].iter().map(|&r| automation(r)).collect();
        let ids: Vec<AutomationId> = autos.iter().map(|a| a.id).collect();
        let repo = Arc::new(RecordingRepo::new(autos));
        let engine = RankingEngine::new(Arc::clone(&repo));

        engine.recompute_criticality().await.unwrap();
        let first: Vec<u32> = ids.iter().map(|&id| repo.criticality_of(id)).collect();

        engine.recompute_criticality().await.unwrap();
        let second: Vec<u32> = ids.iter().map(|&id| repo.criticality_of(id)).collect();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn should_handle_empty_collection() {
        let repo = Arc::new(RecordingRepo::new(vec![]));
        let engine = RankingEngine::new(Arc::clone(&repo));

        let ranked = engine.recompute_criticality().await.unwrap();

        assert_eq!(ranked, 0);
        assert_eq!(*repo.batch_calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn should_split_large_collections_into_bounded_batches() {
        let count = WRITE_BATCH_SIZE * 2 + 100;
        #[allow(clippy::cast_precision_loss)]
        let autos: Vec<Automation> = (0..count)
            .map(|i| automation(i as f64 / count as f64))
            .collect();
        let last = autos.last().unwrap().id;
        let repo = Arc::new(RecordingRepo::new(autos));
        let engine = RankingEngine::new(Arc::clone(&repo));

        let ranked = engine.recompute_criticality().await.unwrap();

        assert_eq!(ranked, count);
        assert_eq!(*repo.batch_calls.lock().unwrap(), 3);
        // Highest ratio came last in the input.
        assert_eq!(repo.criticality_of(last), 1);
    }

    #[tokio::test]
    async fn should_surface_batch_failure_and_keep_prior_batches_applied() {
        let count = WRITE_BATCH_SIZE + 10;
        #[allow(clippy::cast_precision_loss)]
        let autos: Vec<Automation> = (0..count)
            .map(|i| automation(i as f64 / count as f64))
            .collect();
        let highest = autos.last().unwrap().id;
        let repo = Arc::new(RecordingRepo::failing_from(autos, 2));
        let engine = RankingEngine::new(Arc::clone(&repo));

        let result = engine.recompute_criticality().await;

        assert!(matches!(result, Err(AutorankError::Storage(_))));
        // The first batch carries the highest ratios and was committed.
        assert_eq!(repo.criticality_of(highest), 1);
    }
}
