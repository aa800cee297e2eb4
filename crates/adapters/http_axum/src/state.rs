//! Shared application state for axum handlers.

use std::sync::Arc;

use autorank_app::ports::{AutomationRepository, EnvironmentRepository};
use autorank_app::services::automation_service::AutomationService;
use autorank_app::services::environment_service::EnvironmentService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository types to avoid dynamic dispatch. `Clone` is
/// implemented manually so the underlying types themselves do not need to
/// be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<AR, ER> {
    /// Automation CRUD + reranking service.
    pub automation_service: Arc<AutomationService<AR, ER>>,
    /// Environment CRUD service.
    pub environment_service: Arc<EnvironmentService<ER>>,
}

impl<AR, ER> Clone for AppState<AR, ER> {
    fn clone(&self) -> Self {
        Self {
            automation_service: Arc::clone(&self.automation_service),
            environment_service: Arc::clone(&self.environment_service),
        }
    }
}

impl<AR, ER> AppState<AR, ER>
where
    AR: AutomationRepository + Send + Sync + 'static,
    ER: EnvironmentRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        automation_service: AutomationService<AR, ER>,
        environment_service: EnvironmentService<ER>,
    ) -> Self {
        Self {
            automation_service: Arc::new(automation_service),
            environment_service: Arc::new(environment_service),
        }
    }
}
