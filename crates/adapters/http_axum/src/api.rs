//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod automations;
#[allow(clippy::missing_errors_doc)]
pub mod environments;

use axum::Router;
use axum::routing::{delete, get, patch};

use autorank_app::ports::{AutomationRepository, EnvironmentRepository};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<AR, ER>() -> Router<AppState<AR, ER>>
where
    AR: AutomationRepository + Send + Sync + 'static,
    ER: EnvironmentRepository + Send + Sync + 'static,
{
    Router::new()
        // Environments
        .route(
            "/environments",
            get(environments::list::<AR, ER>).post(environments::create::<AR, ER>),
        )
        .route("/environments/{id}", get(environments::get::<AR, ER>))
        // Automations
        .route(
            "/automations",
            get(automations::list::<AR, ER>).post(automations::create::<AR, ER>),
        )
        .route("/automations/find", get(automations::find::<AR, ER>))
        .route(
            "/automations/{id}/critical-ratio",
            patch(automations::update_critical_ratio::<AR, ER>),
        )
        .route("/automations/{id}", delete(automations::delete::<AR, ER>))
}
