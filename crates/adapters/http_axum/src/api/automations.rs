//! JSON REST handlers for automations.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use autorank_app::ports::{AutomationRepository, EnvironmentRepository};
use autorank_domain::automation::Automation;
use autorank_domain::error::{AutorankError, ValidationError};
use autorank_domain::id::AutomationId;
use autorank_domain::query::{ListQuery, SortDirection, SortField};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating an automation.
#[derive(Deserialize)]
pub struct CreateAutomationRequest {
    pub name: String,
    pub environment_name: String,
    pub critical_ratio: f64,
}

/// Request body for updating an automation's critical ratio.
#[derive(Deserialize)]
pub struct UpdateCriticalRatioRequest {
    pub critical_ratio: f64,
}

/// Sorting and pagination query parameters. Every field is optional and
/// falls back to the domain defaults (criticality ascending, first page
/// of ten).
#[derive(Deserialize)]
pub struct ListParams {
    pub sort_by: Option<SortField>,
    pub sort_direction: Option<SortDirection>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListParams {
    fn into_query(self) -> ListQuery {
        let defaults = ListQuery::default();
        ListQuery {
            sort_by: self.sort_by.unwrap_or(defaults.sort_by),
            sort_direction: self.sort_direction.unwrap_or(defaults.sort_direction),
            page: self.page.unwrap_or(defaults.page),
            limit: self.limit.unwrap_or(defaults.limit),
        }
    }
}

/// Query parameters for the environment-filtered listing.
///
/// Kept flat (no `serde(flatten)`): the urlencoded deserializer cannot
/// flatten non-string primitives.
#[derive(Deserialize)]
pub struct FindParams {
    pub environment_name: String,
    pub sort_by: Option<SortField>,
    pub sort_direction: Option<SortDirection>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl FindParams {
    fn into_query(self) -> (String, ListQuery) {
        let list = ListParams {
            sort_by: self.sort_by,
            sort_direction: self.sort_direction,
            page: self.page,
            limit: self.limit,
        };
        (self.environment_name, list.into_query())
    }
}

fn parse_id(id: &str) -> Result<AutomationId, ApiError> {
    AutomationId::from_str(id)
        .map_err(|_| ApiError::from(AutorankError::from(ValidationError::InvalidId(id.to_string()))))
}

/// Possible responses from the list endpoints.
pub enum ListResponse {
    Ok(Json<Vec<Automation>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Automation>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the critical-ratio update endpoint.
pub enum UpdateResponse {
    Ok(Json<Automation>),
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/automations` — list one page of automations.
pub async fn list<AR, ER>(
    State(state): State<AppState<AR, ER>>,
    Query(params): Query<ListParams>,
) -> Result<ListResponse, ApiError>
where
    AR: AutomationRepository + Send + Sync + 'static,
    ER: EnvironmentRepository + Send + Sync + 'static,
{
    let automations = state
        .automation_service
        .list_automations(params.into_query())
        .await?;
    Ok(ListResponse::Ok(Json(automations)))
}

/// `GET /api/automations/find` — list automations in one environment.
pub async fn find<AR, ER>(
    State(state): State<AppState<AR, ER>>,
    Query(params): Query<FindParams>,
) -> Result<ListResponse, ApiError>
where
    AR: AutomationRepository + Send + Sync + 'static,
    ER: EnvironmentRepository + Send + Sync + 'static,
{
    let (environment_name, query) = params.into_query();
    let automations = state
        .automation_service
        .list_by_environment(&environment_name, query)
        .await?;
    Ok(ListResponse::Ok(Json(automations)))
}

/// `POST /api/automations` — create a new automation and rerank.
pub async fn create<AR, ER>(
    State(state): State<AppState<AR, ER>>,
    Json(req): Json<CreateAutomationRequest>,
) -> Result<CreateResponse, ApiError>
where
    AR: AutomationRepository + Send + Sync + 'static,
    ER: EnvironmentRepository + Send + Sync + 'static,
{
    let created = state
        .automation_service
        .create_automation(req.name, &req.environment_name, req.critical_ratio)
        .await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PATCH /api/automations/{id}/critical-ratio` — update the ratio and rerank.
pub async fn update_critical_ratio<AR, ER>(
    State(state): State<AppState<AR, ER>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCriticalRatioRequest>,
) -> Result<UpdateResponse, ApiError>
where
    AR: AutomationRepository + Send + Sync + 'static,
    ER: EnvironmentRepository + Send + Sync + 'static,
{
    let automation_id = parse_id(&id)?;
    let updated = state
        .automation_service
        .update_critical_ratio(automation_id, req.critical_ratio)
        .await?;
    Ok(UpdateResponse::Ok(Json(updated)))
}

/// `DELETE /api/automations/{id}` — delete an automation and rerank.
pub async fn delete<AR, ER>(
    State(state): State<AppState<AR, ER>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    AR: AutomationRepository + Send + Sync + 'static,
    ER: EnvironmentRepository + Send + Sync + 'static,
{
    let automation_id = parse_id(&id)?;
    state
        .automation_service
        .delete_automation(automation_id)
        .await?;
    Ok(DeleteResponse::NoContent)
}
