//! JSON REST handlers for environments.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use autorank_app::ports::{AutomationRepository, EnvironmentRepository};
use autorank_domain::environment::Environment;
use autorank_domain::error::{AutorankError, ValidationError};
use autorank_domain::id::EnvironmentId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating an environment.
#[derive(Deserialize)]
pub struct CreateEnvironmentRequest {
    pub name: String,
    pub description: Option<String>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Environment>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Environment>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Environment>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/environments` — list all environments.
pub async fn list<AR, ER>(
    State(state): State<AppState<AR, ER>>,
) -> Result<ListResponse, ApiError>
where
    AR: AutomationRepository + Send + Sync + 'static,
    ER: EnvironmentRepository + Send + Sync + 'static,
{
    let environments = state.environment_service.list_environments().await?;
    Ok(ListResponse::Ok(Json(environments)))
}

/// `GET /api/environments/{id}` — get environment by ID.
pub async fn get<AR, ER>(
    State(state): State<AppState<AR, ER>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    AR: AutomationRepository + Send + Sync + 'static,
    ER: EnvironmentRepository + Send + Sync + 'static,
{
    let environment_id = EnvironmentId::from_str(&id)
        .map_err(|_| ApiError::from(AutorankError::from(ValidationError::InvalidId(id))))?;
    let environment = state
        .environment_service
        .get_environment(environment_id)
        .await?;
    Ok(GetResponse::Ok(Json(environment)))
}

/// `POST /api/environments` — create a new environment.
pub async fn create<AR, ER>(
    State(state): State<AppState<AR, ER>>,
    Json(req): Json<CreateEnvironmentRequest>,
) -> Result<CreateResponse, ApiError>
where
    AR: AutomationRepository + Send + Sync + 'static,
    ER: EnvironmentRepository + Send + Sync + 'static,
{
    let mut builder = Environment::builder().name(req.name);
    if let Some(description) = req.description {
        builder = builder.description(description);
    }
    let environment = builder.build()?;
    let created = state
        .environment_service
        .create_environment(environment)
        .await?;
    Ok(CreateResponse::Created(Json(created)))
}
