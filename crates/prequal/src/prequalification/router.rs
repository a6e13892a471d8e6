use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Router,
};
use serde_json::json;

use super::domain::Decision;
use super::repository::PrequalificationRepository;
use super::service::{PrequalificationError, PrequalificationService};
use crate::directory::repository::DirectoryRepository;
use crate::ids::{CompanyId, ProjectId};

/// Router builder exposing matching and decision endpoints for a project.
pub fn prequalification_router<D, R>(service: Arc<PrequalificationService<D, R>>) -> Router
where
    D: DirectoryRepository + 'static,
    R: PrequalificationRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/projects/:project_id/matches",
            get(matches_handler::<D, R>),
        )
        .route(
            "/api/v1/projects/:project_id/candidates",
            get(candidates_handler::<D, R>),
        )
        .route(
            "/api/v1/projects/:project_id/prequalification",
            get(responses_handler::<D, R>),
        )
        .route(
            "/api/v1/projects/:project_id/prequalification/:contractor_id",
            put(decision_handler::<D, R>),
        )
        .with_state(service)
}

fn error_response(error: PrequalificationError) -> Response {
    let status = match &error {
        PrequalificationError::Repository(inner) => inner.status_code(),
        PrequalificationError::Transition(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn matches_handler<D, R>(
    State(service): State<Arc<PrequalificationService<D, R>>>,
    Path(project_id): Path<i64>,
) -> Response
where
    D: DirectoryRepository + 'static,
    R: PrequalificationRepository + 'static,
{
    match service.match_contractors(ProjectId(project_id)) {
        Ok(matches) => (StatusCode::OK, axum::Json(matches)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn candidates_handler<D, R>(
    State(service): State<Arc<PrequalificationService<D, R>>>,
    Path(project_id): Path<i64>,
) -> Response
where
    D: DirectoryRepository + 'static,
    R: PrequalificationRepository + 'static,
{
    match service.candidate_board(ProjectId(project_id)) {
        Ok(board) => (StatusCode::OK, axum::Json(board)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn responses_handler<D, R>(
    State(service): State<Arc<PrequalificationService<D, R>>>,
    Path(project_id): Path<i64>,
) -> Response
where
    D: DirectoryRepository + 'static,
    R: PrequalificationRepository + 'static,
{
    match service.list_for_project(ProjectId(project_id)) {
        Ok(responses) => (StatusCode::OK, axum::Json(responses)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn decision_handler<D, R>(
    State(service): State<Arc<PrequalificationService<D, R>>>,
    Path((project_id, contractor_id)): Path<(i64, i64)>,
    axum::Json(decision): axum::Json<Decision>,
) -> Response
where
    D: DirectoryRepository + 'static,
    R: PrequalificationRepository + 'static,
{
    match service.upsert(ProjectId(project_id), CompanyId(contractor_id), decision) {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(error) => error_response(error),
    }
}
