use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{
    CapabilityProfile, CompanyType, NewCapability, NewCompany, NewProject, NewRequirement,
};
use super::repository::DirectoryRepository;
use super::service::{DirectoryError, DirectoryService};
use crate::ids::{CapabilityId, CompanyId, ProjectId};

type SharedDirectory<D> = State<Arc<DirectoryService<D>>>;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CompanyListQuery {
    #[serde(default, rename = "type")]
    pub(crate) company_type: Option<CompanyType>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProjectListQuery {
    #[serde(default)]
    pub(crate) developer_id: Option<i64>,
}

/// Router builder exposing the catalog and project record endpoints.
pub fn directory_router<D>(service: Arc<DirectoryService<D>>) -> Router
where
    D: DirectoryRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/companies",
            get(list_companies_handler::<D>).post(create_company_handler::<D>),
        )
        .route(
            "/api/v1/companies/:company_id",
            get(company_handler::<D>).delete(delete_company_handler::<D>),
        )
        .route(
            "/api/v1/companies/:company_id/capabilities",
            get(company_capabilities_handler::<D>),
        )
        .route(
            "/api/v1/companies/:company_id/capabilities/:capability_id",
            put(save_company_capability_handler::<D>),
        )
        .route(
            "/api/v1/capabilities",
            get(list_capabilities_handler::<D>).post(create_capability_handler::<D>),
        )
        .route(
            "/api/v1/capabilities/:capability_id",
            axum::routing::delete(delete_capability_handler::<D>),
        )
        .route(
            "/api/v1/projects",
            get(list_projects_handler::<D>).post(create_project_handler::<D>),
        )
        .route(
            "/api/v1/projects/:project_id",
            get(project_handler::<D>).delete(delete_project_handler::<D>),
        )
        .route(
            "/api/v1/projects/:project_id/requirements",
            get(list_requirements_handler::<D>).post(add_requirement_handler::<D>),
        )
        .with_state(service)
}

pub(crate) fn error_response(error: DirectoryError) -> Response {
    let status = match &error {
        DirectoryError::Repository(inner) => inner.status_code(),
        DirectoryError::RoleMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

fn respond<T: serde::Serialize>(
    status: StatusCode,
    result: Result<T, DirectoryError>,
) -> Response {
    match result {
        Ok(body) => (status, axum::Json(body)).into_response(),
        Err(error) => error_response(error),
    }
}

fn respond_empty(result: Result<(), DirectoryError>) -> Response {
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_company_handler<D>(
    State(service): SharedDirectory<D>,
    axum::Json(company): axum::Json<NewCompany>,
) -> Response
where
    D: DirectoryRepository + 'static,
{
    respond(StatusCode::CREATED, service.create_company(company))
}

pub(crate) async fn list_companies_handler<D>(
    State(service): SharedDirectory<D>,
    Query(query): Query<CompanyListQuery>,
) -> Response
where
    D: DirectoryRepository + 'static,
{
    respond(StatusCode::OK, service.list_companies(query.company_type))
}

pub(crate) async fn company_handler<D>(
    State(service): SharedDirectory<D>,
    Path(company_id): Path<i64>,
) -> Response
where
    D: DirectoryRepository + 'static,
{
    respond(StatusCode::OK, service.get_company(CompanyId(company_id)))
}

pub(crate) async fn delete_company_handler<D>(
    State(service): SharedDirectory<D>,
    Path(company_id): Path<i64>,
) -> Response
where
    D: DirectoryRepository + 'static,
{
    respond_empty(service.delete_company(CompanyId(company_id)))
}

pub(crate) async fn company_capabilities_handler<D>(
    State(service): SharedDirectory<D>,
    Path(company_id): Path<i64>,
) -> Response
where
    D: DirectoryRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.list_company_capabilities(CompanyId(company_id)),
    )
}

pub(crate) async fn save_company_capability_handler<D>(
    State(service): SharedDirectory<D>,
    Path((company_id, capability_id)): Path<(i64, i64)>,
    axum::Json(profile): axum::Json<CapabilityProfile>,
) -> Response
where
    D: DirectoryRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.save_company_capability(
            CompanyId(company_id),
            CapabilityId(capability_id),
            profile,
        ),
    )
}

pub(crate) async fn create_capability_handler<D>(
    State(service): SharedDirectory<D>,
    axum::Json(capability): axum::Json<NewCapability>,
) -> Response
where
    D: DirectoryRepository + 'static,
{
    respond(StatusCode::CREATED, service.create_capability(capability))
}

pub(crate) async fn list_capabilities_handler<D>(State(service): SharedDirectory<D>) -> Response
where
    D: DirectoryRepository + 'static,
{
    respond(StatusCode::OK, service.list_capabilities())
}

pub(crate) async fn delete_capability_handler<D>(
    State(service): SharedDirectory<D>,
    Path(capability_id): Path<i64>,
) -> Response
where
    D: DirectoryRepository + 'static,
{
    respond_empty(service.delete_capability(CapabilityId(capability_id)))
}

pub(crate) async fn create_project_handler<D>(
    State(service): SharedDirectory<D>,
    axum::Json(project): axum::Json<NewProject>,
) -> Response
where
    D: DirectoryRepository + 'static,
{
    respond(StatusCode::CREATED, service.create_project(project))
}

pub(crate) async fn list_projects_handler<D>(
    State(service): SharedDirectory<D>,
    Query(query): Query<ProjectListQuery>,
) -> Response
where
    D: DirectoryRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.list_projects(query.developer_id.map(CompanyId)),
    )
}

pub(crate) async fn project_handler<D>(
    State(service): SharedDirectory<D>,
    Path(project_id): Path<i64>,
) -> Response
where
    D: DirectoryRepository + 'static,
{
    respond(StatusCode::OK, service.get_project(ProjectId(project_id)))
}

pub(crate) async fn delete_project_handler<D>(
    State(service): SharedDirectory<D>,
    Path(project_id): Path<i64>,
) -> Response
where
    D: DirectoryRepository + 'static,
{
    respond_empty(service.delete_project(ProjectId(project_id)))
}

pub(crate) async fn add_requirement_handler<D>(
    State(service): SharedDirectory<D>,
    Path(project_id): Path<i64>,
    axum::Json(requirement): axum::Json<NewRequirement>,
) -> Response
where
    D: DirectoryRepository + 'static,
{
    respond(
        StatusCode::CREATED,
        service.add_requirement(ProjectId(project_id), requirement),
    )
}

pub(crate) async fn list_requirements_handler<D>(
    State(service): SharedDirectory<D>,
    Path(project_id): Path<i64>,
) -> Response
where
    D: DirectoryRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.list_requirements(ProjectId(project_id)),
    )
}
