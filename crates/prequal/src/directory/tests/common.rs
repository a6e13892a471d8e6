use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::directory::domain::{
    Capability, CapabilityProfile, Company, CompanyCapability, CompanyType, NewCapability,
    NewCompany, NewProject, NewRequirement, Project, ProjectRequirement,
};
use crate::directory::repository::{CatalogRepository, ProjectRepository};
use crate::directory::DirectoryService;
use crate::ids::{CapabilityId, CompanyId, ProjectId};
use crate::repository::RepositoryError;
use crate::store::MemoryStore;

pub(super) fn build_service() -> (DirectoryService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let service = DirectoryService::new(store.clone());
    (service, store)
}

pub(super) fn developer(name: &str) -> NewCompany {
    let mut company = NewCompany::new(name, CompanyType::Developer);
    company.country = Some("Egypt".to_string());
    company.city = Some("New Cairo".to_string());
    company
}

pub(super) fn contractor(name: &str) -> NewCompany {
    let mut company = NewCompany::new(name, CompanyType::Contractor);
    company.country = Some("Egypt".to_string());
    company
}

pub(super) fn capability(name: &str) -> NewCapability {
    NewCapability {
        name: name.to_string(),
        description: None,
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn offline<T>() -> Result<T, RepositoryError> {
    Err(RepositoryError::Unavailable("database offline".to_string()))
}

pub(super) struct UnavailableDirectory;

impl CatalogRepository for UnavailableDirectory {
    fn insert_company(
        &self,
        _company: NewCompany,
        _created_at: DateTime<Utc>,
    ) -> Result<Company, RepositoryError> {
        offline()
    }

    fn fetch_company(&self, _id: CompanyId) -> Result<Option<Company>, RepositoryError> {
        offline()
    }

    fn list_companies(
        &self,
        _filter: Option<CompanyType>,
    ) -> Result<Vec<Company>, RepositoryError> {
        offline()
    }

    fn delete_company(&self, _id: CompanyId) -> Result<(), RepositoryError> {
        offline()
    }

    fn insert_capability(&self, _capability: NewCapability) -> Result<Capability, RepositoryError> {
        offline()
    }

    fn fetch_capability(&self, _id: CapabilityId) -> Result<Option<Capability>, RepositoryError> {
        offline()
    }

    fn list_capabilities(&self) -> Result<Vec<Capability>, RepositoryError> {
        offline()
    }

    fn delete_capability(&self, _id: CapabilityId) -> Result<(), RepositoryError> {
        offline()
    }

    fn upsert_company_capability(
        &self,
        _company_id: CompanyId,
        _capability_id: CapabilityId,
        _profile: CapabilityProfile,
    ) -> Result<CompanyCapability, RepositoryError> {
        offline()
    }

    fn list_company_capabilities(
        &self,
        _company_id: Option<CompanyId>,
    ) -> Result<Vec<CompanyCapability>, RepositoryError> {
        offline()
    }
}

impl ProjectRepository for UnavailableDirectory {
    fn insert_project(
        &self,
        _project: NewProject,
        _created_at: DateTime<Utc>,
    ) -> Result<Project, RepositoryError> {
        offline()
    }

    fn fetch_project(&self, _id: ProjectId) -> Result<Option<Project>, RepositoryError> {
        offline()
    }

    fn list_projects(&self, _developer: Option<CompanyId>) -> Result<Vec<Project>, RepositoryError> {
        offline()
    }

    fn delete_project(&self, _id: ProjectId) -> Result<(), RepositoryError> {
        offline()
    }

    fn insert_requirement(
        &self,
        _project_id: ProjectId,
        _requirement: NewRequirement,
    ) -> Result<ProjectRequirement, RepositoryError> {
        offline()
    }

    fn list_requirements(
        &self,
        _project_id: ProjectId,
    ) -> Result<Vec<ProjectRequirement>, RepositoryError> {
        offline()
    }
}
