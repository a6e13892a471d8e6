use chrono::{DateTime, Utc};

use super::domain::{
    Capability, CapabilityProfile, Company, CompanyCapability, CompanyType, NewCapability,
    NewCompany, NewProject, NewRequirement, Project, ProjectRequirement,
};
use crate::ids::{CapabilityId, CompanyId, ProjectId};
use crate::repository::RepositoryError;

/// Storage for companies, capabilities, and the capability profiles linking them.
///
/// Each call is one unit of work: implementations commit or fail as a whole.
pub trait CatalogRepository: Send + Sync {
    fn insert_company(
        &self,
        company: NewCompany,
        created_at: DateTime<Utc>,
    ) -> Result<Company, RepositoryError>;
    fn fetch_company(&self, id: CompanyId) -> Result<Option<Company>, RepositoryError>;
    /// Companies ordered by name, optionally restricted to one role.
    fn list_companies(&self, filter: Option<CompanyType>) -> Result<Vec<Company>, RepositoryError>;
    /// Removes the company along with its profiles, projects, and responses.
    fn delete_company(&self, id: CompanyId) -> Result<(), RepositoryError>;

    fn insert_capability(&self, capability: NewCapability) -> Result<Capability, RepositoryError>;
    fn fetch_capability(&self, id: CapabilityId) -> Result<Option<Capability>, RepositoryError>;
    fn list_capabilities(&self) -> Result<Vec<Capability>, RepositoryError>;
    fn delete_capability(&self, id: CapabilityId) -> Result<(), RepositoryError>;

    /// Inserts the (company, capability) profile or overwrites the metrics of the existing row.
    fn upsert_company_capability(
        &self,
        company_id: CompanyId,
        capability_id: CapabilityId,
        profile: CapabilityProfile,
    ) -> Result<CompanyCapability, RepositoryError>;
    /// Profiles for one company, or every profile in the catalog when `company_id` is `None`.
    fn list_company_capabilities(
        &self,
        company_id: Option<CompanyId>,
    ) -> Result<Vec<CompanyCapability>, RepositoryError>;
}

/// Storage for projects and their capability requirements.
pub trait ProjectRepository: Send + Sync {
    fn insert_project(
        &self,
        project: NewProject,
        created_at: DateTime<Utc>,
    ) -> Result<Project, RepositoryError>;
    fn fetch_project(&self, id: ProjectId) -> Result<Option<Project>, RepositoryError>;
    /// Projects newest first, optionally restricted to one developer.
    fn list_projects(&self, developer: Option<CompanyId>) -> Result<Vec<Project>, RepositoryError>;
    /// Removes the project along with its requirements and responses.
    fn delete_project(&self, id: ProjectId) -> Result<(), RepositoryError>;

    fn insert_requirement(
        &self,
        project_id: ProjectId,
        requirement: NewRequirement,
    ) -> Result<ProjectRequirement, RepositoryError>;
    fn list_requirements(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<ProjectRequirement>, RepositoryError>;
}

/// Read/write access to the whole directory, as needed by the services.
pub trait DirectoryRepository: CatalogRepository + ProjectRepository {}

impl<T> DirectoryRepository for T where T: CatalogRepository + ProjectRepository {}
