use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{
    Capability, CapabilityProfile, Company, CompanyCapability, CompanyType, NewCapability,
    NewCompany, NewProject, NewRequirement, Project, ProjectRequirement,
};
use super::repository::DirectoryRepository;
use crate::ids::{CapabilityId, CompanyId, ProjectId};
use crate::repository::RepositoryError;

/// Record creation and listing for the catalog and project stores.
pub struct DirectoryService<D> {
    repository: Arc<D>,
}

impl<D> DirectoryService<D>
where
    D: DirectoryRepository + 'static,
{
    pub fn new(repository: Arc<D>) -> Self {
        Self { repository }
    }

    pub fn create_company(&self, company: NewCompany) -> Result<Company, DirectoryError> {
        let company = self.repository.insert_company(company, Utc::now())?;
        info!(company_id = %company.id, role = company.company_type.label(), "company created");
        Ok(company)
    }

    pub fn list_companies(
        &self,
        filter: Option<CompanyType>,
    ) -> Result<Vec<Company>, DirectoryError> {
        Ok(self.repository.list_companies(filter)?)
    }

    pub fn get_company(&self, id: CompanyId) -> Result<Company, DirectoryError> {
        let company = self
            .repository
            .fetch_company(id)?
            .ok_or(RepositoryError::not_found("company", id.0))?;
        Ok(company)
    }

    pub fn delete_company(&self, id: CompanyId) -> Result<(), DirectoryError> {
        self.repository.delete_company(id)?;
        info!(company_id = %id, "company deleted");
        Ok(())
    }

    pub fn create_capability(&self, capability: NewCapability) -> Result<Capability, DirectoryError> {
        let capability = self.repository.insert_capability(capability)?;
        info!(capability_id = %capability.id, name = %capability.name, "capability created");
        Ok(capability)
    }

    pub fn list_capabilities(&self) -> Result<Vec<Capability>, DirectoryError> {
        Ok(self.repository.list_capabilities()?)
    }

    pub fn delete_capability(&self, id: CapabilityId) -> Result<(), DirectoryError> {
        self.repository.delete_capability(id)?;
        info!(capability_id = %id, "capability deleted");
        Ok(())
    }

    /// Add a capability to a company, or overwrite the metrics of the existing profile.
    pub fn save_company_capability(
        &self,
        company_id: CompanyId,
        capability_id: CapabilityId,
        profile: CapabilityProfile,
    ) -> Result<CompanyCapability, DirectoryError> {
        let link = self
            .repository
            .upsert_company_capability(company_id, capability_id, profile)?;
        info!(
            company_id = %company_id,
            capability_id = %capability_id,
            link_id = %link.id,
            "capability profile saved"
        );
        Ok(link)
    }

    pub fn list_company_capabilities(
        &self,
        company_id: CompanyId,
    ) -> Result<Vec<CompanyCapability>, DirectoryError> {
        Ok(self.repository.list_company_capabilities(Some(company_id))?)
    }

    /// Create a project after confirming the referenced company is a developer.
    pub fn create_project(&self, project: NewProject) -> Result<Project, DirectoryError> {
        let developer_id = project.developer_company_id;
        let developer = self
            .repository
            .fetch_company(developer_id)?
            .ok_or(RepositoryError::not_found("company", developer_id.0))?;

        if developer.company_type != CompanyType::Developer {
            return Err(DirectoryError::RoleMismatch {
                company_id: developer_id,
                expected: CompanyType::Developer,
                actual: developer.company_type,
            });
        }

        let project = self.repository.insert_project(project, Utc::now())?;
        info!(project_id = %project.id, developer_id = %developer_id, "project created");
        Ok(project)
    }

    pub fn list_projects(
        &self,
        developer: Option<CompanyId>,
    ) -> Result<Vec<Project>, DirectoryError> {
        Ok(self.repository.list_projects(developer)?)
    }

    pub fn get_project(&self, id: ProjectId) -> Result<Project, DirectoryError> {
        let project = self
            .repository
            .fetch_project(id)?
            .ok_or(RepositoryError::not_found("project", id.0))?;
        Ok(project)
    }

    pub fn delete_project(&self, id: ProjectId) -> Result<(), DirectoryError> {
        self.repository.delete_project(id)?;
        info!(project_id = %id, "project deleted");
        Ok(())
    }

    pub fn add_requirement(
        &self,
        project_id: ProjectId,
        requirement: NewRequirement,
    ) -> Result<ProjectRequirement, DirectoryError> {
        let requirement = self.repository.insert_requirement(project_id, requirement)?;
        info!(
            project_id = %project_id,
            requirement_id = %requirement.id,
            capability_id = %requirement.capability_id,
            "requirement added"
        );
        Ok(requirement)
    }

    pub fn list_requirements(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<ProjectRequirement>, DirectoryError> {
        Ok(self.repository.list_requirements(project_id)?)
    }
}

/// Error raised by the directory service.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("company {company_id} is a {} but must be a {}", .actual.label(), .expected.label())]
    RoleMismatch {
        company_id: CompanyId,
        expected: CompanyType,
        actual: CompanyType,
    },
}
