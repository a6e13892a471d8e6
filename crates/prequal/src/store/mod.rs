//! In-memory relational store backing every repository trait in the crate.
//!
//! All tables sit behind one mutex. A repository call acquires it once, validates, mutates,
//! and releases it on return, so each call commits atomically and a failed call leaves the
//! tables untouched.

pub mod seed;

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::directory::domain::{
    Capability, CapabilityProfile, Company, CompanyCapability, CompanyType, NewCapability,
    NewCompany, NewProject, NewRequirement, Project, ProjectRequirement,
};
use crate::directory::repository::{CatalogRepository, ProjectRepository};
use crate::ids::{
    CapabilityId, CompanyCapabilityId, CompanyId, ProjectId, RequirementId, ResponseId,
};
use crate::prequalification::domain::{NewResponse, PrequalificationResponse};
use crate::prequalification::repository::PrequalificationRepository;
use crate::repository::RepositoryError;

pub use seed::{SeedDocument, SeedError, SeedSummary};

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    sequences: Sequences,
    companies: BTreeMap<CompanyId, Company>,
    capabilities: BTreeMap<CapabilityId, Capability>,
    company_capabilities: BTreeMap<CompanyCapabilityId, CompanyCapability>,
    projects: BTreeMap<ProjectId, Project>,
    requirements: BTreeMap<RequirementId, ProjectRequirement>,
    responses: BTreeMap<ResponseId, PrequalificationResponse>,
}

#[derive(Debug, Default)]
struct Sequences {
    company: i64,
    capability: i64,
    company_capability: i64,
    project: i64,
    requirement: i64,
    response: i64,
}

fn next(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn unit_of_work<T>(
        &self,
        work: impl FnOnce(&mut Tables) -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        let mut tables = self.lock()?;
        work(&mut tables)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store lock poisoned".to_string()))
    }
}

impl Tables {
    fn require_company(&self, relation: &'static str, id: CompanyId) -> Result<(), RepositoryError> {
        if self.companies.contains_key(&id) {
            Ok(())
        } else {
            Err(RepositoryError::ForeignKey {
                relation,
                entity: "company",
                id: id.0,
            })
        }
    }

    fn require_capability(
        &self,
        relation: &'static str,
        id: CapabilityId,
    ) -> Result<(), RepositoryError> {
        if self.capabilities.contains_key(&id) {
            Ok(())
        } else {
            Err(RepositoryError::ForeignKey {
                relation,
                entity: "capability",
                id: id.0,
            })
        }
    }

    fn require_project(&self, relation: &'static str, id: ProjectId) -> Result<(), RepositoryError> {
        if self.projects.contains_key(&id) {
            Ok(())
        } else {
            Err(RepositoryError::ForeignKey {
                relation,
                entity: "project",
                id: id.0,
            })
        }
    }

    fn remove_project_cascade(&mut self, id: ProjectId) {
        self.projects.remove(&id);
        self.requirements
            .retain(|_, requirement| requirement.project_id != id);
        self.responses.retain(|_, response| response.project_id != id);
    }
}

impl CatalogRepository for MemoryStore {
    fn insert_company(
        &self,
        company: NewCompany,
        created_at: DateTime<Utc>,
    ) -> Result<Company, RepositoryError> {
        self.unit_of_work(|tables| {
            if tables.companies.values().any(|row| row.name == company.name) {
                return Err(RepositoryError::Conflict {
                    entity: "company",
                    detail: format!("name '{}' is taken", company.name),
                });
            }

            let id = CompanyId(next(&mut tables.sequences.company));
            let row = Company {
                id,
                name: company.name,
                company_type: company.company_type,
                country: company.country,
                city: company.city,
                website: company.website,
                description: company.description,
                size_category: company.size_category,
                created_at,
            };
            tables.companies.insert(id, row.clone());
            Ok(row)
        })
    }

    fn fetch_company(&self, id: CompanyId) -> Result<Option<Company>, RepositoryError> {
        self.unit_of_work(|tables| Ok(tables.companies.get(&id).cloned()))
    }

    fn list_companies(&self, filter: Option<CompanyType>) -> Result<Vec<Company>, RepositoryError> {
        self.unit_of_work(|tables| {
            let mut companies: Vec<Company> = tables
                .companies
                .values()
                .filter(|company| filter.map_or(true, |role| company.company_type == role))
                .cloned()
                .collect();
            companies.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
            Ok(companies)
        })
    }

    fn delete_company(&self, id: CompanyId) -> Result<(), RepositoryError> {
        self.unit_of_work(|tables| {
            if tables.companies.remove(&id).is_none() {
                return Err(RepositoryError::not_found("company", id.0));
            }

            tables
                .company_capabilities
                .retain(|_, link| link.company_id != id);

            let owned: Vec<ProjectId> = tables
                .projects
                .values()
                .filter(|project| project.developer_company_id == id)
                .map(|project| project.id)
                .collect();
            for project_id in owned {
                tables.remove_project_cascade(project_id);
            }

            tables
                .responses
                .retain(|_, response| response.contractor_company_id != id);
            Ok(())
        })
    }

    fn insert_capability(&self, capability: NewCapability) -> Result<Capability, RepositoryError> {
        self.unit_of_work(|tables| {
            if tables
                .capabilities
                .values()
                .any(|row| row.name == capability.name)
            {
                return Err(RepositoryError::Conflict {
                    entity: "capability",
                    detail: format!("name '{}' is taken", capability.name),
                });
            }

            let id = CapabilityId(next(&mut tables.sequences.capability));
            let row = Capability {
                id,
                name: capability.name,
                description: capability.description,
            };
            tables.capabilities.insert(id, row.clone());
            Ok(row)
        })
    }

    fn fetch_capability(&self, id: CapabilityId) -> Result<Option<Capability>, RepositoryError> {
        self.unit_of_work(|tables| Ok(tables.capabilities.get(&id).cloned()))
    }

    fn list_capabilities(&self) -> Result<Vec<Capability>, RepositoryError> {
        self.unit_of_work(|tables| {
            let mut capabilities: Vec<Capability> =
                tables.capabilities.values().cloned().collect();
            capabilities.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
            Ok(capabilities)
        })
    }

    fn delete_capability(&self, id: CapabilityId) -> Result<(), RepositoryError> {
        self.unit_of_work(|tables| {
            if tables.capabilities.remove(&id).is_none() {
                return Err(RepositoryError::not_found("capability", id.0));
            }
            tables
                .company_capabilities
                .retain(|_, link| link.capability_id != id);
            tables
                .requirements
                .retain(|_, requirement| requirement.capability_id != id);
            Ok(())
        })
    }

    fn upsert_company_capability(
        &self,
        company_id: CompanyId,
        capability_id: CapabilityId,
        profile: CapabilityProfile,
    ) -> Result<CompanyCapability, RepositoryError> {
        self.unit_of_work(|tables| {
            tables.require_company("company_capability", company_id)?;
            tables.require_capability("company_capability", capability_id)?;

            if let Some(link) = tables
                .company_capabilities
                .values_mut()
                .find(|link| link.company_id == company_id && link.capability_id == capability_id)
            {
                link.apply_profile(profile);
                return Ok(link.clone());
            }

            let id = CompanyCapabilityId(next(&mut tables.sequences.company_capability));
            let mut link = CompanyCapability {
                id,
                company_id,
                capability_id,
                experience_years: None,
                typical_project_size_m2: None,
                typical_contract_value_million: None,
            };
            link.apply_profile(profile);
            tables.company_capabilities.insert(id, link.clone());
            Ok(link)
        })
    }

    fn list_company_capabilities(
        &self,
        company_id: Option<CompanyId>,
    ) -> Result<Vec<CompanyCapability>, RepositoryError> {
        self.unit_of_work(|tables| {
            Ok(tables
                .company_capabilities
                .values()
                .filter(|link| company_id.map_or(true, |id| link.company_id == id))
                .cloned()
                .collect())
        })
    }
}

impl ProjectRepository for MemoryStore {
    fn insert_project(
        &self,
        project: NewProject,
        created_at: DateTime<Utc>,
    ) -> Result<Project, RepositoryError> {
        self.unit_of_work(|tables| {
            tables.require_company("project", project.developer_company_id)?;

            let id = ProjectId(next(&mut tables.sequences.project));
            let row = Project {
                id,
                developer_company_id: project.developer_company_id,
                name: project.name,
                location: project.location,
                project_type: project.project_type,
                description: project.description,
                built_up_area_m2: project.built_up_area_m2,
                estimated_budget_million: project.estimated_budget_million,
                status: project.status,
                created_at,
            };
            tables.projects.insert(id, row.clone());
            Ok(row)
        })
    }

    fn fetch_project(&self, id: ProjectId) -> Result<Option<Project>, RepositoryError> {
        self.unit_of_work(|tables| Ok(tables.projects.get(&id).cloned()))
    }

    fn list_projects(&self, developer: Option<CompanyId>) -> Result<Vec<Project>, RepositoryError> {
        self.unit_of_work(|tables| {
            let mut projects: Vec<Project> = tables
                .projects
                .values()
                .filter(|project| developer.map_or(true, |id| project.developer_company_id == id))
                .cloned()
                .collect();
            projects.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then(b.id.cmp(&a.id))
            });
            Ok(projects)
        })
    }

    fn delete_project(&self, id: ProjectId) -> Result<(), RepositoryError> {
        self.unit_of_work(|tables| {
            if !tables.projects.contains_key(&id) {
                return Err(RepositoryError::not_found("project", id.0));
            }
            tables.remove_project_cascade(id);
            Ok(())
        })
    }

    fn insert_requirement(
        &self,
        project_id: ProjectId,
        requirement: NewRequirement,
    ) -> Result<ProjectRequirement, RepositoryError> {
        self.unit_of_work(|tables| {
            tables.require_project("project_requirement", project_id)?;
            tables.require_capability("project_requirement", requirement.capability_id)?;

            let id = RequirementId(next(&mut tables.sequences.requirement));
            let row = ProjectRequirement {
                id,
                project_id,
                capability_id: requirement.capability_id,
                min_experience_years: requirement.min_experience_years,
                min_contract_value_million: requirement.min_contract_value_million,
            };
            tables.requirements.insert(id, row.clone());
            Ok(row)
        })
    }

    fn list_requirements(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<ProjectRequirement>, RepositoryError> {
        self.unit_of_work(|tables| {
            Ok(tables
                .requirements
                .values()
                .filter(|requirement| requirement.project_id == project_id)
                .cloned()
                .collect())
        })
    }
}

impl PrequalificationRepository for MemoryStore {
    fn insert_response(
        &self,
        response: NewResponse,
    ) -> Result<PrequalificationResponse, RepositoryError> {
        self.unit_of_work(|tables| {
            tables.require_project("prequalification_response", response.project_id)?;
            tables.require_company(
                "prequalification_response",
                response.contractor_company_id,
            )?;

            if tables.responses.values().any(|row| {
                row.project_id == response.project_id
                    && row.contractor_company_id == response.contractor_company_id
            }) {
                return Err(RepositoryError::Conflict {
                    entity: "prequalification response",
                    detail: format!(
                        "project {} already has a response for contractor {}",
                        response.project_id, response.contractor_company_id
                    ),
                });
            }

            let id = ResponseId(next(&mut tables.sequences.response));
            let row = PrequalificationResponse {
                id,
                project_id: response.project_id,
                contractor_company_id: response.contractor_company_id,
                status: response.status,
                notes: response.notes,
                created_at: response.created_at,
                updated_at: response.created_at,
            };
            tables.responses.insert(id, row.clone());
            Ok(row)
        })
    }

    fn update_response(&self, response: &PrequalificationResponse) -> Result<(), RepositoryError> {
        self.unit_of_work(|tables| {
            let row = tables
                .responses
                .get_mut(&response.id)
                .ok_or(RepositoryError::not_found(
                    "prequalification response",
                    response.id.0,
                ))?;
            row.status = response.status;
            row.notes = response.notes.clone();
            row.updated_at = response.updated_at;
            Ok(())
        })
    }

    fn fetch_response(
        &self,
        project_id: ProjectId,
        contractor_id: CompanyId,
    ) -> Result<Option<PrequalificationResponse>, RepositoryError> {
        self.unit_of_work(|tables| {
            Ok(tables
                .responses
                .values()
                .find(|row| row.project_id == project_id && row.contractor_company_id == contractor_id)
                .cloned())
        })
    }

    fn list_responses(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<PrequalificationResponse>, RepositoryError> {
        self.unit_of_work(|tables| {
            Ok(tables
                .responses
                .values()
                .filter(|row| row.project_id == project_id)
                .cloned()
                .collect())
        })
    }
}
