use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::directory::domain::{
    CapabilityProfile, NewCapability, NewCompany, NewProject, NewRequirement, ProjectStatus,
};
use crate::directory::repository::DirectoryRepository;
use crate::directory::service::{DirectoryError, DirectoryService};
use crate::ids::{CapabilityId, CompanyId};

/// JSON fixture describing a catalog and its projects. Rows refer to each other by name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub capabilities: Vec<NewCapability>,
    #[serde(default)]
    pub companies: Vec<SeedCompany>,
    #[serde(default)]
    pub projects: Vec<SeedProject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedCompany {
    #[serde(flatten)]
    pub company: NewCompany,
    #[serde(default)]
    pub capabilities: Vec<SeedCapabilityProfile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedCapabilityProfile {
    pub capability: String,
    #[serde(flatten)]
    pub profile: CapabilityProfile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedProject {
    pub developer: String,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub project_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub built_up_area_m2: Option<f64>,
    #[serde(default)]
    pub estimated_budget_million: Option<f64>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub requirements: Vec<SeedRequirement>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedRequirement {
    pub capability: String,
    #[serde(default)]
    pub min_experience_years: Option<f64>,
    #[serde(default)]
    pub min_contract_value_million: Option<f64>,
}

/// Row counts written by [`SeedDocument::apply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub capabilities: usize,
    pub companies: usize,
    pub company_capabilities: usize,
    pub projects: usize,
    pub requirements: usize,
}

#[derive(Debug)]
pub enum SeedError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Directory(DirectoryError),
    UnknownCapability(String),
    UnknownCompany(String),
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedError::Io(err) => write!(f, "failed to read seed file: {}", err),
            SeedError::Json(err) => write!(f, "invalid seed document: {}", err),
            SeedError::Directory(err) => write!(f, "could not apply seed: {}", err),
            SeedError::UnknownCapability(name) => {
                write!(f, "seed references unknown capability '{}'", name)
            }
            SeedError::UnknownCompany(name) => {
                write!(f, "seed references unknown company '{}'", name)
            }
        }
    }
}

impl std::error::Error for SeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SeedError::Io(err) => Some(err),
            SeedError::Json(err) => Some(err),
            SeedError::Directory(err) => Some(err),
            SeedError::UnknownCapability(_) | SeedError::UnknownCompany(_) => None,
        }
    }
}

impl From<std::io::Error> for SeedError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<DirectoryError> for SeedError {
    fn from(err: DirectoryError) -> Self {
        Self::Directory(err)
    }
}

impl SeedDocument {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SeedError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SeedError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Create every row through the directory service so role and key checks still apply.
    pub fn apply<D>(&self, service: &DirectoryService<D>) -> Result<SeedSummary, SeedError>
    where
        D: DirectoryRepository + 'static,
    {
        let mut summary = SeedSummary::default();

        let mut capability_ids: HashMap<String, CapabilityId> = service
            .list_capabilities()?
            .into_iter()
            .map(|capability| (capability.name, capability.id))
            .collect();
        for capability in &self.capabilities {
            let created = service.create_capability(capability.clone())?;
            capability_ids.insert(created.name, created.id);
            summary.capabilities += 1;
        }

        let lookup_capability = |name: &str| {
            capability_ids
                .get(name)
                .copied()
                .ok_or_else(|| SeedError::UnknownCapability(name.to_string()))
        };

        let mut company_ids: HashMap<String, CompanyId> = HashMap::new();
        for entry in &self.companies {
            let company = service.create_company(entry.company.clone())?;
            summary.companies += 1;

            for held in &entry.capabilities {
                let capability_id = lookup_capability(&held.capability)?;
                service.save_company_capability(company.id, capability_id, held.profile)?;
                summary.company_capabilities += 1;
            }
            company_ids.insert(company.name, company.id);
        }

        for entry in &self.projects {
            let developer_id = company_ids
                .get(&entry.developer)
                .copied()
                .ok_or_else(|| SeedError::UnknownCompany(entry.developer.clone()))?;

            let project = service.create_project(NewProject {
                developer_company_id: developer_id,
                name: entry.name.clone(),
                location: entry.location.clone(),
                project_type: entry.project_type.clone(),
                description: entry.description.clone(),
                built_up_area_m2: entry.built_up_area_m2,
                estimated_budget_million: entry.estimated_budget_million,
                status: entry.status,
            })?;
            summary.projects += 1;

            for requirement in &entry.requirements {
                let capability_id = lookup_capability(&requirement.capability)?;
                service.add_requirement(
                    project.id,
                    NewRequirement {
                        capability_id,
                        min_experience_years: requirement.min_experience_years,
                        min_contract_value_million: requirement.min_contract_value_million,
                    },
                )?;
                summary.requirements += 1;
            }
        }

        Ok(summary)
    }
}
