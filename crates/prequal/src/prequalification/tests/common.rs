use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::directory::domain::{
    Capability, CapabilityProfile, Company, CompanyType, NewCapability, NewCompany, NewProject,
    NewRequirement, Project,
};
use crate::directory::DirectoryService;
use crate::ids::{CompanyId, ProjectId};
use crate::prequalification::domain::{
    NewResponse, PrequalificationResponse, PrequalificationStatus,
};
use crate::prequalification::repository::PrequalificationRepository;
use crate::prequalification::transition::{TransitionPolicy, TransitionRejected};
use crate::prequalification::PrequalificationService;
use crate::repository::RepositoryError;
use crate::store::MemoryStore;

/// Project P requires {A, B}; X holds {A}, Y holds {A, B}, Z holds {C}.
pub(super) struct Scenario {
    pub(super) store: Arc<MemoryStore>,
    pub(super) directory: DirectoryService<MemoryStore>,
    pub(super) service: PrequalificationService<MemoryStore, MemoryStore>,
    pub(super) developer: Company,
    pub(super) project: Project,
    pub(super) cap_a: Capability,
    pub(super) cap_b: Capability,
    pub(super) cap_c: Capability,
    pub(super) x: Company,
    pub(super) y: Company,
    pub(super) z: Company,
}

impl Scenario {
    pub(super) fn contractor(&self, name: &str, capabilities: &[&Capability]) -> Company {
        contractor(&self.directory, name, capabilities)
    }

    pub(super) fn require(&self, project: &Project, capability: &Capability) {
        self.directory
            .add_requirement(project.id, NewRequirement::new(capability.id))
            .expect("requirement added");
    }

    pub(super) fn empty_project(&self, name: &str) -> Project {
        self.directory
            .create_project(NewProject::new(self.developer.id, name))
            .expect("project created")
    }
}

fn contractor(
    directory: &DirectoryService<MemoryStore>,
    name: &str,
    capabilities: &[&Capability],
) -> Company {
    let company = directory
        .create_company(NewCompany::new(name, CompanyType::Contractor))
        .expect("contractor created");
    for capability in capabilities {
        directory
            .save_company_capability(company.id, capability.id, CapabilityProfile::default())
            .expect("capability linked");
    }
    company
}

fn capability(directory: &DirectoryService<MemoryStore>, name: &str) -> Capability {
    directory
        .create_capability(NewCapability {
            name: name.to_string(),
            description: None,
        })
        .expect("capability created")
}

pub(super) fn scenario() -> Scenario {
    let store = Arc::new(MemoryStore::new());
    let directory = DirectoryService::new(store.clone());
    let service = PrequalificationService::new(store.clone(), store.clone());

    let developer = directory
        .create_company(NewCompany::new("Palm Hills", CompanyType::Developer))
        .expect("developer created");
    let cap_a = capability(&directory, "Residential High-Rise");
    let cap_b = capability(&directory, "Hospitals");
    let cap_c = capability(&directory, "Marine Works");

    let project = directory
        .create_project(NewProject::new(developer.id, "Badya"))
        .expect("project created");
    for required in [&cap_a, &cap_b] {
        directory
            .add_requirement(project.id, NewRequirement::new(required.id))
            .expect("requirement added");
    }

    let x = contractor(&directory, "Xenon Builders", &[&cap_a]);
    let y = contractor(&directory, "Yasmin Contracting", &[&cap_a, &cap_b]);
    let z = contractor(&directory, "Zed Marine", &[&cap_c]);

    Scenario {
        store,
        directory,
        service,
        developer,
        project,
        cap_a,
        cap_b,
        cap_c,
        x,
        y,
        z,
    }
}

pub(super) fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, minute, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Rejected contractors stay rejected.
pub(super) struct FinalRejections;

impl TransitionPolicy for FinalRejections {
    fn check(
        &self,
        current: Option<PrequalificationStatus>,
        next: PrequalificationStatus,
    ) -> Result<(), TransitionRejected> {
        match current {
            Some(PrequalificationStatus::Rejected) if next != PrequalificationStatus::Rejected => {
                Err(TransitionRejected {
                    from: current,
                    to: next,
                })
            }
            _ => Ok(()),
        }
    }
}

pub(super) struct UnavailableResponses;

impl PrequalificationRepository for UnavailableResponses {
    fn insert_response(
        &self,
        _response: NewResponse,
    ) -> Result<PrequalificationResponse, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_response(&self, _response: &PrequalificationResponse) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_response(
        &self,
        _project_id: ProjectId,
        _contractor_id: CompanyId,
    ) -> Result<Option<PrequalificationResponse>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_responses(
        &self,
        _project_id: ProjectId,
    ) -> Result<Vec<PrequalificationResponse>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Simulates a competing writer that inserted the pair between our read and our insert.
pub(super) struct RacingResponses {
    pub(super) inner: Arc<MemoryStore>,
}

impl PrequalificationRepository for RacingResponses {
    fn insert_response(
        &self,
        response: NewResponse,
    ) -> Result<PrequalificationResponse, RepositoryError> {
        self.inner.insert_response(response.clone())?;
        self.inner.insert_response(response)
    }

    fn update_response(&self, response: &PrequalificationResponse) -> Result<(), RepositoryError> {
        self.inner.update_response(response)
    }

    fn fetch_response(
        &self,
        _project_id: ProjectId,
        _contractor_id: CompanyId,
    ) -> Result<Option<PrequalificationResponse>, RepositoryError> {
        Ok(None)
    }

    fn list_responses(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<PrequalificationResponse>, RepositoryError> {
        self.inner.list_responses(project_id)
    }
}
