//! Catalog and project records: companies, capabilities, capability profiles, projects, and
//! project requirements. Plain creation and listing with referential checks; the matching and
//! prequalification logic lives in [`crate::prequalification`].

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Capability, CapabilityProfile, Company, CompanyCapability, CompanyType, NewCapability,
    NewCompany, NewProject, NewRequirement, Project, ProjectRequirement, ProjectStatus,
    SizeCategory,
};
pub use repository::{CatalogRepository, DirectoryRepository, ProjectRepository};
pub use router::directory_router;
pub use service::{DirectoryError, DirectoryService};
