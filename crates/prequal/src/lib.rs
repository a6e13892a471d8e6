//! Capability matching and prequalification for development projects.
//!
//! Developers post projects with capability requirements, contractors claim capabilities, and
//! the [`prequalification`] workflow ranks contractors per project and records the developer's
//! decision for each of them.

pub mod config;
pub mod directory;
pub mod error;
pub mod ids;
pub mod prequalification;
pub mod repository;
pub mod store;
pub mod telemetry;

pub use ids::{CapabilityId, CompanyCapabilityId, CompanyId, ProjectId, RequirementId, ResponseId};
pub use repository::RepositoryError;
pub use store::MemoryStore;
