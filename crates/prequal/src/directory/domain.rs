use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CapabilityId, CompanyCapabilityId, CompanyId, ProjectId, RequirementId};

/// Role a company plays in the prequalification process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanyType {
    Developer,
    Contractor,
}

impl CompanyType {
    pub const fn label(self) -> &'static str {
        match self {
            CompanyType::Developer => "developer",
            CompanyType::Contractor => "contractor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
    Mega,
}

/// A developer or contractor registered in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub company_type: CompanyType,
    pub country: Option<String>,
    pub city: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub size_category: Option<SizeCategory>,
    pub created_at: DateTime<Utc>,
}

/// Validated company fields supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCompany {
    pub name: String,
    pub company_type: CompanyType,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub size_category: Option<SizeCategory>,
}

impl NewCompany {
    pub fn new(name: impl Into<String>, company_type: CompanyType) -> Self {
        Self {
            name: name.into(),
            company_type,
            country: None,
            city: None,
            website: None,
            description: None,
            size_category: None,
        }
    }
}

/// A named specialization such as "Residential High-Rise".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    pub id: CapabilityId,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCapability {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Experience and scale metrics a company claims for one capability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CapabilityProfile {
    #[serde(default)]
    pub experience_years: Option<f64>,
    #[serde(default)]
    pub typical_project_size_m2: Option<f64>,
    #[serde(default)]
    pub typical_contract_value_million: Option<f64>,
}

/// Association row between a company and a capability. Unique per pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyCapability {
    pub id: CompanyCapabilityId,
    pub company_id: CompanyId,
    pub capability_id: CapabilityId,
    pub experience_years: Option<f64>,
    pub typical_project_size_m2: Option<f64>,
    pub typical_contract_value_million: Option<f64>,
}

impl CompanyCapability {
    pub fn profile(&self) -> CapabilityProfile {
        CapabilityProfile {
            experience_years: self.experience_years,
            typical_project_size_m2: self.typical_project_size_m2,
            typical_contract_value_million: self.typical_contract_value_million,
        }
    }

    pub(crate) fn apply_profile(&mut self, profile: CapabilityProfile) {
        self.experience_years = profile.experience_years;
        self.typical_project_size_m2 = profile.typical_project_size_m2;
        self.typical_contract_value_million = profile.typical_contract_value_million;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    Draft,
    #[default]
    Open,
    Closed,
}

impl ProjectStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::Open => "open",
            ProjectStatus::Closed => "closed",
        }
    }
}

/// A project posted by a developer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub developer_company_id: CompanyId,
    pub name: String,
    pub location: Option<String>,
    pub project_type: Option<String>,
    pub description: Option<String>,
    pub built_up_area_m2: Option<f64>,
    pub estimated_budget_million: Option<f64>,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    pub developer_company_id: CompanyId,
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
}

impl NewProject {
    pub fn new(developer_company_id: CompanyId, name: impl Into<String>) -> Self {
        Self {
            developer_company_id,
            name: name.into(),
            location: None,
            project_type: None,
            description: None,
            built_up_area_m2: None,
            estimated_budget_million: None,
            status: ProjectStatus::default(),
        }
    }
}

/// Capability demanded by a project. The minimum thresholds are recorded but not scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRequirement {
    pub id: RequirementId,
    pub project_id: ProjectId,
    pub capability_id: CapabilityId,
    pub min_experience_years: Option<f64>,
    pub min_contract_value_million: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewRequirement {
    pub capability_id: CapabilityId,
    #[serde(default)]
    pub min_experience_years: Option<f64>,
    #[serde(default)]
    pub min_contract_value_million: Option<f64>,
}

impl NewRequirement {
    pub fn new(capability_id: CapabilityId) -> Self {
        Self {
            capability_id,
            min_experience_years: None,
            min_contract_value_million: None,
        }
    }
}
