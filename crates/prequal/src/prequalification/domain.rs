use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CompanyId, ProjectId, ResponseId};

/// Developer decision recorded against a contractor for one project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrequalificationStatus {
    #[default]
    Interested,
    Submitted,
    Shortlisted,
    Rejected,
}

impl PrequalificationStatus {
    pub const ALL: [PrequalificationStatus; 4] = [
        PrequalificationStatus::Interested,
        PrequalificationStatus::Submitted,
        PrequalificationStatus::Shortlisted,
        PrequalificationStatus::Rejected,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            PrequalificationStatus::Interested => "interested",
            PrequalificationStatus::Submitted => "submitted",
            PrequalificationStatus::Shortlisted => "shortlisted",
            PrequalificationStatus::Rejected => "rejected",
        }
    }
}

/// The single response row kept per (project, contractor) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrequalificationResponse {
    pub id: ResponseId,
    pub project_id: ProjectId,
    pub contractor_company_id: CompanyId,
    pub status: PrequalificationStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row handed to the repository when a pair has no response yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResponse {
    pub project_id: ProjectId,
    pub contractor_company_id: CompanyId,
    pub status: PrequalificationStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied decision. A missing status falls back to `Interested`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    #[serde(default)]
    pub status: Option<PrequalificationStatus>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Decision {
    pub fn new(status: PrequalificationStatus) -> Self {
        Self {
            status: Some(status),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn status(&self) -> PrequalificationStatus {
        self.status.unwrap_or_default()
    }
}
