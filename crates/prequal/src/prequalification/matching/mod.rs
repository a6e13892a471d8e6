mod rules;

use serde::{Deserialize, Serialize};

use crate::directory::domain::{Company, CompanyCapability, ProjectRequirement};
use crate::ids::RequirementId;

/// Stateless ranker that scores contractors against a project's requirement rows.
///
/// Only capability presence is compared. Experience and contract-value thresholds on the
/// requirement, and the metrics on the contractor's profile, do not affect the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchingEngine;

impl MatchingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Rank every contractor in `contractors` holding at least one required capability.
    ///
    /// Results are ordered by score descending, then by company id ascending. Companies that
    /// are not contractors are skipped even if present in the slice.
    pub fn rank(
        &self,
        requirements: &[ProjectRequirement],
        contractors: &[Company],
        holdings: &[CompanyCapability],
    ) -> Vec<ContractorMatch> {
        rules::rank_contractors(requirements, contractors, holdings)
    }
}

/// A ranked contractor with the requirement rows it satisfies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractorMatch {
    pub company: Company,
    pub score: f64,
    pub matched_count: usize,
    pub matched_requirements: Vec<RequirementId>,
}
