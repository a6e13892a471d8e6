use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use super::ContractorMatch;
use crate::directory::domain::{Company, CompanyCapability, CompanyType, ProjectRequirement};
use crate::ids::{CapabilityId, CompanyId};

pub(crate) fn rank_contractors(
    requirements: &[ProjectRequirement],
    contractors: &[Company],
    holdings: &[CompanyCapability],
) -> Vec<ContractorMatch> {
    if requirements.is_empty() {
        return Vec::new();
    }

    let mut held: HashMap<CompanyId, HashSet<CapabilityId>> = HashMap::new();
    for link in holdings {
        held.entry(link.company_id)
            .or_default()
            .insert(link.capability_id);
    }

    let mut matches: Vec<ContractorMatch> = contractors
        .iter()
        .filter(|company| company.company_type == CompanyType::Contractor)
        .filter_map(|company| {
            let capabilities = held.get(&company.id)?;
            // Each requirement row counts, so a capability listed twice scores twice.
            let matched_requirements: Vec<_> = requirements
                .iter()
                .filter(|requirement| capabilities.contains(&requirement.capability_id))
                .map(|requirement| requirement.id)
                .collect();

            if matched_requirements.is_empty() {
                return None;
            }

            let matched_count = matched_requirements.len();
            Some(ContractorMatch {
                company: company.clone(),
                score: requirement_score(matched_count),
                matched_count,
                matched_requirements,
            })
        })
        .collect();

    matches.sort_by(compare_matches);
    matches
}

fn requirement_score(matched_count: usize) -> f64 {
    matched_count as f64
}

fn compare_matches(left: &ContractorMatch, right: &ContractorMatch) -> Ordering {
    right
        .score
        .total_cmp(&left.score)
        .then_with(|| left.company.id.cmp(&right.company.id))
}
