use chrono::Utc;

use super::common::*;
use crate::directory::domain::{
    Company, CompanyCapability, CompanyType, ProjectRequirement,
};
use crate::ids::{CapabilityId, CompanyCapabilityId, CompanyId, ProjectId, RequirementId};
use crate::prequalification::MatchingEngine;

fn company(id: i64, company_type: CompanyType) -> Company {
    Company {
        id: CompanyId(id),
        name: format!("company-{id}"),
        company_type,
        country: None,
        city: None,
        website: None,
        description: None,
        size_category: None,
        created_at: Utc::now(),
    }
}

fn requirement(id: i64, capability: i64) -> ProjectRequirement {
    ProjectRequirement {
        id: RequirementId(id),
        project_id: ProjectId(1),
        capability_id: CapabilityId(capability),
        min_experience_years: None,
        min_contract_value_million: None,
    }
}

fn holding(id: i64, company: i64, capability: i64) -> CompanyCapability {
    CompanyCapability {
        id: CompanyCapabilityId(id),
        company_id: CompanyId(company),
        capability_id: CapabilityId(capability),
        experience_years: None,
        typical_project_size_m2: None,
        typical_contract_value_million: None,
    }
}

#[test]
fn ranks_reference_scenario() {
    let scenario = scenario();

    let matches = scenario
        .service
        .match_contractors(scenario.project.id)
        .expect("matching succeeds");

    let ranked: Vec<(CompanyId, f64, usize)> = matches
        .iter()
        .map(|candidate| (candidate.company.id, candidate.score, candidate.matched_count))
        .collect();
    assert_eq!(
        ranked,
        vec![(scenario.y.id, 2.0, 2), (scenario.x.id, 1.0, 1)]
    );
    assert!(matches
        .iter()
        .all(|candidate| candidate.company.id != scenario.z.id));
}

#[test]
fn project_without_requirements_matches_nobody() {
    let scenario = scenario();
    let empty = scenario.empty_project("Hacienda West");

    let matches = scenario
        .service
        .match_contractors(empty.id)
        .expect("matching succeeds");

    assert!(matches.is_empty());
}

#[test]
fn unknown_project_matches_nobody() {
    let scenario = scenario();

    let matches = scenario
        .service
        .match_contractors(ProjectId(404))
        .expect("matching succeeds");

    assert!(matches.is_empty());
}

#[test]
fn duplicate_requirement_rows_each_count() {
    let scenario = scenario();
    scenario.require(&scenario.project, &scenario.cap_a);

    let matches = scenario
        .service
        .match_contractors(scenario.project.id)
        .expect("matching succeeds");

    let x = matches
        .iter()
        .find(|candidate| candidate.company.id == scenario.x.id)
        .expect("x still matches");
    assert_eq!(x.matched_count, 2);
    assert_eq!(x.score, 2.0);
    assert_eq!(x.matched_requirements.len(), 2);

    let y = matches
        .iter()
        .find(|candidate| candidate.company.id == scenario.y.id)
        .expect("y still matches");
    assert_eq!(y.matched_count, 3);
    assert_eq!(matches[0].company.id, scenario.y.id);
}

#[test]
fn ties_break_by_company_id() {
    let engine = MatchingEngine::new();
    let requirements = vec![requirement(1, 10)];
    let contractors = vec![
        company(7, CompanyType::Contractor),
        company(3, CompanyType::Contractor),
        company(5, CompanyType::Contractor),
    ];
    let holdings = vec![holding(1, 7, 10), holding(2, 3, 10), holding(3, 5, 10)];

    let ids: Vec<CompanyId> = engine
        .rank(&requirements, &contractors, &holdings)
        .into_iter()
        .map(|candidate| candidate.company.id)
        .collect();

    assert_eq!(ids, vec![CompanyId(3), CompanyId(5), CompanyId(7)]);
}

#[test]
fn scores_are_non_increasing() {
    let engine = MatchingEngine::new();
    let requirements = vec![
        requirement(1, 10),
        requirement(2, 11),
        requirement(3, 12),
        requirement(4, 12),
    ];
    let contractors: Vec<Company> = (1..=6)
        .map(|id| company(id, CompanyType::Contractor))
        .collect();
    let holdings = vec![
        holding(1, 1, 10),
        holding(2, 2, 12),
        holding(3, 3, 10),
        holding(4, 3, 11),
        holding(5, 3, 12),
        holding(6, 4, 11),
        holding(7, 5, 99),
    ];

    let matches = engine.rank(&requirements, &contractors, &holdings);

    assert_eq!(matches.len(), 4);
    assert!(matches
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score));
    assert_eq!(matches[0].company.id, CompanyId(3));
    assert_eq!(matches[0].matched_count, 4);
    assert_eq!(matches[1].company.id, CompanyId(2));
    assert_eq!(matches[1].matched_count, 2);
}

#[test]
fn developers_never_appear_even_with_capabilities() {
    let engine = MatchingEngine::new();
    let requirements = vec![requirement(1, 10)];
    let companies = vec![
        company(1, CompanyType::Developer),
        company(2, CompanyType::Contractor),
    ];
    let holdings = vec![holding(1, 1, 10), holding(2, 2, 10)];

    let matches = engine.rank(&requirements, &companies, &holdings);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].company.id, CompanyId(2));
}

#[test]
fn thresholds_do_not_filter_candidates() {
    let engine = MatchingEngine::new();
    let mut strict = requirement(1, 10);
    strict.min_experience_years = Some(25.0);
    strict.min_contract_value_million = Some(1_000.0);
    let mut junior = holding(1, 1, 10);
    junior.experience_years = Some(1.0);
    junior.typical_contract_value_million = Some(2.0);

    let matches = engine.rank(
        &[strict],
        &[company(1, CompanyType::Contractor)],
        &[junior],
    );

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].matched_count, 1);
}

#[test]
fn contractor_without_overlap_is_excluded() {
    let scenario = scenario();
    let outsider = scenario.contractor("Outsider Works", &[&scenario.cap_c]);

    let matches = scenario
        .service
        .match_contractors(scenario.project.id)
        .expect("matching succeeds");

    assert!(matches
        .iter()
        .all(|candidate| candidate.company.id != outsider.id));
}
