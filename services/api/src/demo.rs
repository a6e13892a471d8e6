use crate::infra::Workflow;
use clap::Args;
use prequal::config::AppConfig;
use prequal::directory::Project;
use prequal::error::AppError;
use prequal::prequalification::{ContractorMatch, Decision, PrequalificationStatus};
use prequal::store::SeedDocument;
use prequal::ProjectId;
use serde::Serialize;
use std::io::Cursor;
use std::path::PathBuf;

const DEMO_CATALOG: &str = include_str!("../fixtures/demo_catalog.json");

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Use this seed document instead of the bundled catalog
    #[arg(long)]
    pub(crate) seed: Option<PathBuf>,
    /// Only print the ranking; skip recording decisions
    #[arg(long)]
    pub(crate) skip_decisions: bool,
}

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Project to rank contractors for
    #[arg(long)]
    pub(crate) project_id: i64,
    /// Seed document to load (defaults to PREQUAL_SEED_PATH)
    #[arg(long)]
    pub(crate) seed: Option<PathBuf>,
    /// Emit the ranking as CSV on stdout
    #[arg(long)]
    pub(crate) csv: bool,
}

/// One line of the ranking export.
#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct MatchRow {
    pub(crate) rank: usize,
    pub(crate) company_id: i64,
    pub(crate) company_name: String,
    pub(crate) city: String,
    pub(crate) score: f64,
    pub(crate) matched_count: usize,
}

impl MatchRow {
    fn from_match(rank: usize, candidate: &ContractorMatch) -> Self {
        Self {
            rank,
            company_id: candidate.company.id.0,
            company_name: candidate.company.name.clone(),
            city: candidate.company.city.clone().unwrap_or_default(),
            score: candidate.score,
            matched_count: candidate.matched_count,
        }
    }
}

pub(crate) fn match_rows(matches: &[ContractorMatch]) -> Vec<MatchRow> {
    matches
        .iter()
        .enumerate()
        .map(|(index, candidate)| MatchRow::from_match(index + 1, candidate))
        .collect()
}

pub(crate) fn write_csv<W: std::io::Write>(rows: &[MatchRow], sink: W) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(sink);
    for row in rows {
        writer.serialize(row).map_err(std::io::Error::from)?;
    }
    writer.flush()?;
    Ok(())
}

pub(crate) fn run_match_report(args: MatchArgs) -> Result<(), AppError> {
    let MatchArgs {
        project_id,
        seed,
        csv,
    } = args;

    let seed = match seed {
        Some(path) => Some(path),
        None => AppConfig::load()?.storage.seed_path,
    };
    let (workflow, _) = Workflow::load(seed.as_deref())?;
    let matches = workflow
        .prequalification
        .match_contractors(ProjectId(project_id))?;
    let rows = match_rows(&matches);

    if csv {
        return write_csv(&rows, std::io::stdout().lock());
    }

    if rows.is_empty() {
        println!("No contractors match project {project_id}");
        return Ok(());
    }
    println!("Contractor ranking for project {project_id}");
    for row in &rows {
        println!(
            "  {}. {} ({}) | score {:.1} | {} requirement(s) covered",
            row.rank,
            row.company_name,
            if row.city.is_empty() { "-" } else { row.city.as_str() },
            row.score,
            row.matched_count
        );
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        seed,
        skip_decisions,
    } = args;

    let document = match seed {
        Some(path) => SeedDocument::from_path(path)?,
        None => SeedDocument::from_reader(Cursor::new(DEMO_CATALOG))?,
    };
    let (workflow, summary) = Workflow::from_document(&document)?;

    println!("Contractor prequalification demo");
    println!(
        "- Loaded {} capabilities, {} companies ({} capability claims), {} projects ({} requirements)",
        summary.capabilities,
        summary.companies,
        summary.company_capabilities,
        summary.projects,
        summary.requirements
    );

    for project in workflow.directory.list_projects(None)? {
        render_project(&workflow, &project, skip_decisions)?;
    }
    Ok(())
}

fn render_project(
    workflow: &Workflow,
    project: &Project,
    skip_decisions: bool,
) -> Result<(), AppError> {
    let requirements = workflow.directory.list_requirements(project.id)?;
    println!(
        "\nProject {} '{}' ({}) | {} requirement(s)",
        project.id,
        project.name,
        project.status.label(),
        requirements.len()
    );

    let matches = workflow.prequalification.match_contractors(project.id)?;
    if matches.is_empty() {
        println!("  No contractors cover any requirement");
        return Ok(());
    }
    for row in match_rows(&matches) {
        println!(
            "  {}. {} | score {:.1} | {} of {} requirement(s)",
            row.rank,
            row.company_name,
            row.score,
            row.matched_count,
            requirements.len()
        );
    }

    if skip_decisions {
        return Ok(());
    }

    println!("  Recording decisions");
    for (index, candidate) in matches.iter().enumerate() {
        let decision = if index == 0 {
            Decision::new(PrequalificationStatus::Shortlisted).with_notes("top ranked")
        } else {
            Decision::new(PrequalificationStatus::Interested)
        };
        workflow
            .prequalification
            .upsert(project.id, candidate.company.id, decision)?;
    }
    if let Some(last) = matches.last() {
        // A second decision for the same pair overwrites the first.
        workflow.prequalification.upsert(
            project.id,
            last.company.id,
            Decision::new(PrequalificationStatus::Rejected).with_notes("insufficient coverage"),
        )?;
    }

    for view in workflow.prequalification.candidate_board(project.id)? {
        println!(
            "    - {} -> {}{}",
            view.candidate.company.name,
            view.status_or_default().label(),
            view.notes
                .as_deref()
                .map(|notes| format!(" ({notes})"))
                .unwrap_or_default()
        );
    }
    let stored = workflow.prequalification.list_for_project(project.id)?;
    println!("  {} response row(s) stored", stored.len());
    Ok(())
}
