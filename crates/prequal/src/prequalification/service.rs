use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use super::domain::{Decision, NewResponse, PrequalificationResponse, PrequalificationStatus};
use super::matching::{ContractorMatch, MatchingEngine};
use super::repository::PrequalificationRepository;
use super::transition::{OpenTransitions, TransitionPolicy, TransitionRejected};
use crate::directory::domain::CompanyType;
use crate::directory::repository::DirectoryRepository;
use crate::ids::{CompanyId, ProjectId, ResponseId};
use crate::repository::RepositoryError;

/// Service composing the matching engine, the response repository, and the transition policy.
pub struct PrequalificationService<D, R> {
    directory: Arc<D>,
    responses: Arc<R>,
    engine: MatchingEngine,
    policy: Arc<dyn TransitionPolicy>,
}

impl<D, R> PrequalificationService<D, R>
where
    D: DirectoryRepository + 'static,
    R: PrequalificationRepository + 'static,
{
    pub fn new(directory: Arc<D>, responses: Arc<R>) -> Self {
        Self::with_policy(directory, responses, Arc::new(OpenTransitions))
    }

    pub fn with_policy(
        directory: Arc<D>,
        responses: Arc<R>,
        policy: Arc<dyn TransitionPolicy>,
    ) -> Self {
        Self {
            directory,
            responses,
            engine: MatchingEngine::new(),
            policy,
        }
    }

    /// Rank contractors for a project. Unknown projects and projects without requirements
    /// yield an empty list.
    pub fn match_contractors(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<ContractorMatch>, PrequalificationError> {
        if self.directory.fetch_project(project_id)?.is_none() {
            debug!(project_id = %project_id, "matching skipped for unknown project");
            return Ok(Vec::new());
        }

        let requirements = self.directory.list_requirements(project_id)?;
        if requirements.is_empty() {
            debug!(project_id = %project_id, "matching skipped for project without requirements");
            return Ok(Vec::new());
        }

        let contractors = self
            .directory
            .list_companies(Some(CompanyType::Contractor))?;
        let holdings = self.directory.list_company_capabilities(None)?;

        let matches = self.engine.rank(&requirements, &contractors, &holdings);
        debug!(
            project_id = %project_id,
            requirements = requirements.len(),
            candidates = matches.len(),
            "contractor matching computed"
        );
        Ok(matches)
    }

    /// Record a decision for the pair, creating the response on first use.
    pub fn upsert(
        &self,
        project_id: ProjectId,
        contractor_id: CompanyId,
        decision: Decision,
    ) -> Result<PrequalificationResponse, PrequalificationError> {
        self.upsert_at(project_id, contractor_id, decision, Utc::now())
    }

    /// Same as [`Self::upsert`] with an explicit timestamp for `created_at`/`updated_at`.
    pub fn upsert_at(
        &self,
        project_id: ProjectId,
        contractor_id: CompanyId,
        decision: Decision,
        now: DateTime<Utc>,
    ) -> Result<PrequalificationResponse, PrequalificationError> {
        let status = decision.status();
        let existing = self.responses.fetch_response(project_id, contractor_id)?;

        self.policy
            .check(existing.as_ref().map(|response| response.status), status)?;

        match existing {
            Some(mut response) => {
                let previous = response.status;
                response.status = status;
                response.notes = decision.notes;
                response.updated_at = now;
                self.responses.update_response(&response)?;
                info!(
                    response_id = %response.id,
                    project_id = %project_id,
                    contractor_id = %contractor_id,
                    from = previous.label(),
                    to = status.label(),
                    "prequalification response updated"
                );
                Ok(response)
            }
            None => {
                let response = self.responses.insert_response(NewResponse {
                    project_id,
                    contractor_company_id: contractor_id,
                    status,
                    notes: decision.notes,
                    created_at: now,
                })?;
                info!(
                    response_id = %response.id,
                    project_id = %project_id,
                    contractor_id = %contractor_id,
                    status = status.label(),
                    "prequalification response created"
                );
                Ok(response)
            }
        }
    }

    pub fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<PrequalificationResponse>, PrequalificationError> {
        Ok(self.responses.list_responses(project_id)?)
    }

    /// Ranked contractors annotated with the decision already recorded for each of them.
    pub fn candidate_board(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<CandidateView>, PrequalificationError> {
        let matches = self.match_contractors(project_id)?;
        if matches.is_empty() {
            return Ok(Vec::new());
        }

        let mut by_contractor: HashMap<CompanyId, PrequalificationResponse> = self
            .responses
            .list_responses(project_id)?
            .into_iter()
            .map(|response| (response.contractor_company_id, response))
            .collect();

        Ok(matches
            .into_iter()
            .map(|candidate| {
                let response = by_contractor.remove(&candidate.company.id);
                CandidateView::new(candidate, response)
            })
            .collect())
    }
}

/// A ranked contractor together with its current prequalification decision, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateView {
    #[serde(flatten)]
    pub candidate: ContractorMatch,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_id: Option<ResponseId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_status: Option<PrequalificationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CandidateView {
    fn new(candidate: ContractorMatch, response: Option<PrequalificationResponse>) -> Self {
        match response {
            Some(response) => Self {
                candidate,
                response_id: Some(response.id),
                current_status: Some(response.status),
                notes: response.notes,
            },
            None => Self {
                candidate,
                response_id: None,
                current_status: None,
                notes: None,
            },
        }
    }

    /// Status to pre-select when presenting the decision form.
    pub fn status_or_default(&self) -> PrequalificationStatus {
        self.current_status.unwrap_or_default()
    }
}

/// Error raised by the prequalification service.
#[derive(Debug, thiserror::Error)]
pub enum PrequalificationError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Transition(#[from] TransitionRejected),
}
