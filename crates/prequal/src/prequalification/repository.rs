use super::domain::{NewResponse, PrequalificationResponse};
use crate::ids::{CompanyId, ProjectId};
use crate::repository::RepositoryError;

/// Storage abstraction for prequalification responses.
///
/// Implementations enforce the (project, contractor) uniqueness and the foreign keys to the
/// project and the contractor company; the workflow does not pre-check either.
pub trait PrequalificationRepository: Send + Sync {
    /// Fails with `Conflict` when the pair already has a response.
    fn insert_response(
        &self,
        response: NewResponse,
    ) -> Result<PrequalificationResponse, RepositoryError>;
    /// Overwrites status, notes, and `updated_at` of the row with the same id.
    fn update_response(&self, response: &PrequalificationResponse) -> Result<(), RepositoryError>;
    fn fetch_response(
        &self,
        project_id: ProjectId,
        contractor_id: CompanyId,
    ) -> Result<Option<PrequalificationResponse>, RepositoryError>;
    fn list_responses(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<PrequalificationResponse>, RepositoryError>;
}
