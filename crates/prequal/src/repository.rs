use axum::http::StatusCode;

/// Failure reported by a storage backend. Every repository trait in the crate shares it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("{entity} already exists: {detail}")]
    Conflict { entity: &'static str, detail: String },
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("{relation} references missing {entity} {id}")]
    ForeignKey {
        relation: &'static str,
        entity: &'static str,
        id: i64,
    },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    pub(crate) fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    pub(crate) fn status_code(&self) -> StatusCode {
        match self {
            RepositoryError::Conflict { .. } => StatusCode::CONFLICT,
            RepositoryError::NotFound { .. } => StatusCode::NOT_FOUND,
            RepositoryError::ForeignKey { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            RepositoryError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
