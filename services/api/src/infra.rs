use metrics_exporter_prometheus::PrometheusHandle;
use prequal::directory::DirectoryService;
use prequal::error::AppError;
use prequal::prequalification::PrequalificationService;
use prequal::store::{SeedDocument, SeedSummary};
use prequal::MemoryStore;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Both services wired to one shared in-memory store.
#[derive(Clone)]
pub(crate) struct Workflow {
    pub(crate) directory: Arc<DirectoryService<MemoryStore>>,
    pub(crate) prequalification: Arc<PrequalificationService<MemoryStore, MemoryStore>>,
}

impl Workflow {
    pub(crate) fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            directory: Arc::new(DirectoryService::new(store.clone())),
            prequalification: Arc::new(PrequalificationService::new(store.clone(), store)),
        }
    }

    /// Fresh store, optionally populated from a seed file.
    pub(crate) fn load(seed_path: Option<&Path>) -> Result<(Self, SeedSummary), AppError> {
        let workflow = Self::new(Arc::new(MemoryStore::new()));
        let summary = match seed_path {
            Some(path) => SeedDocument::from_path(path)?.apply(&workflow.directory)?,
            None => SeedSummary::default(),
        };
        Ok((workflow, summary))
    }

    pub(crate) fn from_document(document: &SeedDocument) -> Result<(Self, SeedSummary), AppError> {
        let workflow = Self::new(Arc::new(MemoryStore::new()));
        let summary = document.apply(&workflow.directory)?;
        Ok((workflow, summary))
    }
}
