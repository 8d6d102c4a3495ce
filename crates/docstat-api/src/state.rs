use docstat_analysis::AnalysisPipeline;

use crate::services::ContentStore;

/// Shared state of the file-storage service.
#[derive(Clone)]
pub struct StorageState {
    pub store: ContentStore,
}

/// Shared state of the file-analysis service.
#[derive(Clone)]
pub struct AnalysisState {
    pub pipeline: AnalysisPipeline,
}
