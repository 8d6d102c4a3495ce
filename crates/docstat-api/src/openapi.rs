use utoipa::OpenApi;

use docstat_core::{AnalysisRecord, UploadOutcome};

use crate::error::ErrorBody;
use crate::handlers::{analysis, files};

/// OpenAPI document of the file-storage service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "docstat storage",
        description = "Content-addressed text file store with SHA-256 deduplication"
    ),
    paths(
        files::upload_file,
        files::get_file,
        files::get_file_by_hash,
        files::delete_file
    ),
    components(schemas(UploadOutcome, ErrorBody, files::UploadForm)),
    tags((name = "Files", description = "Upload, download and delete text files"))
)]
pub struct StorageApiDoc;

/// OpenAPI document of the file-analysis service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "docstat analysis",
        description = "Paragraph, word and symbol counts with a word cloud, memoized per file"
    ),
    paths(
        analysis::analyze_file,
        analysis::analysis_exists,
        analysis::delete_analysis
    ),
    components(schemas(AnalysisRecord, ErrorBody)),
    tags((name = "Analysis", description = "Cached text statistics"))
)]
pub struct AnalysisApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_document_lists_file_routes() {
        let doc = StorageApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        assert!(paths.contains(&"/api/files/upload".to_string()));
        assert!(paths.contains(&"/api/files/{id}".to_string()));
        assert!(paths.contains(&"/api/files/hash/{hash}".to_string()));
    }

    #[test]
    fn test_analysis_document_lists_analysis_routes() {
        let doc = AnalysisApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/analysis/{fileId}"));
        assert!(doc.paths.paths.contains_key("/api/analysis/exists/{fileId}"));
    }
}
