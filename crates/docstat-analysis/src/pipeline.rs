//! Cache-or-compute orchestration for file analysis.
//!
//! `analyze` consults the analysis repository first. A hit is returned
//! verbatim and touches neither the content store nor the renderer. A miss
//! fetches the text, computes [`TextStats`], renders the word cloud and
//! persists the record with an insert-once write; a concurrent writer that
//! lost the race returns the winner's record.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};
use uuid::Uuid;

use docstat_core::{
    AnalysisRecord, AnalysisRepository, CacheLookup, ContentSource, Error, Result, TextStats,
    WordCloudOptions, WordCloudRenderer,
};

/// Analysis pipeline with its embedded result cache.
#[derive(Clone)]
pub struct AnalysisPipeline {
    repository: Arc<dyn AnalysisRepository>,
    content: Arc<dyn ContentSource>,
    renderer: Option<Arc<dyn WordCloudRenderer>>,
    options: WordCloudOptions,
}

impl AnalysisPipeline {
    /// Create a pipeline without word-cloud rendering.
    pub fn new(repository: Arc<dyn AnalysisRepository>, content: Arc<dyn ContentSource>) -> Self {
        Self {
            repository,
            content,
            renderer: None,
            options: WordCloudOptions::default(),
        }
    }

    /// Render a word cloud for every computed analysis.
    pub fn with_renderer(mut self, renderer: Arc<dyn WordCloudRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Options sent with every render request.
    pub fn with_options(mut self, options: WordCloudOptions) -> Self {
        self.options = options;
        self
    }

    pub fn renders_word_cloud(&self) -> bool {
        self.renderer.is_some()
    }

    /// Return the stored analysis for `file_id`, computing and storing it on first use.
    ///
    /// Fetch, validation and rendering failures are reported as
    /// `AnalysisFailed` naming the file. Repository failures propagate as-is.
    pub async fn analyze(&self, file_id: Uuid) -> Result<AnalysisRecord> {
        let start = Instant::now();

        if let CacheLookup::Hit(record) = self.repository.lookup(file_id).await? {
            debug!(
                subsystem = "analysis",
                component = "pipeline",
                op = "analyze",
                file_id = %file_id,
                cache_hit = true,
                "Returning stored analysis"
            );
            return Ok(record);
        }

        let computed = self
            .compute(file_id)
            .await
            .map_err(|e| Error::analysis_failed(file_id, e))?;
        let stored = self.repository.insert_once(computed).await?;

        info!(
            subsystem = "analysis",
            component = "pipeline",
            op = "analyze",
            file_id = %file_id,
            cache_hit = false,
            paragraphs = stored.paragraphs_count,
            words = stored.words_count,
            symbols = stored.symbols_count,
            duration_ms = start.elapsed().as_millis() as u64,
            "Analysis stored"
        );
        Ok(stored)
    }

    async fn compute(&self, file_id: Uuid) -> Result<AnalysisRecord> {
        let text = self.content.fetch_text(file_id).await?;
        if text.trim().is_empty() {
            return Err(Error::InvalidInput(format!(
                "File {} has no text to analyze",
                file_id
            )));
        }

        let stats = TextStats::compute(&text);

        let word_cloud_url = match &self.renderer {
            Some(renderer) => Some(renderer.render(&text, &self.options).await?),
            None => None,
        };

        Ok(AnalysisRecord::from_stats(file_id, stats, word_cloud_url))
    }

    /// Whether an analysis is stored for `file_id`.
    ///
    /// Never fails; a repository error is logged and reported as `false`.
    pub async fn exists(&self, file_id: Uuid) -> bool {
        match self.repository.exists(file_id).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!(
                    subsystem = "analysis",
                    component = "pipeline",
                    op = "exists",
                    file_id = %file_id,
                    error = %e,
                    "Analysis lookup failed"
                );
                false
            }
        }
    }

    /// Remove the stored analysis for `file_id`. The file itself is untouched.
    pub async fn delete(&self, file_id: Uuid) -> Result<()> {
        self.repository.delete(file_id).await?;
        info!(
            subsystem = "analysis",
            component = "pipeline",
            op = "delete",
            file_id = %file_id,
            "Analysis deleted"
        );
        Ok(())
    }
}
