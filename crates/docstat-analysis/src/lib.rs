//! # docstat-analysis
//!
//! Analysis pipeline for docstat and its remote collaborators.
//!
//! - [`AnalysisPipeline`]: cache-or-compute over an [`AnalysisRepository`](docstat_core::AnalysisRepository)
//! - [`HttpContentSource`]: reads file text from the file-storage service
//! - [`HttpWordCloudRenderer`]: QuickChart-compatible word-cloud client
//! - [`mock`]: call-counting collaborators for tests

pub mod content_client;
pub mod mock;
pub mod pipeline;
pub mod wordcloud;

pub use content_client::{ContentClientConfig, HttpContentSource};
pub use pipeline::AnalysisPipeline;
pub use wordcloud::{HttpWordCloudRenderer, WordCloudConfig};

// Re-export core types
pub use docstat_core::{
    AnalysisRecord, CacheLookup, ContentSource, Error, Result, TextStats, WordCloudOptions,
    WordCloudRenderer,
};
