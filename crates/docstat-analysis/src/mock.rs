//! Mock collaborators for deterministic testing.
//!
//! Both mocks record every call so tests can assert exactly how often the
//! pipeline reached the content store or the renderer.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use docstat_analysis::mock::{MockContentSource, MockWordCloudRenderer};
//!
//! let content = MockContentSource::new().with_file(file_id, "Hello world.");
//! let renderer = MockWordCloudRenderer::new().with_url("https://cdn.test/cloud.png");
//! // ... run the pipeline ...
//! assert_eq!(content.fetch_count(), 1);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use docstat_core::{ContentSource, Error, Result, WordCloudOptions, WordCloudRenderer};

fn record<T>(log: &Mutex<Vec<T>>, entry: T) {
    if let Ok(mut calls) = log.lock() {
        calls.push(entry);
    }
}

fn snapshot<T: Clone>(log: &Mutex<Vec<T>>) -> Vec<T> {
    log.lock().map(|calls| calls.clone()).unwrap_or_default()
}

/// In-memory [`ContentSource`] serving fixed texts by file id.
#[derive(Clone, Default)]
pub struct MockContentSource {
    files: Arc<HashMap<Uuid, String>>,
    unavailable: bool,
    latency_ms: u64,
    calls: Arc<Mutex<Vec<Uuid>>>,
}

impl MockContentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `text` for `file_id`.
    pub fn with_file(mut self, file_id: Uuid, text: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.files).insert(file_id, text.into());
        self
    }

    /// Report the store as unreachable on every fetch.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Delay every fetch.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Ids requested so far, in call order.
    pub fn calls(&self) -> Vec<Uuid> {
        snapshot(&self.calls)
    }

    /// Number of fetches so far.
    pub fn fetch_count(&self) -> usize {
        self.calls().len()
    }
}

#[async_trait]
impl ContentSource for MockContentSource {
    async fn fetch_text(&self, file_id: Uuid) -> Result<String> {
        record(&self.calls, file_id);
        if self.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.latency_ms)).await;
        }

        if self.unavailable {
            return Err(Error::UpstreamUnavailable(
                "mock content store is down".to_string(),
            ));
        }

        self.files
            .get(&file_id)
            .cloned()
            .ok_or(Error::FileNotFound(file_id))
    }
}

/// A call received by [`MockWordCloudRenderer`].
#[derive(Debug, Clone)]
pub struct RenderCall {
    pub text: String,
    pub options: WordCloudOptions,
}

/// [`WordCloudRenderer`] returning a fixed reference.
#[derive(Clone)]
pub struct MockWordCloudRenderer {
    url: String,
    failing: bool,
    calls: Arc<Mutex<Vec<RenderCall>>>,
}

impl Default for MockWordCloudRenderer {
    fn default() -> Self {
        Self {
            url: "https://wordcloud.test/mock.png".to_string(),
            failing: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockWordCloudRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `url` from every successful render.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Fail every render with `RenderingFailed`.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// The reference returned on success.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        snapshot(&self.calls)
    }

    /// Number of render calls so far.
    pub fn render_count(&self) -> usize {
        self.calls().len()
    }
}

#[async_trait]
impl WordCloudRenderer for MockWordCloudRenderer {
    async fn render(&self, text: &str, options: &WordCloudOptions) -> Result<String> {
        record(
            &self.calls,
            RenderCall {
                text: text.to_string(),
                options: options.clone(),
            },
        );

        if self.failing {
            return Err(Error::RenderingFailed("mock renderer failed".to_string()));
        }
        Ok(self.url.clone())
    }
}
