//! Data model shared by the file-storage and file-analysis services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults;
use crate::error::{Error, Result};
use crate::stats::TextStats;

// =============================================================================
// CONTENT STORE
// =============================================================================

/// A stored file. `hash` is unique across all records; `content` never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FileRecord {
    pub id: Uuid,
    /// Display name of the first upload; not part of the identity.
    pub name: String,
    /// Lowercase hex SHA-256 of `content`.
    pub hash: String,
    #[serde(skip)]
    pub content: Vec<u8>,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
}

impl FileRecord {
    /// Borrow the content as UTF-8 text.
    pub fn text(&self) -> Result<&str> {
        std::str::from_utf8(&self.content).map_err(|_| {
            Error::InvalidInput(format!("File {} is not valid UTF-8 text", self.id))
        })
    }
}

/// Result of an upload: the record's id and whether the content was already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UploadOutcome {
    pub id: Uuid,
    /// `true` when identical content was already stored and no record was created.
    pub existed: bool,
}

impl UploadOutcome {
    pub fn created(id: Uuid) -> Self {
        Self { id, existed: false }
    }

    pub fn existing(id: Uuid) -> Self {
        Self { id, existed: true }
    }
}

// =============================================================================
// ANALYSIS CACHE
// =============================================================================

/// Memoized statistics for one file. At most one exists per `file_id`.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, utoipa::ToSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub file_id: Uuid,
    pub paragraphs_count: i64,
    pub words_count: i64,
    pub symbols_count: i64,
    /// Reference to the rendered word cloud, absent when rendering is disabled.
    pub word_cloud_url: Option<String>,
}

impl AnalysisRecord {
    /// Build a record from computed statistics.
    pub fn from_stats(file_id: Uuid, stats: TextStats, word_cloud_url: Option<String>) -> Self {
        Self {
            file_id,
            paragraphs_count: saturating_i64(stats.paragraphs),
            words_count: saturating_i64(stats.words),
            symbols_count: saturating_i64(stats.symbols),
            word_cloud_url,
        }
    }
}

fn saturating_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Outcome of an analysis cache lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// A stored record exists and must be returned verbatim.
    Hit(AnalysisRecord),
    /// Nothing stored yet; the caller computes and persists.
    Miss,
}

impl From<Option<AnalysisRecord>> for CacheLookup {
    fn from(value: Option<AnalysisRecord>) -> Self {
        value.map_or(CacheLookup::Miss, CacheLookup::Hit)
    }
}

// =============================================================================
// WORD CLOUD
// =============================================================================

/// Fixed rendering configuration sent to the word-cloud renderer.
///
/// Field names follow the QuickChart word cloud API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordCloudOptions {
    pub format: String,
    pub width: u32,
    pub height: u32,
    pub background_color: String,
    pub font_family: String,
    pub remove_stopwords: bool,
    pub min_word_length: u32,
    #[serde(rename = "maxNumWords")]
    pub max_words: u32,
    pub language: String,
}

impl Default for WordCloudOptions {
    fn default() -> Self {
        Self {
            format: defaults::WORDCLOUD_FORMAT.to_string(),
            width: defaults::WORDCLOUD_WIDTH,
            height: defaults::WORDCLOUD_HEIGHT,
            background_color: defaults::WORDCLOUD_BACKGROUND.to_string(),
            font_family: defaults::WORDCLOUD_FONT.to_string(),
            remove_stopwords: true,
            min_word_length: defaults::WORDCLOUD_MIN_WORD_LENGTH,
            max_words: defaults::WORDCLOUD_MAX_WORDS,
            language: defaults::WORDCLOUD_LANGUAGE.to_string(),
        }
    }
}

impl WordCloudOptions {
    /// Override the stop-word language tag.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_record_json_uses_camel_case() {
        let record = AnalysisRecord {
            file_id: Uuid::nil(),
            paragraphs_count: 2,
            words_count: 6,
            symbols_count: 40,
            word_cloud_url: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["fileId"], Uuid::nil().to_string());
        assert_eq!(json["paragraphsCount"], 2);
        assert_eq!(json["wordsCount"], 6);
        assert_eq!(json["symbolsCount"], 40);
        assert!(json["wordCloudUrl"].is_null());
    }

    #[test]
    fn test_upload_outcome_json() {
        let id = Uuid::new_v4();
        let json = serde_json::to_value(UploadOutcome::existing(id)).unwrap();
        assert_eq!(json, serde_json::json!({ "id": id, "existed": true }));
        assert!(!UploadOutcome::created(id).existed);
    }

    #[test]
    fn test_from_stats() {
        let id = Uuid::new_v4();
        let stats = TextStats {
            paragraphs: 1,
            words: 2,
            symbols: 3,
        };
        let record = AnalysisRecord::from_stats(id, stats, Some("u".into()));
        assert_eq!(record.file_id, id);
        assert_eq!(record.paragraphs_count, 1);
        assert_eq!(record.words_count, 2);
        assert_eq!(record.symbols_count, 3);
        assert_eq!(record.word_cloud_url.as_deref(), Some("u"));
    }

    #[test]
    fn test_cache_lookup_from_option() {
        assert_eq!(CacheLookup::from(None), CacheLookup::Miss);
        let record = AnalysisRecord::from_stats(Uuid::nil(), TextStats::default(), None);
        assert_eq!(
            CacheLookup::from(Some(record.clone())),
            CacheLookup::Hit(record)
        );
    }

    #[test]
    fn test_word_cloud_defaults() {
        let opts = WordCloudOptions::default();
        assert_eq!(opts.max_words, 100);
        assert_eq!(opts.min_word_length, 3);
        assert!(opts.remove_stopwords);

        let json = serde_json::to_value(&opts).unwrap();
        assert_eq!(json["maxNumWords"], 100);
        assert_eq!(json["minWordLength"], 3);
        assert_eq!(json["removeStopwords"], true);
        assert_eq!(json["backgroundColor"], "#ffffff");
        assert_eq!(json["fontFamily"], "sans-serif");
    }

    #[test]
    fn test_file_record_text() {
        let record = FileRecord {
            id: Uuid::nil(),
            name: "a.txt".into(),
            hash: crate::compute_content_hash(b"hi"),
            content: b"hi".to_vec(),
            size_bytes: 2,
            created_at: Utc::now(),
        };
        assert_eq!(record.text().unwrap(), "hi");

        let bad = FileRecord {
            content: vec![0xFF],
            ..record
        };
        assert!(matches!(bad.text(), Err(Error::InvalidInput(_))));
    }
}
