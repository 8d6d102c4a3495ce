//! Centralized default constants for docstat.
//!
//! Both services and their clients read defaults from here instead of
//! repeating literals. Environment variables override most of them at startup.

// =============================================================================
// SERVER
// =============================================================================

/// Default bind host for both services.
pub const HOST: &str = "0.0.0.0";

/// Default port of the file-storage service.
pub const STORAGE_PORT: u16 = 8081;

/// Default port of the file-analysis service.
pub const ANALYSIS_PORT: u16 = 8082;

/// Default database URL when `DATABASE_URL` is not set.
pub const DATABASE_URL: &str = "postgres://localhost/docstat";

// =============================================================================
// UPLOADS
// =============================================================================

/// Maximum accepted upload size in bytes (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Extra request body allowance for multipart framing on top of the upload size.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Multipart field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

/// Display name used when the client sends no file name.
pub const UNNAMED_FILE: &str = "unnamed.txt";

/// The only media type accepted for uploads.
pub const TEXT_MEDIA_TYPE: &str = "text/plain";

// =============================================================================
// UPSTREAM CLIENTS
// =============================================================================

/// Base URL of the file-storage service as seen from the analysis service.
pub const STORAGE_SERVICE_URL: &str = "http://localhost:8081";

/// Timeout for content fetches from the storage service (seconds).
pub const STORAGE_TIMEOUT_SECS: u64 = 10;

/// Word-cloud rendering endpoint (QuickChart-compatible).
pub const WORDCLOUD_API_URL: &str = "https://quickchart.io/wordcloud";

/// Timeout for word-cloud rendering requests (seconds).
pub const WORDCLOUD_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// WORD CLOUD PRESETS
// =============================================================================

/// Maximum number of words drawn in a word cloud.
pub const WORDCLOUD_MAX_WORDS: u32 = 100;

/// Minimum word length considered by the renderer.
pub const WORDCLOUD_MIN_WORD_LENGTH: u32 = 3;

/// Background color preset.
pub const WORDCLOUD_BACKGROUND: &str = "#ffffff";

/// Font family preset.
pub const WORDCLOUD_FONT: &str = "sans-serif";

/// Language tag used for stop-word removal.
pub const WORDCLOUD_LANGUAGE: &str = "en";

/// Rendered image format.
pub const WORDCLOUD_FORMAT: &str = "png";

/// Rendered image width in pixels.
pub const WORDCLOUD_WIDTH: u32 = 800;

/// Rendered image height in pixels.
pub const WORDCLOUD_HEIGHT: u32 = 600;

// =============================================================================
// DATABASE POOL
// =============================================================================

/// Default maximum number of pooled connections.
pub const DB_MAX_CONNECTIONS: u32 = 10;

/// Default pool acquire timeout in seconds.
pub const DB_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default idle timeout in seconds.
pub const DB_IDLE_TIMEOUT_SECS: u64 = 600;
