//! # docstat-core
//!
//! Core types, traits, and abstractions for docstat.
//!
//! This crate provides the data model, error type, content digest, text
//! statistics and trait definitions that the storage, analysis and API
//! crates depend on.

pub mod defaults;
pub mod error;
pub mod file_safety;
pub mod hashing;
pub mod models;
pub mod stats;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use file_safety::{base_media_type, sanitize_filename, validate_text_upload};
pub use hashing::{compute_content_hash, is_valid_content_hash, normalize_content_hash};
pub use models::*;
pub use stats::TextStats;
pub use traits::*;
