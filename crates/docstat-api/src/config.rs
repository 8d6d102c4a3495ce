//! Environment configuration for the two services.
//!
//! Variables (a `.env` file is loaded first by the binaries):
//!
//! | Variable | Service | Default |
//! |----------|---------|---------|
//! | `DATABASE_URL` | both | `postgres://localhost/docstat` |
//! | `HOST` | both | `0.0.0.0` |
//! | `PORT` | both | 8081 storage, 8082 analysis |
//! | `DB_MAX_CONNECTIONS` | both | 10 |
//! | `MAX_UPLOAD_BYTES` | storage | 10 MiB |
//! | `STORAGE_SERVICE_URL`, `STORAGE_TIMEOUT_SECS` | analysis | `http://localhost:8081`, 10 |
//! | `WORDCLOUD_API_URL`, `WORDCLOUD_TIMEOUT_SECS` | analysis | QuickChart, 30 |
//! | `WORDCLOUD_ENABLED`, `WORDCLOUD_LANGUAGE` | analysis | `true`, `en` |

use std::str::FromStr;

use docstat_analysis::{ContentClientConfig, WordCloudConfig};
use docstat_core::defaults;

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// File-storage service settings.
#[derive(Debug, Clone)]
pub struct StorageServiceConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub max_upload_bytes: usize,
}

impl StorageServiceConfig {
    pub fn from_env() -> Self {
        Self {
            host: env_string("HOST", defaults::HOST),
            port: env_or("PORT", defaults::STORAGE_PORT),
            database_url: env_string("DATABASE_URL", defaults::DATABASE_URL),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", defaults::DB_MAX_CONNECTIONS),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", defaults::MAX_UPLOAD_BYTES),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// File-analysis service settings.
#[derive(Debug, Clone)]
pub struct AnalysisServiceConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub content: ContentClientConfig,
    pub word_cloud: WordCloudConfig,
}

impl AnalysisServiceConfig {
    pub fn from_env() -> Self {
        Self {
            host: env_string("HOST", defaults::HOST),
            port: env_or("PORT", defaults::ANALYSIS_PORT),
            database_url: env_string("DATABASE_URL", defaults::DATABASE_URL),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", defaults::DB_MAX_CONNECTIONS),
            content: ContentClientConfig::from_env(),
            word_cloud: WordCloudConfig::from_env(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_on_unparsable_value() {
        std::env::set_var("DOCSTAT_TEST_BAD_PORT", "not-a-port");
        assert_eq!(env_or("DOCSTAT_TEST_BAD_PORT", 8081u16), 8081);
        std::env::remove_var("DOCSTAT_TEST_BAD_PORT");
    }

    #[test]
    fn test_env_or_reads_value() {
        std::env::set_var("DOCSTAT_TEST_LIMIT", "2048");
        assert_eq!(env_or("DOCSTAT_TEST_LIMIT", 1usize), 2048);
        std::env::remove_var("DOCSTAT_TEST_LIMIT");
    }

    #[test]
    fn test_bind_addr() {
        let config = StorageServiceConfig {
            host: "127.0.0.1".into(),
            port: 9000,
            database_url: defaults::DATABASE_URL.into(),
            db_max_connections: 1,
            max_upload_bytes: 1,
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
    }
}
