//! Word-cloud rendering over HTTP.
//!
//! The renderer receives `{"text": ..., <options>}` as JSON. Three response
//! shapes are understood:
//!
//! | Response `Content-Type` | Returned reference |
//! |-------------------------|--------------------|
//! | `application/json` with a `url` field | that URL |
//! | `image/*` | `data:<mime>;base64,<body>` |
//! | `text/*` (or none) | the trimmed body |
//!
//! Anything else, an empty body, or a non-2xx status is `RenderingFailed`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use docstat_core::{
    base_media_type, defaults, Error, Result, WordCloudOptions, WordCloudRenderer,
};

/// Settings for the word-cloud renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCloudConfig {
    pub api_url: String,
    pub timeout_secs: u64,
    /// When false no renderer is called and analyses carry no word-cloud URL.
    pub enabled: bool,
    /// Stop-word language tag sent with every request.
    pub language: String,
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            api_url: defaults::WORDCLOUD_API_URL.to_string(),
            timeout_secs: defaults::WORDCLOUD_TIMEOUT_SECS,
            enabled: true,
            language: defaults::WORDCLOUD_LANGUAGE.to_string(),
        }
    }
}

impl WordCloudConfig {
    /// Read `WORDCLOUD_API_URL`, `WORDCLOUD_TIMEOUT_SECS`, `WORDCLOUD_ENABLED`
    /// and `WORDCLOUD_LANGUAGE`.
    pub fn from_env() -> Self {
        let api_url = std::env::var("WORDCLOUD_API_URL")
            .unwrap_or_else(|_| defaults::WORDCLOUD_API_URL.to_string());
        let timeout_secs = std::env::var("WORDCLOUD_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::WORDCLOUD_TIMEOUT_SECS);
        let enabled = std::env::var("WORDCLOUD_ENABLED")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);
        let language = std::env::var("WORDCLOUD_LANGUAGE")
            .unwrap_or_else(|_| defaults::WORDCLOUD_LANGUAGE.to_string());

        Self {
            api_url,
            timeout_secs,
            enabled,
            language,
        }
    }

    /// Rendering options for this configuration.
    pub fn options(&self) -> WordCloudOptions {
        WordCloudOptions::default().with_language(self.language.clone())
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

#[derive(Serialize)]
struct RenderRequest<'a> {
    text: &'a str,
    #[serde(flatten)]
    options: &'a WordCloudOptions,
}

#[derive(Deserialize)]
struct RenderResponse {
    url: Option<String>,
}

/// [`WordCloudRenderer`] calling a QuickChart-compatible HTTP endpoint.
#[derive(Clone)]
pub struct HttpWordCloudRenderer {
    client: Client,
    api_url: String,
}

impl HttpWordCloudRenderer {
    pub fn new(api_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    pub fn from_config(config: &WordCloudConfig) -> Result<Self> {
        Self::new(config.api_url.clone(), config.timeout_secs)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl WordCloudRenderer for HttpWordCloudRenderer {
    async fn render(&self, text: &str, options: &WordCloudOptions) -> Result<String> {
        let start = Instant::now();

        let response = self
            .client
            .post(&self.api_url)
            .json(&RenderRequest { text, options })
            .send()
            .await
            .map_err(|e| Error::RenderingFailed(format!("Renderer request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                subsystem = "analysis",
                component = "wordcloud",
                op = "render",
                status = status.as_u16(),
                "Renderer rejected request"
            );
            return Err(Error::RenderingFailed(format!(
                "Renderer returned {}: {}",
                status, body
            )));
        }

        let media_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(base_media_type)
            .unwrap_or_default();
        let body = response.bytes().await.map_err(|e| {
            Error::RenderingFailed(format!("Failed to read renderer response: {}", e))
        })?;

        let reference = reference_from_body(&media_type, &body)?;
        debug!(
            subsystem = "analysis",
            component = "wordcloud",
            op = "render",
            media_type = %media_type,
            duration_ms = start.elapsed().as_millis() as u64,
            "Word cloud rendered"
        );
        Ok(reference)
    }
}

/// Turn a successful renderer response into a URL or image reference.
fn reference_from_body(media_type: &str, body: &[u8]) -> Result<String> {
    if body.is_empty() {
        return Err(Error::RenderingFailed(
            "Renderer returned an empty body".to_string(),
        ));
    }

    if media_type == "application/json" {
        let parsed: RenderResponse = serde_json::from_slice(body).map_err(|e| {
            Error::RenderingFailed(format!("Failed to parse renderer response: {}", e))
        })?;
        return parsed
            .url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| Error::RenderingFailed("Renderer response has no url".to_string()));
    }

    if media_type.starts_with("image/") {
        return Ok(format!("data:{};base64,{}", media_type, STANDARD.encode(body)));
    }

    if media_type.is_empty() || media_type.starts_with("text/") {
        let text = std::str::from_utf8(body)
            .map_err(|_| Error::RenderingFailed("Renderer returned non-UTF-8 text".to_string()))?
            .trim();
        if text.is_empty() {
            return Err(Error::RenderingFailed(
                "Renderer returned an empty body".to_string(),
            ));
        }
        return Ok(text.to_string());
    }

    Err(Error::RenderingFailed(format!(
        "Unsupported renderer response type: {}",
        media_type
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_url_response() {
        let body = br#"{"url":"https://quickchart.io/wordcloud/abc.png"}"#;
        assert_eq!(
            reference_from_body("application/json", body).unwrap(),
            "https://quickchart.io/wordcloud/abc.png"
        );
    }

    #[test]
    fn test_json_without_url_fails() {
        let result = reference_from_body("application/json", br#"{"status":"ok"}"#);
        assert!(matches!(result, Err(Error::RenderingFailed(_))));

        let result = reference_from_body("application/json", br#"{"url":"  "}"#);
        assert!(matches!(result, Err(Error::RenderingFailed(_))));
    }

    #[test]
    fn test_image_response_becomes_data_url() {
        let reference = reference_from_body("image/png", &[0x89, b'P', b'N', b'G']).unwrap();
        assert_eq!(reference, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_text_response_is_trimmed() {
        assert_eq!(
            reference_from_body("text/plain", b"  https://cdn.test/x.svg\n").unwrap(),
            "https://cdn.test/x.svg"
        );
        assert_eq!(
            reference_from_body("", b"https://cdn.test/y.png").unwrap(),
            "https://cdn.test/y.png"
        );
    }

    #[test]
    fn test_empty_and_unknown_bodies_fail() {
        assert!(matches!(
            reference_from_body("image/png", b""),
            Err(Error::RenderingFailed(_))
        ));
        assert!(matches!(
            reference_from_body("text/plain", b" \n "),
            Err(Error::RenderingFailed(_))
        ));
        assert!(matches!(
            reference_from_body("application/pdf", b"%PDF"),
            Err(Error::RenderingFailed(_))
        ));
    }

    #[test]
    fn test_request_body_flattens_options() {
        let options = WordCloudOptions::default().with_language("ru");
        let json = serde_json::to_value(RenderRequest {
            text: "hello world",
            options: &options,
        })
        .unwrap();
        assert_eq!(json["text"], "hello world");
        assert_eq!(json["language"], "ru");
        assert_eq!(json["maxNumWords"], 100);
        assert_eq!(json["removeStopwords"], true);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(" OFF "));
        assert!(!parse_flag("0"));
    }

    #[test]
    fn test_config_options_use_language() {
        let config = WordCloudConfig {
            language: "de".to_string(),
            ..Default::default()
        };
        assert_eq!(config.options().language, "de");
        assert!(WordCloudConfig::default().enabled);
    }
}
