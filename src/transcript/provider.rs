//! Transcript search-API client.
//!
//! Thin HTTP wrapper over a search-engine-style transcript provider. Every
//! method returns the raw JSON payload; shape handling lives in
//! [`super::normalize`] and fallback sequencing in [`super::fallback`].

use crate::error::{Result, SamleError};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

const API_BASE_URL: &str = "https://www.searchapi.io/api/v1/search";

/// One parameterized variant of the transcript-search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchVariant {
    /// Restrict to auto-generated transcripts.
    pub auto_generated: bool,
    /// Restrict to a specific language code.
    pub with_language: bool,
}

impl SearchVariant {
    /// Short label for logging and attempt records.
    pub fn label(&self) -> &'static str {
        match (self.auto_generated, self.with_language) {
            (true, true) => "auto_generated+language",
            (true, false) => "auto_generated",
            (false, true) => "language",
            (false, false) => "unconstrained",
        }
    }
}

/// Async surface of the transcript provider.
///
/// A trait seam so the fallback chain can be exercised against a mock
/// provider in tests.
#[async_trait]
pub trait TranscriptApi: Send + Sync {
    /// Look up video/episode metadata by platform identifier.
    async fn video_metadata(&self, video_id: &str) -> Result<Value>;

    /// Follow a transcript link returned inside another payload.
    async fn fetch_url(&self, url: &str) -> Result<Value>;

    /// Run one parameterized transcript-search call.
    async fn search_transcript(
        &self,
        video_id: &str,
        language: &str,
        variant: SearchVariant,
    ) -> Result<Value>;
}

/// HTTP implementation of [`TranscriptApi`].
pub struct SearchApiClient {
    client: reqwest::Client,
    api_key: String,
}

impl SearchApiClient {
    /// Create a client, failing with a typed error when no API key is
    /// configured. The network is never touched without a key.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let api_key = api_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| SamleError::NotConfigured("Transcript provider".to_string()))?;

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
        })
    }

    async fn get_json(&self, query: &[(&str, &str)]) -> Result<Value> {
        let response = self
            .client
            .get(API_BASE_URL)
            .query(query)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SamleError::TranscriptSource(format!(
                "Provider returned HTTP {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl TranscriptApi for SearchApiClient {
    #[instrument(skip(self))]
    async fn video_metadata(&self, video_id: &str) -> Result<Value> {
        debug!("Fetching video metadata");
        self.get_json(&[("engine", "youtube_video"), ("video_id", video_id)])
            .await
    }

    #[instrument(skip(self))]
    async fn fetch_url(&self, url: &str) -> Result<Value> {
        debug!("Following transcript link");
        let response = self.client.get(url).bearer_auth(&self.api_key).send().await?;

        if !response.status().is_success() {
            return Err(SamleError::TranscriptSource(format!(
                "Transcript link returned HTTP {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    #[instrument(skip(self, variant), fields(variant = variant.label()))]
    async fn search_transcript(
        &self,
        video_id: &str,
        language: &str,
        variant: SearchVariant,
    ) -> Result<Value> {
        debug!("Searching for transcript");

        let mut query = vec![
            ("engine", "youtube_transcripts"),
            ("video_id", video_id),
        ];
        if variant.auto_generated {
            query.push(("transcript_type", "auto_generated"));
        }
        if variant.with_language {
            query.push(("lang", language));
        }

        self.get_json(&query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_is_a_config_error() {
        assert!(matches!(
            SearchApiClient::new(None),
            Err(SamleError::NotConfigured(_))
        ));
        assert!(matches!(
            SearchApiClient::new(Some(String::new())),
            Err(SamleError::NotConfigured(_))
        ));
        assert!(SearchApiClient::new(Some("key".to_string())).is_ok());
    }

    #[test]
    fn test_variant_labels() {
        let variant = SearchVariant {
            auto_generated: true,
            with_language: false,
        };
        assert_eq!(variant.label(), "auto_generated");
    }
}
