//! Ordered transcript-fetch fallback chain.
//!
//! One acquisition request walks a fixed, linear sequence of attempts:
//! metadata lookup, then the direct transcript link when the metadata carries
//! one, then four search variants in order, then the first alternative
//! transcript reference exposed by the last search response. Each step runs
//! at most once and steps execute sequentially, which bounds the worst case
//! to a fixed small number of provider calls. Retry and timeout policy
//! belong to the transport, not to this chain.

use super::models::{Platform, Transcript};
use super::normalize::normalize;
use super::provider::{SearchVariant, TranscriptApi};
use crate::error::{Result, SamleError};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Identifies one strategy in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyId {
    Metadata,
    PrimaryLink,
    SearchVariant(usize),
    AlternativeReference,
}

/// Record of one strategy try. Scoped to a single acquisition call and used
/// only for sequencing and diagnostics; never persisted.
#[derive(Debug, Clone)]
pub struct FetchAttempt {
    pub strategy: StrategyId,
    pub succeeded: bool,
    pub error_reason: Option<String>,
}

impl FetchAttempt {
    fn success(strategy: StrategyId) -> Self {
        Self {
            strategy,
            succeeded: true,
            error_reason: None,
        }
    }

    fn failure(strategy: StrategyId, reason: impl Into<String>) -> Self {
        Self {
            strategy,
            succeeded: false,
            error_reason: Some(reason.into()),
        }
    }
}

/// The four search variants, strictly in fallback order.
const SEARCH_VARIANTS: [SearchVariant; 4] = [
    SearchVariant {
        auto_generated: true,
        with_language: true,
    },
    SearchVariant {
        auto_generated: true,
        with_language: false,
    },
    SearchVariant {
        auto_generated: false,
        with_language: true,
    },
    SearchVariant {
        auto_generated: false,
        with_language: false,
    },
];

/// Fetches transcripts from the search provider with ordered fallback.
pub struct TranscriptFetcher<A: TranscriptApi> {
    api: A,
    language: String,
}

impl<A: TranscriptApi> TranscriptFetcher<A> {
    /// Create a fetcher with a preferred transcript language.
    pub fn new(api: A, language: impl Into<String>) -> Self {
        Self {
            api,
            language: language.into(),
        }
    }

    /// Acquire a transcript for a video id, or a single typed failure after
    /// the chain is exhausted. Per-step errors never escape.
    #[instrument(skip(self))]
    pub async fn fetch(&self, video_id: &str) -> Result<Transcript> {
        let mut attempts: Vec<FetchAttempt> = Vec::new();

        // Step 1: metadata lookup. Failure here ends the chain immediately.
        let metadata = match self.api.video_metadata(video_id).await {
            Ok(metadata) => {
                attempts.push(FetchAttempt::success(StrategyId::Metadata));
                metadata
            }
            Err(e) => {
                warn!(error = %e, "Metadata lookup failed");
                return Err(SamleError::TranscriptUnavailable(format!(
                    "metadata lookup failed for {}",
                    video_id
                )));
            }
        };

        // Step 2: direct transcript link, when the metadata carries one.
        if let Some(link) = transcript_link(&metadata) {
            match self.try_payload(self.api.fetch_url(link).await) {
                Ok(transcript) => {
                    attempts.push(FetchAttempt::success(StrategyId::PrimaryLink));
                    info!(attempts = attempts.len(), "Transcript found via direct link");
                    return Ok(transcript);
                }
                Err(reason) => {
                    debug!(reason = %reason, "Direct transcript link failed");
                    attempts.push(FetchAttempt::failure(StrategyId::PrimaryLink, reason));
                }
            }
        }

        // Step 3: the four search variants, first non-empty result wins.
        let mut last_response: Option<Value> = None;
        for (index, variant) in SEARCH_VARIANTS.iter().enumerate() {
            let response = self
                .api
                .search_transcript(video_id, &self.language, *variant)
                .await;

            if let Ok(payload) = &response {
                last_response = Some(payload.clone());
            }

            match self.try_payload(response) {
                Ok(transcript) => {
                    attempts.push(FetchAttempt::success(StrategyId::SearchVariant(index)));
                    info!(
                        variant = variant.label(),
                        attempts = attempts.len(),
                        "Transcript found via search"
                    );
                    return Ok(transcript);
                }
                Err(reason) => {
                    debug!(variant = variant.label(), reason = %reason, "Search variant failed");
                    attempts.push(FetchAttempt::failure(
                        StrategyId::SearchVariant(index),
                        reason,
                    ));
                }
            }
        }

        // Step 4: first alternative transcript reference from the last
        // response, as a final attempt.
        if let Some(url) = last_response.as_ref().and_then(alternative_reference) {
            match self.try_payload(self.api.fetch_url(&url).await) {
                Ok(transcript) => {
                    attempts.push(FetchAttempt::success(StrategyId::AlternativeReference));
                    info!(
                        attempts = attempts.len(),
                        "Transcript found via alternative reference"
                    );
                    return Ok(transcript);
                }
                Err(reason) => {
                    debug!(reason = %reason, "Alternative reference failed");
                    attempts.push(FetchAttempt::failure(
                        StrategyId::AlternativeReference,
                        reason,
                    ));
                }
            }
        }

        warn!(attempts = attempts.len(), "Transcript fallback chain exhausted");
        Err(SamleError::TranscriptUnavailable(format!(
            "no transcript in a suitable language or type was found for {} after {} attempts",
            video_id,
            attempts.len()
        )))
    }

    /// Normalize a step's response, treating transport errors and empty
    /// transcripts alike as a failed attempt.
    fn try_payload(
        &self,
        response: Result<Value>,
    ) -> std::result::Result<Transcript, String> {
        match response {
            Ok(payload) => {
                let transcript = normalize(&payload, Platform::YouTube);
                if transcript.is_empty() {
                    Err("empty transcript".to_string())
                } else {
                    Ok(transcript)
                }
            }
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Direct transcript-fetch link inside a metadata payload.
fn transcript_link(metadata: &Value) -> Option<&str> {
    metadata
        .get("transcript_url")
        .or_else(|| metadata.get("transcripts_link"))
        .and_then(Value::as_str)
}

/// First alternative transcript reference exposed by a search response.
fn alternative_reference(payload: &Value) -> Option<String> {
    payload
        .get("available_transcripts")
        .and_then(Value::as_array)
        .and_then(|list| list.first())
        .and_then(|entry| entry.get("url").or_else(|| entry.get("link")))
        .and_then(Value::as_str)
        .map(String::from)
}
