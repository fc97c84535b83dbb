//! Data models for transcripts.

use serde::{Deserialize, Serialize};

/// Platform a transcript was acquired from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    YouTube,
    TikTok,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::YouTube => write!(f, "youtube"),
            Platform::TikTok => write!(f, "tiktok"),
        }
    }
}

/// A single timed fragment of a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start time in milliseconds.
    pub start_ms: u64,
    /// End time in milliseconds, when the provider supplies one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_ms: Option<u64>,
    /// Transcribed text content.
    pub text: String,
}

impl TranscriptSegment {
    /// Create a new transcript segment.
    pub fn new(start_ms: u64, end_ms: Option<u64>, text: impl Into<String>) -> Self {
        Self {
            start_ms,
            end_ms,
            text: text.into(),
        }
    }
}

/// A canonical transcript: full text plus optional timed segments.
///
/// Segments, when present, are in provider order and their concatenated text
/// renders `full_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// Full transcript text.
    pub full_text: String,
    /// Timed segments, when the provider supplies them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<TranscriptSegment>>,
    /// Language code, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Platform the transcript came from.
    pub platform: Platform,
}

impl Transcript {
    /// Create a transcript from segments, deriving the full text.
    pub fn from_segments(
        segments: Vec<TranscriptSegment>,
        language: Option<String>,
        platform: Platform,
    ) -> Self {
        let full_text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            full_text,
            segments: if segments.is_empty() { None } else { Some(segments) },
            language,
            platform,
        }
    }

    /// Create a transcript from flat text with no timing information.
    pub fn from_text(text: impl Into<String>, language: Option<String>, platform: Platform) -> Self {
        Self {
            full_text: text.into(),
            segments: None,
            language,
            platform,
        }
    }

    /// Whether the transcript carries any text at all.
    pub fn is_empty(&self) -> bool {
        self.full_text.is_empty() && self.segments.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_segments_derives_full_text() {
        let transcript = Transcript::from_segments(
            vec![
                TranscriptSegment::new(0, Some(5_000), "Hello world"),
                TranscriptSegment::new(5_000, Some(10_000), "This is a test"),
            ],
            Some("en".to_string()),
            Platform::YouTube,
        );

        assert_eq!(transcript.full_text, "Hello world This is a test");
        assert_eq!(transcript.segments.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_segments_collapse_to_none() {
        let transcript = Transcript::from_segments(Vec::new(), None, Platform::YouTube);
        assert_eq!(transcript.full_text, "");
        assert!(transcript.segments.is_none());
        assert!(transcript.is_empty());
    }
}
