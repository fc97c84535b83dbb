//! Transcript source abstraction and platform dispatch.
//!
//! Each platform gets a [`TranscriptSource`]. YouTube goes through the
//! search-provider fallback chain; TikTok has a native extraction path (the
//! extractor exposes caption tracks directly) and bypasses the chain
//! entirely. Dispatch happens here, by content type, before any fetching.

use super::fallback::TranscriptFetcher;
use super::models::{Platform, Transcript};
use super::normalize::normalize;
use super::provider::SearchApiClient;
use crate::config::Settings;
use crate::error::{Result, SamleError};
use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, instrument};

/// A platform-specific way of acquiring transcripts.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// The platform this source serves.
    fn platform(&self) -> Platform;

    /// Whether this source recognizes the given URL or bare id.
    fn can_handle(&self, input: &str) -> bool;

    /// Extract the platform-specific content identifier.
    fn extract_id(&self, input: &str) -> Option<String>;

    /// Acquire a transcript for a content identifier.
    async fn fetch_transcript(&self, id: &str) -> Result<Transcript>;
}

/// Resolve an input string to a source and extracted id.
pub fn parse_input(
    input: &str,
    settings: &Settings,
) -> Result<(Box<dyn TranscriptSource>, String)> {
    // TikTok first: its native path needs no provider key, so key checks
    // only apply when the input actually goes through the search provider.
    let tiktok = TikTokSource::new();
    if tiktok.can_handle(input) {
        return dispatch(Box::new(tiktok), input);
    }

    let youtube = YoutubeSource::new(settings)?;
    if youtube.can_handle(input) {
        return dispatch(Box::new(youtube), input);
    }

    Err(SamleError::InvalidInput(format!(
        "Unrecognized content URL or id: {}",
        input
    )))
}

fn dispatch(
    source: Box<dyn TranscriptSource>,
    input: &str,
) -> Result<(Box<dyn TranscriptSource>, String)> {
    let id = source.extract_id(input).ok_or_else(|| {
        SamleError::InvalidInput(format!("Could not extract content id from: {}", input))
    })?;
    debug!(platform = %source.platform(), id = %id, "Dispatched input to source");
    Ok((source, id))
}

/// YouTube transcript source, backed by the search-provider fallback chain.
pub struct YoutubeSource {
    fetcher: TranscriptFetcher<SearchApiClient>,
    video_id_regex: Regex,
}

impl YoutubeSource {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = SearchApiClient::new(settings.transcript.resolved_api_key())?;
        let fetcher = TranscriptFetcher::new(client, settings.transcript.language.clone());

        // Matches various YouTube URL formats and bare video IDs
        let video_id_regex = Regex::new(
            r"(?x)
            (?:
                (?:https?://)?
                (?:www\.)?
                (?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/)
                ([a-zA-Z0-9_-]{11})
            )
            |
            ^([a-zA-Z0-9_-]{11})$
        ",
        )
        .expect("Invalid regex");

        Ok(Self {
            fetcher,
            video_id_regex,
        })
    }

    fn extract_video_id(&self, input: &str) -> Option<String> {
        let caps = self.video_id_regex.captures(input.trim())?;
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
    }
}

#[async_trait]
impl TranscriptSource for YoutubeSource {
    fn platform(&self) -> Platform {
        Platform::YouTube
    }

    fn can_handle(&self, input: &str) -> bool {
        self.extract_video_id(input).is_some()
    }

    fn extract_id(&self, input: &str) -> Option<String> {
        self.extract_video_id(input)
    }

    async fn fetch_transcript(&self, id: &str) -> Result<Transcript> {
        self.fetcher.fetch(id).await
    }
}

/// TikTok transcript source with native caption extraction.
///
/// Uses yt-dlp to resolve the post's caption tracks, then fetches the
/// preferred track and runs it through the shared normalizer.
pub struct TikTokSource {
    client: reqwest::Client,
    url_regex: Regex,
}

impl TikTokSource {
    pub fn new() -> Self {
        let url_regex = Regex::new(
            r"(?:https?://)?(?:www\.|vm\.)?tiktok\.com/(?:@[\w.-]+/video/(\d+)|v/(\d+)|(\w+))",
        )
        .expect("Invalid regex");

        Self {
            client: reqwest::Client::new(),
            url_regex,
        }
    }

    /// Resolve post metadata (including caption tracks) via yt-dlp.
    async fn fetch_post_json(&self, url: &str) -> Result<serde_json::Value> {
        let output = tokio::process::Command::new("yt-dlp")
            .args(["--dump-json", "--no-download", "--no-warnings", url])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SamleError::ToolNotFound("yt-dlp".to_string())
                } else {
                    SamleError::TranscriptSource(format!("Failed to run yt-dlp: {}", e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SamleError::ToolFailed(format!(
                "yt-dlp failed for {}: {}",
                url, stderr
            )));
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&json_str).map_err(|e| {
            SamleError::TranscriptSource(format!("Failed to parse yt-dlp output: {}", e))
        })
    }

    /// Pick the best caption track URL from a post JSON: prefer JSON-shaped
    /// tracks, fall back to the first available one.
    fn caption_track_url(post: &serde_json::Value) -> Option<(String, Option<String>)> {
        let tracks = post
            .get("subtitles")
            .and_then(serde_json::Value::as_object)
            .filter(|m| !m.is_empty())
            .or_else(|| {
                post.get("automatic_captions")
                    .and_then(serde_json::Value::as_object)
                    .filter(|m| !m.is_empty())
            })?;

        for (lang, variants) in tracks {
            let variants = variants.as_array()?;
            let track = variants
                .iter()
                .find(|v| v.get("ext").and_then(serde_json::Value::as_str) == Some("json3"))
                .or_else(|| variants.first())?;
            let url = track.get("url").and_then(serde_json::Value::as_str)?;
            return Some((url.to_string(), Some(lang.clone())));
        }

        None
    }
}

impl Default for TikTokSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptSource for TikTokSource {
    fn platform(&self) -> Platform {
        Platform::TikTok
    }

    fn can_handle(&self, input: &str) -> bool {
        input.contains("tiktok.com")
    }

    fn extract_id(&self, input: &str) -> Option<String> {
        if !self.can_handle(input) {
            return None;
        }
        // The full URL is the identifier yt-dlp needs; the numeric post id is
        // only used to validate the shape.
        self.url_regex
            .captures(input.trim())
            .map(|_| input.trim().to_string())
    }

    #[instrument(skip(self))]
    async fn fetch_transcript(&self, id: &str) -> Result<Transcript> {
        let post = self.fetch_post_json(id).await?;

        let (url, language) = Self::caption_track_url(&post).ok_or_else(|| {
            SamleError::TranscriptUnavailable(format!("no caption tracks on {}", id))
        })?;

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(SamleError::TranscriptUnavailable(format!(
                "caption track returned HTTP {}",
                response.status()
            )));
        }

        let payload: serde_json::Value = response.json().await?;
        let mut transcript = normalize(&payload, Platform::TikTok);
        if transcript.language.is_none() {
            transcript.language = language;
        }

        if transcript.is_empty() {
            return Err(SamleError::TranscriptUnavailable(format!(
                "caption track on {} was empty",
                id
            )));
        }

        Ok(transcript)
    }
}
