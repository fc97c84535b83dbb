//! Transcript acquisition for Samle.
//!
//! Acquires transcripts for saved items from multiple unreliable providers
//! with ordered fallback, normalizes the heterogeneous payloads into one
//! canonical representation, and renders them as plain text, timestamped
//! text, or SRT subtitles.
//!
//! Transcript availability is never guaranteed: exhausting every strategy is
//! an expected outcome and surfaces as a single typed failure with a
//! descriptive reason, not a stack of nested errors.

mod fallback;
mod format;
mod models;
mod normalize;
mod provider;
mod source;

pub use fallback::{FetchAttempt, StrategyId, TranscriptFetcher};
pub use format::{format_transcript, to_srt, to_timestamped_text, OutputFormat};
pub use models::{Platform, Transcript, TranscriptSegment};
pub use normalize::normalize;
pub use provider::{SearchApiClient, SearchVariant, TranscriptApi};
pub use source::{parse_input, TikTokSource, TranscriptSource, YoutubeSource};
