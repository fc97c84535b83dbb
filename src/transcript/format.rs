//! Transcript output formatting (plain text, timestamped text, SRT, JSON).

use super::models::Transcript;

/// Synthetic segment duration when the provider gives no end time.
const DEFAULT_SEGMENT_DURATION_MS: u64 = 2000;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Timestamped,
    Srt,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(OutputFormat::Text),
            "timestamped" => Ok(OutputFormat::Timestamped),
            "srt" => Ok(OutputFormat::Srt),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown format: {}. Use text, timestamped, srt, or json.",
                s
            )),
        }
    }
}

/// Format a transcript for output.
pub fn format_transcript(transcript: &Transcript, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => transcript.full_text.clone(),
        OutputFormat::Timestamped => to_timestamped_text(transcript),
        OutputFormat::Srt => to_srt(transcript),
        OutputFormat::Json => {
            serde_json::to_string_pretty(transcript).unwrap_or_else(|_| "{}".to_string())
        }
    }
}

/// Render each segment as a `[MM:SS] text` line.
///
/// Without segments the full text is returned unchanged.
pub fn to_timestamped_text(transcript: &Transcript) -> String {
    let Some(segments) = &transcript.segments else {
        return transcript.full_text.clone();
    };

    segments
        .iter()
        .map(|s| format!("[{}] {}", format_timestamp(s.start_ms), s.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the transcript as SRT (SubRip).
///
/// Segments without an end time get a synthetic 2-second duration. Without
/// segments the whole text becomes one block; an empty transcript renders
/// as an empty string.
pub fn to_srt(transcript: &Transcript) -> String {
    let segments = match &transcript.segments {
        Some(segments) => segments.clone(),
        None if transcript.full_text.is_empty() => return String::new(),
        None => {
            return srt_block(1, 0, DEFAULT_SEGMENT_DURATION_MS, &transcript.full_text);
        }
    };

    let mut output = String::new();
    for (i, segment) in segments.iter().enumerate() {
        let end_ms = segment
            .end_ms
            .unwrap_or(segment.start_ms + DEFAULT_SEGMENT_DURATION_MS);
        output.push_str(&srt_block(i + 1, segment.start_ms, end_ms, &segment.text));
    }
    output
}

/// One numbered SRT cue.
fn srt_block(index: usize, start_ms: u64, end_ms: u64, text: &str) -> String {
    format!(
        "{}\n{} --> {}\n{}\n\n",
        index,
        format_srt_timestamp(start_ms),
        format_srt_timestamp(end_ms),
        text
    )
}

/// Format milliseconds as MM:SS.
fn format_timestamp(ms: u64) -> String {
    let total_seconds = ms / 1000;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Format milliseconds as an SRT timestamp (00:00:00,000).
fn format_srt_timestamp(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let secs = (ms % 60_000) / 1000;
    let millis = ms % 1000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}
