//! Transcript command - fetch and render a transcript.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::Result;
use crate::transcript::{format_transcript, parse_input, OutputFormat, Platform};

/// Run the transcript command.
pub async fn run_transcript(
    input: &str,
    format: &str,
    output: Option<String>,
    language: Option<String>,
    mut settings: Settings,
) -> Result<()> {
    let format: OutputFormat = format
        .parse()
        .map_err(crate::error::SamleError::InvalidInput)?;

    if let Some(language) = language {
        settings.transcript.language = language;
    }

    let (source, id) = parse_input(input, &settings)?;

    let operation = match source.platform() {
        Platform::YouTube => Operation::Transcript,
        Platform::TikTok => Operation::NativeExtraction,
    };
    if let Err(e) = preflight::check(operation, &settings) {
        Output::error(&e.to_string());
        return Err(e);
    }

    Output::info(&format!("Fetching transcript for {} ({})", id, source.platform()));

    let transcript = source.fetch_transcript(&id).await?;
    let rendered = format_transcript(&transcript, format);

    match output {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            Output::success(&format!("Wrote transcript to {}", path));
        }
        None => println!("{}", rendered),
    }

    if let Some(language) = &transcript.language {
        Output::kv("language", language);
    }
    if let Some(segments) = &transcript.segments {
        Output::kv("segments", &segments.len().to_string());
    }

    Ok(())
}
