//! Pre-flight checks before network operations.
//!
//! Validates that required credentials and tools are available before
//! starting operations that would otherwise fail midway. Configuration
//! problems short-circuit here; the network is never touched without the
//! required key.

use crate::config::Settings;
use crate::error::{Result, SamleError};
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Transcript fetching via the search provider.
    Transcript,
    /// Native caption extraction (external extractor tool).
    NativeExtraction,
    /// Chatting requires the OpenAI key.
    Chat,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Transcript => {
            check_provider_key(settings)?;
        }
        Operation::NativeExtraction => {
            check_tool("yt-dlp")?;
        }
        Operation::Chat => {
            check_openai_key()?;
        }
    }
    Ok(())
}

/// Check if the OpenAI API key is configured.
fn check_openai_key() -> Result<()> {
    if crate::openai::is_api_key_configured() {
        Ok(())
    } else {
        Err(SamleError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        ))
    }
}

/// Check if the transcript provider key is configured.
fn check_provider_key(settings: &Settings) -> Result<()> {
    match settings.transcript.resolved_api_key() {
        Some(_) => Ok(()),
        None => Err(SamleError::NotConfigured("Transcript provider".to_string())),
    }
}

/// Check if an external tool is available.
fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(SamleError::ToolFailed(name.to_string())),
        Err(_) => Err(SamleError::ToolNotFound(name.to_string())),
    }
}
