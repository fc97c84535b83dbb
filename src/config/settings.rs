//! Configuration settings for Samle.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub models: ModelSettings,
    pub transcript: TranscriptSettings,
    pub chat: ChatSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data.
    pub data_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.samle".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Model selection settings.
///
/// The safe token limit is deliberately well below the default model's
/// nominal capacity: the estimator is a heuristic, and headroom is reserved
/// for the response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Default chat model.
    pub default_model: String,
    /// Model substituted when the estimated context exceeds the safe limit.
    pub large_context_model: String,
    /// Estimated-token threshold above which the large-context model is used.
    pub safe_token_limit: u64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            default_model: "gpt-4o-mini".to_string(),
            large_context_model: "gpt-4.1".to_string(),
            safe_token_limit: 30_000,
        }
    }
}

/// Transcript acquisition settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// API key for the transcript search provider. Falls back to the
    /// SEARCHAPI_API_KEY environment variable when absent.
    pub api_key: Option<String>,
    /// Preferred transcript language code.
    pub language: String,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            language: "en".to_string(),
        }
    }
}

impl TranscriptSettings {
    /// Resolve the provider API key from settings or the environment.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("SEARCHAPI_API_KEY").ok().filter(|k| !k.is_empty()))
    }
}

/// Chat behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    /// Sampling temperature for completions.
    pub temperature: f32,
    /// Maximum tokens requested for the model's response.
    pub max_response_tokens: u32,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_response_tokens: 1024,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::SamleError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("samle")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }
}
