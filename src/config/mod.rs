//! Configuration module for Samle.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{
    ChatSettings, GeneralSettings, ModelSettings, Settings, TranscriptSettings,
};
