//! Samle - Content Capture Chat
//!
//! A local-first CLI tool for saving media items and chatting with an AI
//! assistant about their content.
//!
//! The name "Samle" comes from the Norwegian word for "gather" or "collect."
//!
//! # Overview
//!
//! Samle allows you to:
//! - Fetch transcripts for videos and social posts with ordered provider fallback
//! - Render transcripts as plain text, timestamped text, or SRT subtitles
//! - Chat about an item's content with automatic model escalation when the
//!   context grows beyond a safe token budget
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `budget` - Content classification, token estimation, model selection
//! - `transcript` - Transcript acquisition, normalization, formatting
//! - `chat` - Chat orchestration over a completion service
//! - `cli` - Command-line interface
//!
//! # Example
//!
//! ```rust,no_run
//! use samle::config::Settings;
//! use samle::transcript::parse_input;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let (source, id) = parse_input("dQw4w9WgXcQ", &settings)?;
//!     let transcript = source.fetch_transcript(&id).await?;
//!     println!("{}", transcript.full_text);
//!
//!     Ok(())
//! }
//! ```

pub mod budget;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod transcript;

pub use error::{Result, SamleError};
