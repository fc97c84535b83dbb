//! CLI module for Samle.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Samle - Content Capture Chat
///
/// A local-first CLI tool for fetching transcripts of saved media items and
/// chatting with an AI assistant about their content.
/// The name "Samle" comes from the Norwegian word for "gather."
#[derive(Parser, Debug)]
#[command(name = "samle")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Samle and verify configuration
    Init,

    /// Fetch a transcript for a video or social post
    Transcript {
        /// Content URL or bare video id
        input: String,

        /// Output format (text, timestamped, srt, json)
        #[arg(long, default_value = "timestamped")]
        format: String,

        /// Write the transcript to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Preferred transcript language code
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Start an interactive chat session about an item
    Chat {
        /// Content URL or bare video id to chat about
        input: String,

        /// Chat model to request
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the configuration file path
    Path,
}
