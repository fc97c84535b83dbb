//! CLI command implementations.

mod chat;
mod config;
mod init;
mod transcript;

pub use chat::run_chat;
pub use config::run_config;
pub use init::run_init;
pub use transcript::run_transcript;
