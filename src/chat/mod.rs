//! Chat module for Samle.
//!
//! Orchestrates conversations about saved items: context budgeting, model
//! selection, completion calls, and session-scoped switch notification.

mod completion;
mod messages;
mod orchestrator;
mod session;
mod store;

pub use completion::{CompletionResponse, CompletionService, CompletionUsage, OpenAiCompletion};
pub use messages::{ChatRole, ChatTurn};
pub use orchestrator::{ChatOrchestrator, ChatReply, ItemContext};
pub use session::{ChatSession, SwitchNotice};
pub use store::{MemoryStore, TurnStore};
