//! Context budgeting for Samle.
//!
//! Decides which model a chat request may safely use given an unpredictable
//! amount of context text. The pipeline is three pure stages: classify the
//! shape of the text, estimate its token cost, and select a model that can
//! hold it.
//!
//! The estimator is an explicit heuristic, not a tokenizer. Transcript-shaped
//! text tokenizes far worse than prose, so classification picks a per-shape
//! multiplier before any arithmetic happens.

mod classifier;
mod estimator;
mod selector;

pub use classifier::{classify, ContentShape};
pub use estimator::{estimate_conversation, estimate_tokens, TokenEstimate, TURN_OVERHEAD_TOKENS};
pub use selector::{ModelDecision, ModelPolicy};
