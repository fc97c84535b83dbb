//! Heuristic token estimation.
//!
//! Word counts times a shape-dependent multiplier. Fast and approximate by
//! design; the safe limit in [`super::ModelPolicy`] absorbs the error.

use super::classifier::classify;
use crate::chat::ChatTurn;
use serde::{Deserialize, Serialize};

/// Fixed structural overhead charged per message by chat-completion APIs.
pub const TURN_OVERHEAD_TOKENS: u64 = 4;

/// An estimated token count with supporting word/character counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEstimate {
    /// Estimated token count.
    pub estimated_tokens: u64,
    /// Whitespace-delimited word count.
    pub word_count: u64,
    /// Character count.
    pub char_count: u64,
}

/// Estimate the token cost of a piece of text.
///
/// Empty text yields the zero estimate without invoking classification.
pub fn estimate_tokens(text: &str) -> TokenEstimate {
    if text.is_empty() {
        return TokenEstimate::default();
    }

    let word_count = text.split_whitespace().count() as u64;
    let char_count = text.chars().count() as u64;
    let multiplier = classify(text).multiplier();

    TokenEstimate {
        estimated_tokens: (word_count as f64 * multiplier).ceil() as u64,
        word_count,
        char_count,
    }
}

/// Estimate the aggregate token cost of an ordered sequence of chat turns.
///
/// Each turn is charged [`TURN_OVERHEAD_TOKENS`] on top of its content
/// estimate. Turns with absent content still pay the overhead.
pub fn estimate_conversation(turns: &[ChatTurn]) -> TokenEstimate {
    let mut total = TokenEstimate::default();

    for turn in turns {
        let estimate = turn
            .content
            .as_deref()
            .map(estimate_tokens)
            .unwrap_or_default();

        total.estimated_tokens += estimate.estimated_tokens + TURN_OVERHEAD_TOKENS;
        total.word_count += estimate.word_count;
        total.char_count += estimate.char_count;
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatTurn;

    #[test]
    fn test_empty_text_is_zero() {
        let estimate = estimate_tokens("");
        assert_eq!(estimate.estimated_tokens, 0);
        assert_eq!(estimate.word_count, 0);
        assert_eq!(estimate.char_count, 0);
    }

    #[test]
    fn test_natural_text_multiplier() {
        // 3 words * 1.33 = 3.99, rounded up to 4
        let estimate = estimate_tokens("hello wonderful world");
        assert_eq!(estimate.word_count, 3);
        assert_eq!(estimate.estimated_tokens, 4);
    }

    #[test]
    fn test_noisy_transcript_multiplier() {
        // 4 words * 6.0 = 24
        let estimate = estimate_tokens("[Music] [Applause] hello there");
        assert_eq!(estimate.estimated_tokens, 24);
    }

    #[test]
    fn test_conversation_overhead() {
        // 75 natural words estimate to ceil(75 * 1.33) = 100 tokens per turn;
        // three turns cost 300 + 3 * 4 overhead = 312.
        let content = "ord ".repeat(75).trim().to_string();
        assert_eq!(estimate_tokens(&content).estimated_tokens, 100);

        let turns = vec![
            ChatTurn::system(&content),
            ChatTurn::user(&content),
            ChatTurn::assistant(&content),
        ];
        assert_eq!(estimate_conversation(&turns).estimated_tokens, 312);
    }

    #[test]
    fn test_absent_content_still_pays_overhead() {
        let turns = vec![ChatTurn {
            role: crate::chat::ChatRole::User,
            content: None,
        }];
        assert_eq!(
            estimate_conversation(&turns).estimated_tokens,
            TURN_OVERHEAD_TOKENS
        );
    }

    #[test]
    fn test_overhead_lower_bound_and_monotonicity() {
        let mut turns = Vec::new();
        let mut previous = 0;
        for i in 0..6 {
            turns.push(ChatTurn::user(&format!("message number {}", i)));
            let estimate = estimate_conversation(&turns);
            assert!(estimate.estimated_tokens >= TURN_OVERHEAD_TOKENS * turns.len() as u64);
            assert!(estimate.estimated_tokens > previous);
            previous = estimate.estimated_tokens;
        }
    }
}
