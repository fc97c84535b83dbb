//! Model selection against a safe context budget.

use crate::config::ModelSettings;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The outcome of a model-selection decision.
///
/// `reason` is present iff `auto_switched` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDecision {
    /// The model to actually use.
    pub model: String,
    /// Whether the decision differs from the requested model.
    pub auto_switched: bool,
    /// Human-readable justification for an automatic switch.
    pub reason: Option<String>,
}

/// Policy constants for model selection.
///
/// Both values are configuration, not derived facts: the limit sits well
/// below the default model's nominal capacity to absorb estimation error and
/// reserve room for the response, and there is exactly one designated
/// fallback model rather than an iterative search over a model list.
#[derive(Debug, Clone)]
pub struct ModelPolicy {
    /// Estimated-token threshold above which the fallback model is used.
    pub safe_token_limit: u64,
    /// The single designated large-context fallback model.
    pub large_context_model: String,
}

impl Default for ModelPolicy {
    fn default() -> Self {
        Self::from(&ModelSettings::default())
    }
}

impl From<&ModelSettings> for ModelPolicy {
    fn from(settings: &ModelSettings) -> Self {
        Self {
            safe_token_limit: settings.safe_token_limit,
            large_context_model: settings.large_context_model.clone(),
        }
    }
}

impl ModelPolicy {
    /// Decide which model to use for an estimated context size.
    ///
    /// Pure and total: keeps the requested model, or escalates to the one
    /// designated large-context model.
    pub fn select(&self, estimated_tokens: u64, requested_model: &str) -> ModelDecision {
        if estimated_tokens <= self.safe_token_limit {
            return ModelDecision {
                model: requested_model.to_string(),
                auto_switched: false,
                reason: None,
            };
        }

        debug!(
            estimated_tokens,
            safe_token_limit = self.safe_token_limit,
            "Estimated context exceeds safe limit, switching model"
        );

        ModelDecision {
            model: self.large_context_model.clone(),
            auto_switched: true,
            reason: Some(format!(
                "{} tokens exceeds the safe limit of {}; switched to {} for larger context",
                group_thousands(estimated_tokens),
                group_thousands(self.safe_token_limit),
                self.large_context_model
            )),
        }
    }
}

/// Format a count with comma thousands separators.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ModelPolicy {
        ModelPolicy {
            safe_token_limit: 30_000,
            large_context_model: "gpt-4.1".to_string(),
        }
    }

    #[test]
    fn test_under_limit_keeps_requested_model() {
        let decision = policy().select(25_000, "model-x");
        assert_eq!(decision.model, "model-x");
        assert!(!decision.auto_switched);
        assert!(decision.reason.is_none());
    }

    #[test]
    fn test_over_limit_escalates() {
        let decision = policy().select(35_000, "model-x");
        assert_eq!(decision.model, "gpt-4.1");
        assert!(decision.auto_switched);
        let reason = decision.reason.expect("switched decision carries a reason");
        assert!(reason.contains("35,000"));
        assert!(reason.contains("gpt-4.1"));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let decision = policy().select(30_000, "model-x");
        assert!(!decision.auto_switched);
        let decision = policy().select(30_001, "model-x");
        assert!(decision.auto_switched);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(35_000), "35,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }
}
