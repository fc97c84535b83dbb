//! Chat orchestration.
//!
//! Composes the system context, prior turns, and the new user turn; budgets
//! the context and selects a model; then calls the completion service. A
//! completion failure never escapes: the user always gets an assistant turn,
//! apologetic if need be, so the conversation stays well-formed.

use super::completion::CompletionService;
use super::messages::ChatTurn;
use super::session::ChatSession;
use super::store::TurnStore;
use crate::budget::{estimate_conversation, ModelPolicy};
use crate::config::Settings;
use crate::error::Result;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Assistant message substituted when the model call fails.
const FALLBACK_ASSISTANT_MESSAGE: &str =
    "I'm sorry, I wasn't able to respond just now. Please try again in a moment.";

/// Saved-item context embedded into the system turn.
#[derive(Debug, Clone)]
pub struct ItemContext {
    /// Item title.
    pub title: String,
    /// Item body: article text, transcript, or post content.
    pub content: String,
}

/// The orchestrator's answer for one user message.
#[derive(Debug, Clone)]
pub struct ChatReply {
    /// The assistant turn produced for the user message.
    pub message: ChatTurn,
    /// The model actually used.
    pub model_used: String,
    /// Whether the model differed from the requested one.
    pub auto_switched: bool,
    /// Switch justification, present only the first time a switch fires in
    /// this session.
    pub switch_notice: Option<String>,
}

/// Drives one chat turn end to end.
pub struct ChatOrchestrator {
    completion: Arc<dyn CompletionService>,
    store: Arc<dyn TurnStore>,
    policy: ModelPolicy,
    default_model: String,
    temperature: f32,
    max_response_tokens: u32,
}

impl ChatOrchestrator {
    /// Create an orchestrator from settings and the two external
    /// collaborators.
    pub fn new(
        settings: &Settings,
        completion: Arc<dyn CompletionService>,
        store: Arc<dyn TurnStore>,
    ) -> Self {
        Self {
            completion,
            store,
            policy: ModelPolicy::from(&settings.models),
            default_model: settings.models.default_model.clone(),
            temperature: settings.chat.temperature,
            max_response_tokens: settings.chat.max_response_tokens,
        }
    }

    /// Handle one user message within a session.
    ///
    /// Returns the assistant reply plus switch metadata. Completion failures
    /// are absorbed into a fixed apologetic reply; store failures propagate.
    #[instrument(skip(self, session, item, user_text), fields(session_id = %session.id))]
    pub async fn send(
        &self,
        session: &mut ChatSession,
        item: &ItemContext,
        user_text: &str,
    ) -> Result<ChatReply> {
        let user_turn = ChatTurn::user(user_text);

        // System context, prior turns, then the new user turn, in order.
        let mut turns = Vec::with_capacity(session.turns.len() + 2);
        turns.push(self.system_turn(item));
        turns.extend(session.turns.iter().cloned());
        turns.push(user_turn.clone());

        let estimate = estimate_conversation(&turns);
        let decision = self.policy.select(estimate.estimated_tokens, &self.default_model);
        debug!(
            estimated_tokens = estimate.estimated_tokens,
            model = %decision.model,
            auto_switched = decision.auto_switched,
            "Budgeted chat context"
        );

        self.store.append_turn(&session.id, &user_turn).await?;

        let assistant_turn = match self
            .completion
            .complete(&turns, &decision.model, self.temperature, self.max_response_tokens)
            .await
        {
            Ok(response) => {
                info!(model = %decision.model, "Completion succeeded");
                ChatTurn::assistant(response.content)
            }
            Err(e) => {
                // The conversation must stay well-formed even when the model
                // call errors, so substitute a calm assistant message.
                warn!(error = %e, "Completion failed, substituting fallback reply");
                ChatTurn::assistant(FALLBACK_ASSISTANT_MESSAGE)
            }
        };

        self.store.append_turn(&session.id, &assistant_turn).await?;
        session.turns.push(user_turn);
        session.turns.push(assistant_turn.clone());

        let switch_notice = if decision.auto_switched && session.switch_notice.acknowledge() {
            decision.reason.clone()
        } else {
            None
        };

        Ok(ChatReply {
            message: assistant_turn,
            model_used: decision.model,
            auto_switched: decision.auto_switched,
            switch_notice,
        })
    }

    /// Build the system turn embedding item context and a current-time
    /// marker.
    fn system_turn(&self, item: &ItemContext) -> ChatTurn {
        let now = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC");
        ChatTurn::system(format!(
            "You are a helpful assistant discussing a saved item with the user.\n\
             Current time: {}\n\n\
             Item: {}\n\n\
             Content:\n{}",
            now, item.title, item.content
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::completion::{CompletionResponse, CompletionService};
    use crate::chat::store::MemoryStore;
    use crate::chat::ChatRole;
    use crate::error::SamleError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Mock completion service: scripted outcomes plus a record of the turn
    /// sequences and models it was called with.
    struct MockCompletion {
        fail: bool,
        calls: Mutex<Vec<(Vec<ChatTurn>, String)>>,
    }

    impl MockCompletion {
        fn succeeding() -> Self {
            Self {
                fail: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionService for MockCompletion {
        async fn complete(
            &self,
            turns: &[ChatTurn],
            model: &str,
            _temperature: f32,
            _max_tokens: u32,
        ) -> crate::error::Result<CompletionResponse> {
            self.calls
                .lock()
                .unwrap()
                .push((turns.to_vec(), model.to_string()));
            if self.fail {
                Err(SamleError::OpenAI("http 500".to_string()))
            } else {
                Ok(CompletionResponse {
                    content: "mock answer".to_string(),
                    usage: None,
                })
            }
        }
    }

    fn orchestrator(
        completion: Arc<MockCompletion>,
        safe_token_limit: u64,
    ) -> (ChatOrchestrator, Arc<MemoryStore>) {
        let mut settings = Settings::default();
        settings.models.safe_token_limit = safe_token_limit;
        let store = Arc::new(MemoryStore::new());
        let orchestrator = ChatOrchestrator::new(&settings, completion, store.clone());
        (orchestrator, store)
    }

    fn item() -> ItemContext {
        ItemContext {
            title: "A saved article".to_string(),
            content: "Some short article body.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_turn_order_preserved_through_completion() {
        let completion = Arc::new(MockCompletion::succeeding());
        let (orchestrator, _) = orchestrator(completion.clone(), 30_000);
        let mut session = ChatSession::new("item-1");

        orchestrator
            .send(&mut session, &item(), "first question")
            .await
            .unwrap();
        orchestrator
            .send(&mut session, &item(), "second question")
            .await
            .unwrap();

        let calls = completion.calls.lock().unwrap();
        let (turns, _) = &calls[1];
        assert_eq!(turns[0].role, ChatRole::System);
        assert!(turns[0].text().contains("A saved article"));
        assert!(turns[0].text().contains("Current time:"));
        assert_eq!(turns[1].text(), "first question");
        assert_eq!(turns[2].text(), "mock answer");
        assert_eq!(turns.last().unwrap().text(), "second question");
    }

    #[tokio::test]
    async fn test_no_switch_under_limit() {
        let completion = Arc::new(MockCompletion::succeeding());
        let (orchestrator, _) = orchestrator(completion.clone(), 30_000);
        let mut session = ChatSession::new("item-1");

        let reply = orchestrator
            .send(&mut session, &item(), "short question")
            .await
            .unwrap();

        assert!(!reply.auto_switched);
        assert!(reply.switch_notice.is_none());
        assert_eq!(reply.model_used, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_switch_notice_shown_once_per_session() {
        let completion = Arc::new(MockCompletion::succeeding());
        // A tiny budget so every message triggers the switch
        let (orchestrator, _) = orchestrator(completion.clone(), 10);
        let mut session = ChatSession::new("item-1");

        let first = orchestrator
            .send(&mut session, &item(), "please summarize this")
            .await
            .unwrap();
        assert!(first.auto_switched);
        assert!(first.switch_notice.is_some());
        assert_eq!(first.model_used, "gpt-4.1");

        let second = orchestrator
            .send(&mut session, &item(), "and then what")
            .await
            .unwrap();
        assert!(second.auto_switched);
        assert!(second.switch_notice.is_none());

        // A new session for a new item shows the notice again
        let mut fresh = ChatSession::new("item-2");
        let third = orchestrator
            .send(&mut fresh, &item(), "tell me more")
            .await
            .unwrap();
        assert!(third.switch_notice.is_some());
    }

    #[tokio::test]
    async fn test_completion_failure_yields_fallback_turn() {
        let completion = Arc::new(MockCompletion::failing());
        let (orchestrator, store) = orchestrator(completion, 30_000);
        let mut session = ChatSession::new("item-1");

        let reply = orchestrator
            .send(&mut session, &item(), "does this work")
            .await
            .unwrap();

        assert_eq!(reply.message.text(), FALLBACK_ASSISTANT_MESSAGE);

        // Every user turn is paired with an assistant turn, even on failure
        let saved = store.session_turns(&session.id).await.unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].role, ChatRole::User);
        assert_eq!(saved[1].role, ChatRole::Assistant);
        assert_eq!(session.turns.len(), 2);
    }
}
