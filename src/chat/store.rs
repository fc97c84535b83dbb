//! Persistence seam for chat turns.
//!
//! The orchestrator appends turns through this trait and treats the
//! implementation as a black box: it returns the saved turn or fails.

use super::messages::ChatTurn;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Durable storage for chat turns, keyed by session.
#[async_trait]
pub trait TurnStore: Send + Sync {
    /// Append a turn to a session's history, returning the saved turn.
    async fn append_turn(&self, session_id: &str, turn: &ChatTurn) -> Result<ChatTurn>;

    /// All turns saved for a session, in append order.
    async fn session_turns(&self, session_id: &str) -> Result<Vec<ChatTurn>>;
}

/// In-memory turn store for the CLI and tests.
#[derive(Default)]
pub struct MemoryStore {
    turns: Mutex<HashMap<String, Vec<ChatTurn>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TurnStore for MemoryStore {
    async fn append_turn(&self, session_id: &str, turn: &ChatTurn) -> Result<ChatTurn> {
        let mut turns = self.turns.lock().expect("store lock poisoned");
        turns
            .entry(session_id.to_string())
            .or_default()
            .push(turn.clone());
        Ok(turn.clone())
    }

    async fn session_turns(&self, session_id: &str) -> Result<Vec<ChatTurn>> {
        let turns = self.turns.lock().expect("store lock poisoned");
        Ok(turns.get(session_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_and_list() {
        let store = MemoryStore::new();
        store
            .append_turn("s1", &ChatTurn::user("hello"))
            .await
            .unwrap();
        store
            .append_turn("s1", &ChatTurn::assistant("hi"))
            .await
            .unwrap();
        store
            .append_turn("s2", &ChatTurn::user("other session"))
            .await
            .unwrap();

        let turns = store.session_turns("s1").await.unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].text(), "hello");
        assert_eq!(store.session_turns("s2").await.unwrap().len(), 1);
        assert!(store.session_turns("missing").await.unwrap().is_empty());
    }
}
