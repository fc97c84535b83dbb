//! Chat session state.
//!
//! A session scopes one conversation about one saved item. The auto-switch
//! notice is an explicit per-session value rather than a process-wide flag,
//! so concurrent chats about different items never share it and starting a
//! new session naturally resets it.

use super::messages::ChatTurn;
use uuid::Uuid;

/// Tracks whether the user has been told about an automatic model switch in
/// this session. Acknowledged at most once; never unset except by starting a
/// new session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwitchNotice {
    shown: bool,
}

impl SwitchNotice {
    /// Returns true exactly once; subsequent calls return false.
    pub fn acknowledge(&mut self) -> bool {
        if self.shown {
            false
        } else {
            self.shown = true;
            true
        }
    }

    pub fn has_shown(&self) -> bool {
        self.shown
    }
}

/// One chat session about one saved item.
#[derive(Debug, Clone)]
pub struct ChatSession {
    /// Session identifier (also the store key).
    pub id: String,
    /// The saved item this session is about.
    pub item_id: String,
    /// Prior conversation turns, chronological.
    pub turns: Vec<ChatTurn>,
    /// One-time auto-switch notice state.
    pub switch_notice: SwitchNotice,
}

impl ChatSession {
    /// Start a fresh session for an item.
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            item_id: item_id.into(),
            turns: Vec::new(),
            switch_notice: SwitchNotice::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_acknowledged_once() {
        let mut notice = SwitchNotice::default();
        assert!(!notice.has_shown());
        assert!(notice.acknowledge());
        assert!(!notice.acknowledge());
        assert!(notice.has_shown());
    }

    #[test]
    fn test_new_session_resets_notice() {
        let mut session = ChatSession::new("item-1");
        session.switch_notice.acknowledge();
        assert!(session.switch_notice.has_shown());

        let fresh = ChatSession::new("item-2");
        assert!(!fresh.switch_notice.has_shown());
        assert_ne!(session.id, fresh.id);
    }
}
