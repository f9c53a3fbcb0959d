//! Per-user conversation state kept in process memory.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::NaiveDateTime;
use dashmap::DashMap;

use crate::config::assistant::{HISTORY_CAPACITY, PROMPT_TURNS};
use crate::core::clock::{Clock, SystemClock};

/// One answered question.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub query: String,
    pub response: String,
    pub at: NaiveDateTime,
}

/// Bounded ring of turns, oldest first.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    turns: VecDeque<Turn>,
    capacity: usize,
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl ConversationHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a turn, silently dropping the oldest once full.
    pub fn push(&mut self, turn: Turn) {
        if self.capacity == 0 {
            return;
        }
        while self.turns.len() >= self.capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
    }

    /// The last `n` turns, oldest first.
    pub fn recent(&self, n: usize) -> Vec<Turn> {
        let skip = self.turns.len().saturating_sub(n);
        self.turns.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
struct UserSession {
    ai_mode: bool,
    history: ConversationHistory,
}

/// Session contexts keyed by Telegram user id.
///
/// Cloning shares the same map. Concurrent messages from one user are
/// last-writer-wins on that user's entry.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<i64, UserSession>>,
    clock: Arc<dyn Clock>,
    capacity: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), HISTORY_CAPACITY)
    }
}

impl SessionStore {
    pub fn new(clock: Arc<dyn Clock>, capacity: usize) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            clock,
            capacity,
        }
    }

    pub fn set_ai_mode(&self, user_id: i64, enabled: bool) {
        let mut session = self.sessions.entry(user_id).or_insert_with(|| UserSession {
            ai_mode: false,
            history: ConversationHistory::with_capacity(self.capacity),
        });
        session.ai_mode = enabled;
    }

    pub fn ai_mode(&self, user_id: i64) -> bool {
        self.sessions.get(&user_id).is_some_and(|s| s.ai_mode)
    }

    /// Records an answered question stamped with the store's clock.
    pub fn record_turn(&self, user_id: i64, query: &str, response: &str) {
        let turn = Turn {
            query: query.to_string(),
            response: response.to_string(),
            at: self.clock.now(),
        };
        self.sessions
            .entry(user_id)
            .or_insert_with(|| UserSession {
                ai_mode: false,
                history: ConversationHistory::with_capacity(self.capacity),
            })
            .history
            .push(turn);
    }

    /// Turns surfaced in a prompt for this user, oldest first.
    pub fn prompt_turns(&self, user_id: i64) -> Vec<Turn> {
        self.recent_turns(user_id, PROMPT_TURNS)
    }

    pub fn recent_turns(&self, user_id: i64, n: usize) -> Vec<Turn> {
        self.sessions
            .get(&user_id)
            .map(|s| s.history.recent(n))
            .unwrap_or_default()
    }

    pub fn history_len(&self, user_id: i64) -> usize {
        self.sessions.get(&user_id).map_or(0, |s| s.history.len())
    }
}
