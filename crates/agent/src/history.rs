use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_HISTORY_LIMIT: usize = 20;
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

/// Bounded transcript for one session; the oldest turns are dropped first.
#[derive(Clone, Debug)]
pub struct ChatHistory {
    turns: VecDeque<ChatTurn>,
    limit: usize,
}

impl ChatHistory {
    pub fn with_limit(limit: usize) -> Self {
        Self { turns: VecDeque::new(), limit: limit.max(1) }
    }

    pub fn push(&mut self, role: ChatRole, text: impl Into<String>) {
        if self.turns.len() == self.limit {
            self.turns.pop_front();
        }
        self.turns.push_back(ChatTurn { role, text: text.into() });
    }

    pub fn recent(&self, count: usize) -> Vec<ChatTurn> {
        let skip = self.turns.len().saturating_sub(count);
        self.turns.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

pub type SharedHistory = Arc<Mutex<ChatHistory>>;

/// Get-or-create access to per-session chat history.
pub trait SessionStore: Send + Sync {
    fn history(&self, session_id: &str) -> SharedHistory;
}

#[derive(Debug)]
struct SessionEntry {
    history: SharedHistory,
    last_used: u64,
}

#[derive(Debug, Default)]
struct Sessions {
    entries: HashMap<String, SessionEntry>,
    clock: u64,
}

/// Process-local sessions, capped at `max_sessions`; the least recently used session is
/// evicted to make room for a new one.
#[derive(Debug)]
pub struct InMemorySessionStore {
    sessions: Mutex<Sessions>,
    history_limit: usize,
    max_sessions: usize,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::with_limits(DEFAULT_HISTORY_LIMIT, DEFAULT_MAX_SESSIONS)
    }
}

impl InMemorySessionStore {
    pub fn with_limits(history_limit: usize, max_sessions: usize) -> Self {
        Self {
            sessions: Mutex::new(Sessions::default()),
            history_limit,
            max_sessions: max_sessions.max(1),
        }
    }

    #[cfg(test)]
    fn session_count(&self) -> usize {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner).entries.len()
    }
}

impl SessionStore for InMemorySessionStore {
    fn history(&self, session_id: &str) -> SharedHistory {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        sessions.clock += 1;
        let now = sessions.clock;

        if let Some(entry) = sessions.entries.get_mut(session_id) {
            entry.last_used = now;
            return entry.history.clone();
        }

        if sessions.entries.len() >= self.max_sessions {
            let oldest = sessions
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(id, _)| id.clone());
            if let Some(oldest) = oldest {
                sessions.entries.remove(&oldest);
                debug!(
                    event_name = "session.evicted",
                    max_sessions = self.max_sessions,
                    "dropped least recently used session"
                );
            }
        }

        let history = Arc::new(Mutex::new(ChatHistory::with_limit(self.history_limit)));
        let entry = SessionEntry { history: history.clone(), last_used: now };
        sessions.entries.insert(session_id.to_string(), entry);
        history
    }
}
