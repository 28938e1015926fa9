use crate::context::{ConversationHistory, Speaker, SystemPromptBuilder, Turn};
use crate::game::{Mode, PlayerRole};
use crate::session::clock::{Clock, SystemClock};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::sync::Arc;

/// One coaching conversation for a single mode.
#[derive(Debug, Clone)]
pub struct Session {
    mode: Mode,
    role: PlayerRole,
    history: ConversationHistory,
    started_at: NaiveDateTime,
}

impl Session {
    /// A fresh session holding only the mode's greeting.
    pub fn new(mode: Mode, role: PlayerRole, started_at: NaiveDateTime) -> Self {
        Self {
            mode,
            role,
            history: ConversationHistory::seeded(mode.seed_greeting()),
            started_at,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn role(&self) -> PlayerRole {
        self.role
    }

    pub fn started_at(&self) -> NaiveDateTime {
        self.started_at
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn turns(&self) -> &[Turn] {
        self.history.turns()
    }

    pub fn append_turn(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.history.push(Turn {
            speaker,
            text: text.into(),
        });
    }

    /// Only later prompts and record metadata see the new role.
    pub fn set_role(&mut self, role: PlayerRole) {
        self.role = role;
    }

    pub fn clear(&mut self, seed_greeting: impl Into<String>, now: NaiveDateTime) {
        self.history.reset(seed_greeting);
        self.started_at = now;
    }

    /// System prompt for the next turn. Rebuilt on every call since the
    /// role can change between turns.
    pub fn system_prompt(&self) -> String {
        SystemPromptBuilder::new(self.mode)
            .with_role(self.role)
            .with_turn_directive()
            .build()
    }
}

/// The host's per-mode conversation buffers. At most one session per mode.
pub struct SessionStore {
    sessions: HashMap<Mode, Session>,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: HashMap::new(),
            clock,
        }
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    pub fn get_or_create(&mut self, mode: Mode, default_role: PlayerRole) -> &mut Session {
        let clock = &self.clock;
        self.sessions.entry(mode).or_insert_with(|| {
            tracing::debug!(mode = %mode, role = %default_role, "Creating session");
            Session::new(mode, default_role, clock.now())
        })
    }

    pub fn get(&self, mode: Mode) -> Option<&Session> {
        self.sessions.get(&mode)
    }

    pub fn get_mut(&mut self, mode: Mode) -> Option<&mut Session> {
        self.sessions.get_mut(&mode)
    }

    /// Reset the session for `mode` to its greeting. Other modes are untouched.
    pub fn clear(&mut self, mode: Mode, default_role: PlayerRole) -> &mut Session {
        let now = self.clock.now();
        let session = self.get_or_create(mode, default_role);
        session.clear(mode.seed_greeting(), now);
        tracing::info!(mode = %mode, "Cleared session");
        session
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
