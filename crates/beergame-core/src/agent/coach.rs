use crate::config::Settings;
use crate::context::{Speaker, Turn};
use crate::error::BeerGameError;
use crate::game::{Mode, PlayerRole};
use crate::llm::{LlmClient, Usage};
use crate::session::{Session, SessionRecorder, SessionStore};

/// Result of one coaching turn.
#[derive(Debug)]
pub struct TurnOutcome {
    pub reply: String,
    /// Token counts, when the model reports them.
    pub usage: Option<Usage>,
    /// `None` when autosave is off. A failed save never fails the turn.
    pub autosave: Option<Result<String, BeerGameError>>,
}

/// Drives one student's chat: owns the per-mode sessions, the model client
/// and the recorder, and runs the prompt / reply / save cycle for each turn.
pub struct Coach {
    llm: Box<dyn LlmClient>,
    sessions: SessionStore,
    recorder: SessionRecorder,
    mode: Mode,
    default_role: PlayerRole,
    study_id: Option<String>,
    autosave: bool,
}

impl Coach {
    pub fn new(llm: Box<dyn LlmClient>, recorder: SessionRecorder) -> Self {
        Self {
            llm,
            sessions: SessionStore::new(),
            recorder,
            mode: Mode::Qualitative,
            default_role: PlayerRole::default(),
            study_id: None,
            autosave: true,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, BeerGameError> {
        let llm = settings.build_llm_client()?;
        let mut recorder = SessionRecorder::new(settings.build_record_store()?);
        if let Some(ref dir) = settings.storage.staging_dir {
            recorder = recorder.with_staging_dir(dir);
        }
        Ok(Self::new(llm, recorder)
            .with_autosave(settings.session.autosave)
            .with_default_role(settings.session.default_role))
    }

    pub fn with_sessions(mut self, sessions: SessionStore) -> Self {
        self.sessions = sessions;
        self
    }

    pub fn with_autosave(mut self, enabled: bool) -> Self {
        self.autosave = enabled;
        self
    }

    pub fn with_default_role(mut self, role: PlayerRole) -> Self {
        self.default_role = role;
        self
    }

    pub fn with_study_id(mut self, id: impl Into<String>) -> Self {
        self.study_id = Some(id.into());
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch the active mode. The other mode's session stays as it was.
    pub fn select_mode(&mut self, mode: Mode) -> &Session {
        if self.mode != mode {
            tracing::info!(mode = mode.label(), "Switched coaching mode");
        }
        self.mode = mode;
        self.sessions.get_or_create(mode, self.default_role)
    }

    /// Set the role for the active mode; unknown names become `Retailer`.
    pub fn set_role(&mut self, role: &str) -> PlayerRole {
        let role = PlayerRole::normalize(role);
        self.sessions
            .get_or_create(self.mode, self.default_role)
            .set_role(role);
        role
    }

    pub fn role(&mut self) -> PlayerRole {
        self.session().role()
    }

    pub fn set_study_id(&mut self, id: Option<String>) {
        self.study_id = id;
    }

    pub fn study_id(&self) -> Option<&str> {
        self.study_id.as_deref()
    }

    pub fn set_autosave(&mut self, enabled: bool) {
        self.autosave = enabled;
    }

    pub fn autosave(&self) -> bool {
        self.autosave
    }

    pub fn session(&mut self) -> &Session {
        self.sessions.get_or_create(self.mode, self.default_role)
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn messages(&mut self) -> &[Turn] {
        self.sessions
            .get_or_create(self.mode, self.default_role)
            .turns()
    }

    /// Start the active mode's conversation over.
    pub fn clear_current(&mut self) -> &Session {
        self.sessions.clear(self.mode, self.default_role)
    }

    /// Persist the active mode's session under the current study id.
    pub async fn save(&mut self) -> Result<String, BeerGameError> {
        let session = self.sessions.get_or_create(self.mode, self.default_role);
        self.recorder
            .persist(session, self.study_id.as_deref())
            .await
    }

    /// Run one turn. The user's input stays in the history even when the
    /// model call fails.
    pub async fn respond(&mut self, input: impl Into<String>) -> Result<TurnOutcome, BeerGameError> {
        let input = input.into();
        let messages = {
            let session = self.sessions.get_or_create(self.mode, self.default_role);
            session.append_turn(Speaker::User, input);
            session.history().to_messages(&session.system_prompt())
        };

        let response = match self.llm.chat(&messages).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(mode = %self.mode, "Model call failed: {}", e);
                return Err(e);
            }
        };

        if let Some(ref usage) = response.usage {
            tracing::debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "Model usage"
            );
        }
        let reply = response.message.content.trim().to_string();
        self.sessions
            .get_or_create(self.mode, self.default_role)
            .append_turn(Speaker::Assistant, reply.clone());

        let autosave = if self.autosave {
            Some(self.save().await)
        } else {
            None
        };

        Ok(TurnOutcome {
            reply,
            usage: response.usage,
            autosave,
        })
    }
}
