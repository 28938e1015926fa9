pub mod error;
pub mod constants;
pub mod game;
pub mod llm;
pub mod context;
pub mod session;
pub mod storage;
pub mod config;
pub mod agent;

// Re-export key types
pub use error::BeerGameError;
pub use game::{Mode, PlayerRole};
pub use agent::{Coach, TurnOutcome};
pub use llm::{LlmClient, LlmResponse, Message, Role};
pub use context::{build_prompt, ConversationHistory, Speaker, SystemPromptBuilder, Turn};
pub use session::{
    Clock, FixedClock, PersistedRecord, RecordName, RecordRow, Session, SessionRecorder,
    SessionStore, SystemClock,
};
pub use storage::{GcsStore, LocalDirStore, RecordStore};
pub use config::Settings;
