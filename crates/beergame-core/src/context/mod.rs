mod history;
pub mod system_prompt;

pub use history::{ConversationHistory, Speaker, Turn};
pub use system_prompt::{build_prompt, SystemPromptBuilder};
