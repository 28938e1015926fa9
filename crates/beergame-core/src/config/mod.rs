use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::constants::{defaults, endpoints, models};
use crate::error::BeerGameError;
use crate::game::PlayerRole;
use crate::llm::{LlmClient, OpenAIClient};
use crate::storage::{GcsStore, LocalDirStore, RecordStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub llm: LlmSettings,
    pub storage: StorageSettings,
    #[serde(default)]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    pub model: String,
    pub api_key_env: String,
    pub base_url: Option<String>,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Gcs,
    Local,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub bucket: String,
    /// Environment variable holding the OAuth bearer token for uploads.
    pub token_env: String,
    pub local_dir: PathBuf,
    /// Where records are staged before upload. Defaults to the OS temp dir.
    pub staging_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    pub autosave: bool,
    pub default_role: PlayerRole,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            autosave: defaults::AUTOSAVE,
            default_role: PlayerRole::Retailer,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            llm: LlmSettings {
                model: models::DEFAULT_OPENAI_MODEL.to_string(),
                api_key_env: defaults::API_KEY_ENV.to_string(),
                base_url: None,
                max_tokens: defaults::MAX_TOKENS,
            },
            storage: StorageSettings {
                backend: StorageBackend::Gcs,
                bucket: defaults::BUCKET.to_string(),
                token_env: defaults::GCS_TOKEN_ENV.to_string(),
                local_dir: PathBuf::from(defaults::LOCAL_RECORDS_DIR),
                staging_dir: None,
            },
            session: SessionSettings::default(),
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("beergame")
            .join("config.toml")
    }

    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Missing or unreadable files fall back to the defaults.
    pub fn load_from(path: &std::path::Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!(
                        path = %path.display(),
                        "Invalid config, using defaults: {}",
                        e
                    ),
                },
                Err(e) => tracing::warn!(path = %path.display(), "Failed to read config: {}", e),
            }
        }
        Self::default()
    }

    pub fn save(&self) -> Result<(), BeerGameError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), BeerGameError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| BeerGameError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the API key from the environment variable specified in settings.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.llm.api_key_env).ok()
    }

    pub fn build_llm_client(&self) -> Result<Box<dyn LlmClient>, BeerGameError> {
        let api_key = self.api_key().ok_or_else(|| {
            BeerGameError::Config(format!(
                "API key not found: set the {} environment variable",
                self.llm.api_key_env
            ))
        })?;

        let client = OpenAIClient::new(api_key)
            .with_model(&self.llm.model)
            .with_base_url(
                self.llm
                    .base_url
                    .clone()
                    .unwrap_or_else(|| endpoints::OPENAI_BASE_URL.to_string()),
            )
            .with_max_tokens(self.llm.max_tokens);
        Ok(Box::new(client))
    }

    pub fn build_record_store(&self) -> Result<Arc<dyn RecordStore>, BeerGameError> {
        match self.storage.backend {
            StorageBackend::Local => Ok(Arc::new(LocalDirStore::new(&self.storage.local_dir))),
            StorageBackend::Gcs => {
                let token = std::env::var(&self.storage.token_env).map_err(|_| {
                    BeerGameError::Config(format!(
                        "GCS token not found: set the {} environment variable",
                        self.storage.token_env
                    ))
                })?;
                Ok(Arc::new(GcsStore::new(&self.storage.bucket, token)))
            }
        }
    }
}
