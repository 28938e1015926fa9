/// Beer Game coach: centralized constants.
/// Model names, endpoints and defaults live here.

// ─── Models ───────────────────────────────────────────────────────────────────

pub mod models {
    pub const DEFAULT_OPENAI_MODEL: &str = "gpt-5-mini";
}

// ─── API Endpoints ────────────────────────────────────────────────────────────

pub mod endpoints {
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com";
    pub const GCS_UPLOAD_BASE_URL: &str = "https://storage.googleapis.com/upload/storage/v1";
}

// ─── Default Settings ─────────────────────────────────────────────────────────

pub mod defaults {
    pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
    pub const MAX_TOKENS: u32 = 4096;
    pub const BUCKET: &str = "beergame1";
    pub const GCS_TOKEN_ENV: &str = "GCS_ACCESS_TOKEN";
    pub const LOCAL_RECORDS_DIR: &str = "beergame-records";
    pub const AUTOSAVE: bool = true;
}
