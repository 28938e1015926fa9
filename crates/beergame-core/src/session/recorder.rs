use crate::error::{BeerGameError, Result};
use crate::session::clock::{Clock, SystemClock};
use crate::session::record::{
    normalize_identifier, participant_segment, PersistedRecord, RecordName,
};
use crate::session::Session;
use crate::storage::RecordStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Serializes sessions and hands them to a [`RecordStore`].
///
/// Every failure comes back as an error value; the session itself is never
/// modified by a save attempt.
pub struct SessionRecorder {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
    staging_dir: PathBuf,
}

impl SessionRecorder {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            staging_dir: std::env::temp_dir(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Parent directory for the per-save staging folders.
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Persist `session` under the study / team id and return the record's
    /// file name. Without an id nothing is written and no upload is attempted.
    pub async fn persist(&self, session: &Session, external_id: Option<&str>) -> Result<String> {
        let id = normalize_identifier(external_id).ok_or(BeerGameError::MissingIdentifier)?;

        let ended_at = self.clock.now();
        let record = PersistedRecord::from_session(session, ended_at);
        let file_name = RecordName::new(session.mode(), id, ended_at).file_name();

        let staging = self.create_staging(id)?;
        let result = self.upload_staged(&record, staging.path(), &file_name).await;
        release_staging(staging);

        match result {
            Ok(()) => {
                tracing::info!(
                    record = %file_name,
                    store = %self.store.describe(),
                    turns = session.turns().len(),
                    "Saved conversation"
                );
                Ok(file_name)
            }
            Err(e) => {
                tracing::warn!(record = %file_name, "Failed to save conversation: {}", e);
                Err(e)
            }
        }
    }

    fn create_staging(&self, id: &str) -> Result<TempDir> {
        std::fs::create_dir_all(&self.staging_dir)?;
        let prefix = format!("conv_history_{}_", participant_segment(id));
        let dir = tempfile::Builder::new()
            .prefix(&prefix)
            .tempdir_in(&self.staging_dir)?;
        tracing::debug!(path = %dir.path().display(), "Staging conversation record");
        Ok(dir)
    }

    async fn upload_staged(
        &self,
        record: &PersistedRecord,
        staging: &Path,
        file_name: &str,
    ) -> Result<()> {
        let local_path = staging.join(file_name);
        record.write_csv(&local_path)?;
        self.store.upload(file_name, &local_path).await
    }
}

/// Best-effort removal of the staging folder; failures are only logged.
fn release_staging(staging: TempDir) {
    let path = staging.path().to_path_buf();
    if let Err(e) = staging.close() {
        tracing::warn!(path = %path.display(), "Failed to remove staging directory: {}", e);
    }
}
