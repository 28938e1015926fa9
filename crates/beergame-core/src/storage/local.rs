use crate::error::BeerGameError;
use crate::storage::RecordStore;
use std::path::{Path, PathBuf};

/// Keeps records in a directory on this machine.
pub struct LocalDirStore {
    base_dir: PathBuf,
}

impl LocalDirStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

#[async_trait::async_trait]
impl RecordStore for LocalDirStore {
    async fn upload(&self, name: &str, path: &Path) -> Result<(), BeerGameError> {
        tokio::fs::create_dir_all(&self.base_dir).await.map_err(|e| {
            BeerGameError::storage(format!(
                "Failed to create records directory {}: {}",
                self.base_dir.display(),
                e
            ))
        })?;

        let dest = self.base_dir.join(name);
        tokio::fs::copy(path, &dest).await.map_err(|e| {
            BeerGameError::storage(format!("Failed to write {}: {}", dest.display(), e))
        })?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.base_dir.display().to_string()
    }
}
