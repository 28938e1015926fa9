mod gcs;
mod local;

pub use gcs::GcsStore;
pub use local::LocalDirStore;

use crate::error::BeerGameError;
use std::path::Path;

/// Durable destination for persisted records. Implementations write the
/// staged file at `path` under the object name `name`.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    async fn upload(&self, name: &str, path: &Path) -> Result<(), BeerGameError>;

    /// Short description for logs, e.g. `gs://beergame1`.
    fn describe(&self) -> String;
}
