mod clock;
pub mod record;
mod recorder;
mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use record::{MetadataField, PersistedRecord, RecordName, RecordRow};
pub use recorder::SessionRecorder;
pub use store::{Session, SessionStore};
