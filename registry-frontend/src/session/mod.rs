//! Browser-scoped session state: storage backends and the session snapshot store.

pub mod clock;
pub mod storage;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use storage::{MemoryStorage, SessionStorage, StorageError};
pub use store::{SessionApi, SessionStore, GROUPS_DELIMITER, SESSION_KEY_PREFIX};
