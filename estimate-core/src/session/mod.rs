//! The draft session: one live in-progress estimate per session, the wizard
//! step it is on, and the durable-slot persistence around it.

mod storage;
mod store;

pub use storage::{MemoryStorage, PersistentSession, SessionStorage, StorageError};
pub use store::{DraftSession, STEP_COUNT};
