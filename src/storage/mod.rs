//! Persistence layer
//!
//! All wizard state lives behind the [`KeyValueStore`] port, a string-keyed
//! store modelled on browser local storage. The draft and submission
//! stores are thin typed views over it.

mod draft;
mod error;
mod file;
mod memory;
mod submissions;
mod traits;

pub use draft::{DraftStore, DRAFT_RECORD_KEY, DRAFT_STEP_KEY};
pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use submissions::{Submission, SubmissionStore, SUBMISSIONS_KEY};
pub use traits::KeyValueStore;

#[cfg(test)]
pub use traits::MockKeyValueStore;
