pub mod store;
pub mod submit;

pub use store::{SyncEvent, SyncFailure, SyncSnapshot, SyncStatus, SyncStore};
pub use submit::SubmissionController;
