//! Order submission with duplicate-submit protection.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use orderdesk_core::{OrderWriter, SubmitError};

use crate::store::SyncStore;

/// Serializes order submissions. At most one is in flight at a time, and
/// a successful one marks the store stale so the order list catches up.
pub struct SubmissionController {
    writer: Arc<dyn OrderWriter>,
    store: SyncStore,
    in_flight: AtomicBool,
}

impl SubmissionController {
    pub fn new(writer: Arc<dyn OrderWriter>, store: SyncStore) -> Self {
        Self {
            writer,
            store,
            in_flight: AtomicBool::new(false),
        }
    }

    /// True while a submission is running.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Submits an order for `item_count` items and returns the created
    /// order id when the service reports one. Empty orders and overlapping
    /// submissions are rejected before anything goes on the wire.
    pub async fn submit(&self, item_count: u32) -> Result<Option<i64>, SubmitError> {
        if item_count == 0 {
            return Err(SubmitError::InvalidItemCount(item_count));
        }
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(SubmitError::InFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let created = self.writer.submit_order(item_count).await?;
        tracing::info!("order submitted ({} items)", item_count);
        self.store.invalidate();
        Ok(created)
    }
}

/// Clears the in-flight flag when the submission ends, on every path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
