//! Synchronized order store.
//!
//! The store holds the latest known order list together with its
//! synchronization status. Cached orders stay readable while a refresh
//! runs, failed refreshes keep the previous data, and overlapping
//! invalidations settle on the result of the most recently started fetch.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;

use orderdesk_core::{FetchError, FetchErrorKind, Order, OrderReader};

/// Where the store stands relative to the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// A refresh is running and has not settled yet.
    Pending,
    /// The most recent refresh applied a fresh order list.
    Success,
    /// The most recent refresh failed. Cached orders are still served.
    Error,
}

/// Terminal failure of a refresh, kept alongside the cached orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl SyncFailure {
    fn from_fetch(err: &FetchError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Point-in-time view of the store. Cheap to clone; the order list is
/// shared, not copied.
#[derive(Debug, Clone)]
pub struct SyncSnapshot {
    pub status: SyncStatus,
    /// Orders from the last successful refresh. Survives failed ones.
    pub orders: Arc<Vec<Order>>,
    /// Failure of the most recent settled refresh, if it failed.
    pub last_error: Option<SyncFailure>,
    /// Bumps every time a refresh settles. Zero until the first one does.
    pub revision: u64,
}

/// Lifecycle notifications, broadcast to every subscriber.
#[derive(Debug, Clone)]
pub enum SyncEvent {
    RefreshStarted,
    RefreshSettled { status: SyncStatus, revision: u64 },
}

struct StoreInner {
    snapshot: SyncSnapshot,
    /// Generation of the most recently requested refresh.
    latest: u64,
    /// Generation the running fetch task is serving, if any.
    in_flight: Option<u64>,
}

/// Shared handle to the order store. Clones observe and drive the same
/// state.
#[derive(Clone)]
pub struct SyncStore {
    reader: Arc<dyn OrderReader>,
    inner: Arc<Mutex<StoreInner>>,
    events: broadcast::Sender<SyncEvent>,
}

impl SyncStore {
    /// Creates a store that starts pending and empty. No fetch is issued
    /// until the first `refresh` or `invalidate`.
    pub fn new(reader: Arc<dyn OrderReader>) -> Self {
        let (events, _) = broadcast::channel(100);
        Self {
            reader,
            inner: Arc::new(Mutex::new(StoreInner {
                snapshot: SyncSnapshot {
                    status: SyncStatus::Pending,
                    orders: Arc::new(Vec::new()),
                    last_error: None,
                    revision: 0,
                },
                latest: 0,
                in_flight: None,
            })),
            events,
        }
    }

    /// Current snapshot. Never waits on the network.
    pub fn snapshot(&self) -> SyncSnapshot {
        self.lock().snapshot.clone()
    }

    /// Subscribes to lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.events.subscribe()
    }

    /// Marks the cached orders stale and schedules a refresh. Returns
    /// immediately; subscribers learn the outcome through events.
    pub fn invalidate(&self) {
        self.request_refresh();
    }

    /// Schedules a refresh and waits until it, or a refresh requested
    /// after it, settles. Returns the snapshot current at that point.
    pub async fn refresh(&self) -> SyncSnapshot {
        let mut events = self.subscribe();
        let requested = self.request_refresh();
        loop {
            let snapshot = self.snapshot();
            if snapshot.revision >= requested {
                return snapshot;
            }
            match events.recv().await {
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => return self.snapshot(),
            }
        }
    }

    /// Bumps the refresh generation and makes sure a fetch task is
    /// serving it. An already running fetch is left alone; it notices the
    /// newer generation when its result comes back.
    fn request_refresh(&self) -> u64 {
        let mut inner = self.lock();
        inner.latest += 1;
        inner.snapshot.status = SyncStatus::Pending;
        let generation = inner.latest;
        if inner.in_flight.is_none() {
            inner.in_flight = Some(generation);
            let store = self.clone();
            tokio::spawn(store.run_fetch(generation));
        }
        let _ = self.events.send(SyncEvent::RefreshStarted);
        generation
    }

    async fn run_fetch(self, mut generation: u64) {
        loop {
            let result = self.reader.fetch_orders().await;
            match self.apply_fetch(generation, result) {
                Some(next) => generation = next,
                None => return,
            }
        }
    }

    /// Applies a settled fetch. Returns the generation to fetch for next
    /// when the result arrived stale and had to be discarded.
    fn apply_fetch(
        &self,
        generation: u64,
        result: Result<Vec<Order>, FetchError>,
    ) -> Option<u64> {
        let mut inner = self.lock();

        // A newer invalidation was requested while this fetch was in
        // flight. Its result must not overwrite the newer request; drop
        // it and fetch again for the latest generation.
        if inner.latest > generation {
            tracing::debug!(
                "discarding stale fetch result (generation {}, latest {})",
                generation,
                inner.latest
            );
            inner.in_flight = Some(inner.latest);
            return Some(inner.latest);
        }

        match result {
            Ok(orders) => {
                tracing::debug!("refresh settled with {} orders", orders.len());
                inner.snapshot.status = SyncStatus::Success;
                inner.snapshot.orders = Arc::new(orders);
                inner.snapshot.last_error = None;
            }
            Err(err) => {
                tracing::warn!("refresh failed, keeping cached orders: {}", err);
                inner.snapshot.status = SyncStatus::Error;
                inner.snapshot.last_error = Some(SyncFailure::from_fetch(&err));
            }
        }
        inner.snapshot.revision = generation;
        inner.in_flight = None;

        let _ = self.events.send(SyncEvent::RefreshSettled {
            status: inner.snapshot.status,
            revision: generation,
        });
        None
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        // The lock only ever spans plain field updates, so poisoning
        // means a bug in this module rather than a recoverable state.
        self.inner.lock().expect("sync store lock poisoned")
    }
}
