//! Application state.
//!
//! One mutex covers both the record store and the connection registry, so
//! registration+snapshot and append+broadcast are each atomic: a late
//! joiner's snapshot contains exactly the records appended before it
//! registered, and it sees exactly the ones appended after as `RecordAdded`
//! events. The lock is never held across an await point.

use std::sync::{Arc, Mutex, MutexGuard};

use intake_core::{IntakeResult, PatientCandidate, PatientRecord, RecordStore};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::protocol::ServerMessage;
use crate::registry::{ConnectionId, ConnectionRegistry};

/// Application state shared across handlers.
#[derive(Clone, Default)]
pub struct AppState {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    store: RecordStore,
    registry: ConnectionRegistry,
}

impl AppState {
    /// Create state with an empty store and no connections.
    pub fn new() -> Self {
        Self::default()
    }

    // Mutation never suspends and never leaves the store half-updated, so
    // a poisoned lock (a panicking handler) is recovered, not propagated.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a channel and immediately queue the full record history on
    /// it, so late joiners see everything submitted so far.
    pub fn register(&self, sender: UnboundedSender<ServerMessage>) -> ConnectionId {
        let mut inner = self.lock();
        let snapshot = inner.store.snapshot();
        let id = inner.registry.register(sender);
        inner
            .registry
            .send_to(id, ServerMessage::InitialSnapshot(snapshot));
        id
    }

    /// Drop a channel from the broadcast set. Idempotent.
    pub fn unregister(&self, id: ConnectionId) {
        self.lock().registry.unregister(id);
    }

    /// Validate a submission, append it to the store, and fan the finalized
    /// record out to every registered channel, including the submitter's.
    pub fn submit(&self, candidate: PatientCandidate) -> IntakeResult<PatientRecord> {
        candidate.validate()?;

        let mut inner = self.lock();
        let record = inner.store.append(candidate);
        inner
            .registry
            .broadcast(&ServerMessage::RecordAdded(record.clone()));
        debug!(id = %record.id, channels = inner.registry.len(), "record broadcast");
        Ok(record)
    }

    /// Number of currently registered channels.
    pub fn connection_count(&self) -> usize {
        self.lock().registry.len()
    }

    /// Number of records submitted since process start.
    pub fn record_count(&self) -> usize {
        self.lock().store.len()
    }
}
