//! In-memory append-only record store.
//!
//! The store is the sole source of truth for submitted records. It holds no
//! lock of its own: the owner provides the critical section around `append`,
//! which keeps the single-writer invariant intact even under a multithreaded
//! runtime.

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::record::{PatientCandidate, PatientRecord};

/// Append-only sequence of finalized patient records.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<PatientRecord>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl RecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a fresh id and timestamp to `candidate`, append it, and return
    /// the finalized record.
    ///
    /// Timestamps are clamped to the previous record's timestamp if the
    /// system clock steps backwards, so insertion order always carries
    /// non-decreasing timestamps.
    pub fn append(&mut self, candidate: PatientCandidate) -> PatientRecord {
        let now = Utc::now();
        let timestamp = match self.last_timestamp {
            Some(last) if now < last => last,
            _ => now,
        };
        self.last_timestamp = Some(timestamp);

        let record = candidate.into_record(Uuid::new_v4(), timestamp);
        debug!(id = %record.id, total = self.records.len() + 1, "record appended");
        self.records.push(record.clone());
        record
    }

    /// All records in insertion order. Consumers apply any display-time
    /// sorting themselves (the dashboard sorts descending by timestamp).
    pub fn snapshot(&self) -> Vec<PatientRecord> {
        self.records.clone()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Gender;
    use std::collections::HashSet;

    fn candidate(first_name: &str) -> PatientCandidate {
        PatientCandidate {
            first_name: first_name.to_string(),
            middle_name: None,
            last_name: "Doe".to_string(),
            date_of_birth: "1990-01-01".to_string(),
            gender: Gender::Female,
            phone_number: "0812345678".to_string(),
            email: "jane@example.com".to_string(),
            address: "1 Main St".to_string(),
            preferred_language: "English".to_string(),
            nationality: "Thai".to_string(),
            emergency_contact_name: None,
            emergency_contact_relationship: None,
            religion: None,
        }
    }

    #[test]
    fn test_append_assigns_unique_ids() {
        let mut store = RecordStore::new();
        let ids: HashSet<Uuid> = (0..100)
            .map(|i| store.append(candidate(&format!("p{i}"))).id)
            .collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_snapshot_preserves_insertion_order() {
        let mut store = RecordStore::new();
        for name in ["a", "b", "c"] {
            store.append(candidate(name));
        }
        let snapshot = store.snapshot();
        let names: Vec<&str> = snapshot.iter().map(|r| r.first_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_timestamps_non_decreasing() {
        let mut store = RecordStore::new();
        let records: Vec<_> = (0..50).map(|i| store.append(candidate(&format!("p{i}")))).collect();
        for pair in records.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }

    #[test]
    fn test_clock_regression_is_clamped() {
        let mut store = RecordStore::new();
        // Pretend the previous append happened in the future.
        store.last_timestamp = Some(Utc::now() + chrono::Duration::seconds(60));
        let pinned = store.last_timestamp.unwrap();
        let record = store.append(candidate("late"));
        assert_eq!(record.timestamp, pinned);
    }

    #[test]
    fn test_earlier_snapshot_is_prefix_of_later() {
        let mut store = RecordStore::new();
        store.append(candidate("a"));
        store.append(candidate("b"));
        let earlier = store.snapshot();
        store.append(candidate("c"));
        let later = store.snapshot();
        assert_eq!(&later[..earlier.len()], &earlier[..]);
    }

    #[test]
    fn test_finalized_record_keeps_submitted_fields() {
        let mut store = RecordStore::new();
        let record = store.append(candidate("Jane"));
        assert_eq!(record.first_name, "Jane");
        assert_eq!(record.last_name, "Doe");
        assert_eq!(record.gender, Gender::Female);
        assert_eq!(record.phone_number, "0812345678");
        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
    }
}
