use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

use tracing::trace;
use vitals_core::{DedupKey, PatientId, Record, TimestampMillis};

struct Inner {
    /// Insertion order is preserved; callers needing chronology sort.
    records: Vec<Record>,
    seen: HashSet<DedupKey>,
}

/// Append-only record list for one patient.
///
/// The dedup check and the append happen under one write lock, so concurrent
/// writers of the same `(timestamp, type)` store exactly one record.
pub struct PatientStore {
    patient_id: PatientId,
    inner: RwLock<Inner>,
}

impl PatientStore {
    pub fn new(patient_id: PatientId) -> Self {
        Self {
            patient_id,
            inner: RwLock::new(Inner {
                records: Vec::new(),
                seen: HashSet::new(),
            }),
        }
    }

    /// Append a measurement unless one with the same timestamp and type
    /// (ignoring case) is already stored. Returns whether it was stored.
    pub fn add_record(&self, value: f64, record_type: &str, timestamp: TimestampMillis) -> bool {
        let record = Record::new(self.patient_id, value, record_type, timestamp);
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        if !inner.seen.insert(record.dedup_key()) {
            trace!(
                patient_id = self.patient_id,
                record_type,
                timestamp,
                "duplicate record ignored"
            );
            return false;
        }
        inner.records.push(record);
        true
    }

    /// Snapshot of records with `start <= timestamp <= end`, in insertion order.
    pub fn get_records(&self, start: TimestampMillis, end: TimestampMillis) -> Vec<Record> {
        if start > end {
            return Vec::new();
        }
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .records
            .iter()
            .filter(|r| (start..=end).contains(&r.timestamp()))
            .cloned()
            .collect()
    }

    /// Snapshot of every stored record.
    pub fn all_records(&self) -> Vec<Record> {
        self.get_records(TimestampMillis::MIN, TimestampMillis::MAX)
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_timestamp_and_type_is_dropped() {
        let store = PatientStore::new(1);
        assert!(store.add_record(120.0, "SystolicPressure", 100));
        assert!(!store.add_record(130.0, "systolicpressure", 100));
        assert!(store.add_record(80.0, "DiastolicPressure", 100));
        assert!(store.add_record(125.0, "SystolicPressure", 101));

        let records = store.all_records();
        assert_eq!(records.len(), 3);
        // First write wins; the later value is not merged in.
        assert_eq!(records[0].value(), 120.0);
    }

    #[test]
    fn range_is_inclusive_and_keeps_insertion_order() {
        let store = PatientStore::new(1);
        for ts in [50, 10, 30, 20, 40] {
            store.add_record(ts as f64, "HeartRate", ts);
        }

        let got: Vec<i64> = store
            .get_records(20, 40)
            .iter()
            .map(|r| r.timestamp())
            .collect();
        assert_eq!(got, vec![30, 20, 40]);
    }

    #[test]
    fn inverted_or_empty_range_yields_nothing() {
        let store = PatientStore::new(1);
        assert!(store.get_records(0, 100).is_empty());
        store.add_record(70.0, "HeartRate", 50);
        assert!(store.get_records(100, 0).is_empty());
        assert!(store.get_records(51, 100).is_empty());
    }

    #[test]
    fn snapshot_is_detached_from_later_writes() {
        let store = PatientStore::new(1);
        store.add_record(70.0, "HeartRate", 1);
        let snapshot = store.all_records();
        store.add_record(71.0, "HeartRate", 2);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn extreme_timestamps_are_queryable() {
        let store = PatientStore::new(1);
        store.add_record(1.0, "ECG", i64::MIN);
        store.add_record(2.0, "ECG", i64::MAX);
        assert_eq!(store.all_records().len(), 2);
    }

    #[test]
    fn concurrent_duplicate_writers_store_one_record() {
        let store = PatientStore::new(1);
        std::thread::scope(|s| {
            for i in 0..8 {
                let store = &store;
                s.spawn(move || {
                    for ts in 0..200 {
                        store.add_record(i as f64, "ECG", ts);
                    }
                });
            }
        });
        assert_eq!(store.len(), 200);
    }
}
