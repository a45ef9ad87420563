use std::sync::{Arc, PoisonError, RwLock};

use indexmap::IndexMap;
use tracing::debug;
use vitals_core::{PatientId, Record, TimestampMillis};

use crate::store::PatientStore;

/// Owns every [`PatientStore`], keyed by patient id.
///
/// Share one registry between writers and the rule engine by wrapping it in
/// an `Arc`. Stores are never removed.
pub struct PatientRegistry {
    /// First-write order is kept so sweeps are reproducible.
    stores: RwLock<IndexMap<PatientId, Arc<PatientStore>>>,
}

impl PatientRegistry {
    pub fn new() -> Self {
        Self {
            stores: RwLock::new(IndexMap::new()),
        }
    }

    /// Store a measurement, creating the patient's store on first write.
    ///
    /// Returns `false` when the record duplicated an existing one.
    pub fn add_measurement(
        &self,
        patient_id: PatientId,
        value: f64,
        record_type: &str,
        timestamp: TimestampMillis,
    ) -> bool {
        self.store_for(patient_id)
            .add_record(value, record_type, timestamp)
    }

    /// Look up or create the store for `patient_id`.
    ///
    /// The read-locked fast path covers known patients; the create path
    /// re-checks under the write lock so racing first writes share one store.
    pub fn store_for(&self, patient_id: PatientId) -> Arc<PatientStore> {
        if let Some(store) = self.patient(patient_id) {
            return store;
        }

        let mut stores = self.stores.write().unwrap_or_else(PoisonError::into_inner);
        stores
            .entry(patient_id)
            .or_insert_with(|| {
                debug!(patient_id, "patient store created");
                Arc::new(PatientStore::new(patient_id))
            })
            .clone()
    }

    pub fn patient(&self, patient_id: PatientId) -> Option<Arc<PatientStore>> {
        self.stores
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&patient_id)
            .cloned()
    }

    /// Records of one patient in `[start, end]`; unknown patients yield nothing.
    pub fn get_records(
        &self,
        patient_id: PatientId,
        start: TimestampMillis,
        end: TimestampMillis,
    ) -> Vec<Record> {
        self.patient(patient_id)
            .map(|store| store.get_records(start, end))
            .unwrap_or_default()
    }

    /// Ids of every patient with a store, in first-write order.
    pub fn all_patients(&self) -> Vec<PatientId> {
        self.stores
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect()
    }

    /// Number of patients.
    pub fn len(&self) -> usize {
        self.stores.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total records across all patients.
    pub fn record_count(&self) -> usize {
        self.stores
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|s| s.len())
            .sum()
    }
}

impl Default for PatientRegistry {
    fn default() -> Self {
        Self::new()
    }
}
