use serde::{Deserialize, Serialize};

/// Numeric patient identifier as it arrives on the wire.
pub type PatientId = i32;

/// Milliseconds since the UNIX epoch. Tests freely use small synthetic values.
pub type TimestampMillis = i64;

/// One timestamped vital-sign measurement for a patient.
///
/// Records are immutable once built; the store only ever appends them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    patient_id: PatientId,
    value: f64,
    record_type: String,
    timestamp: TimestampMillis,
}

impl Record {
    pub fn new(
        patient_id: PatientId,
        value: f64,
        record_type: impl Into<String>,
        timestamp: TimestampMillis,
    ) -> Self {
        Self {
            patient_id,
            value,
            record_type: record_type.into(),
            timestamp,
        }
    }

    pub fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    pub fn timestamp(&self) -> TimestampMillis {
        self.timestamp
    }

    /// Whether this record carries the given type label (case-insensitive).
    pub fn is_type(&self, label: &str) -> bool {
        labels_match(&self.record_type, label)
    }

    /// Key under which the store de-duplicates this record. Two records of one
    /// patient collide when they share a timestamp and a case-insensitively
    /// equal type; the value is irrelevant.
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey::new(self.timestamp, &self.record_type)
    }
}

/// Hashable form of the duplicate predicate: timestamp plus folded type label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    timestamp: TimestampMillis,
    folded_type: String,
}

impl DedupKey {
    pub fn new(timestamp: TimestampMillis, record_type: &str) -> Self {
        Self {
            timestamp,
            folded_type: fold_label(record_type),
        }
    }
}

/// Case-insensitive label comparison.
pub fn labels_match(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        a.eq_ignore_ascii_case(b)
    } else {
        fold_label(a) == fold_label(b)
    }
}

fn fold_label(label: &str) -> String {
    if label.is_ascii() {
        label.to_ascii_lowercase()
    } else {
        label.to_lowercase()
    }
}
