use serde::{Deserialize, Serialize};

use crate::record::{PatientId, TimestampMillis};

/// A one-shot alert event produced by a rule.
///
/// Alerts carry no identity beyond their fields. A condition that keeps
/// re-triggering produces repeated, equal alerts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub patient_id: String,
    pub condition: String,
    pub timestamp: TimestampMillis,
}

impl Alert {
    pub fn new(patient_id: PatientId, condition: impl Into<String>, timestamp: TimestampMillis) -> Self {
        Self {
            patient_id: patient_id.to_string(),
            condition: condition.into(),
            timestamp,
        }
    }

    /// Single-line rendering used by log sinks and the detail formatter.
    pub fn details(&self) -> String {
        format!(
            "ALERT: Patient {} | Condition {} | Timestamp {}",
            self.patient_id, self.condition, self.timestamp
        )
    }
}
