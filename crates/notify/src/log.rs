//! Sink that reports alerts through `tracing`.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::DateTime;
use tracing::warn;
use vitals_core::Alert;

use crate::templating::{format_details, AlertDecoration, Priority};
use crate::traits::AlertSink;

/// Emits every alert as a `warn` event.
///
/// Tracks how often each `(patient, condition)` pair has fired during the
/// sink's lifetime and appends the repeat count once a pair fires again.
#[derive(Debug, Default)]
pub struct LogSink {
    priority: Option<Priority>,
    repeats: Mutex<HashMap<(String, String), u32>>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Number of times `condition` has been logged for `patient_id`.
    pub fn times_seen(&self, patient_id: &str, condition: &str) -> u32 {
        self.repeats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(patient_id.to_string(), condition.to_string()))
            .copied()
            .unwrap_or(0)
    }

    fn bump(&self, alert: &Alert) -> u32 {
        let mut repeats = self.repeats.lock().unwrap_or_else(PoisonError::into_inner);
        let count = repeats
            .entry((alert.patient_id.clone(), alert.condition.clone()))
            .or_insert(0);
        *count += 1;
        *count
    }

    /// The decorated line this sink logs for an alert seen `seen` times.
    pub fn render(&self, alert: &Alert, seen: u32) -> String {
        let decoration = AlertDecoration {
            priority: self.priority,
            repeat_count: (seen > 1).then_some(seen),
        };
        format_details(alert, &decoration)
    }
}

impl AlertSink for LogSink {
    fn on_alert(&self, alert: &Alert) {
        let seen = self.bump(alert);
        let at = DateTime::from_timestamp_millis(alert.timestamp)
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "-".to_string());
        warn!(
            patient_id = %alert.patient_id,
            condition = %alert.condition,
            timestamp = alert.timestamp,
            at = %at,
            "{}",
            self.render(alert, seen)
        );
    }
}
