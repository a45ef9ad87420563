use std::sync::{Mutex, PoisonError};

use vitals_core::Alert;

use crate::traits::AlertSink;

/// Accumulates every delivered alert in arrival order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    alerts: Mutex<Vec<Alert>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything collected so far.
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain the collected alerts.
    pub fn take(&self) -> Vec<Alert> {
        std::mem::take(&mut *self.alerts.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.alerts.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Conditions collected so far, in order.
    pub fn conditions(&self) -> Vec<String> {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|a| a.condition.clone())
            .collect()
    }
}

impl AlertSink for CollectingSink {
    fn on_alert(&self, alert: &Alert) {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(alert.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_then_drains() {
        let sink = CollectingSink::new();
        sink.on_alert(&Alert::new(1, "LowSaturationAlert", 10));
        sink.on_alert(&Alert::new(2, "AbnormalHeartRate", 20));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.conditions(), vec!["LowSaturationAlert", "AbnormalHeartRate"]);

        let drained = sink.take();
        assert_eq!(drained[1].patient_id, "2");
        assert!(sink.is_empty());
    }
}
