//! Sink trait definition.

use vitals_core::Alert;

/// Receives alerts emitted by the rule engine.
///
/// Delivery is synchronous on the evaluating thread, so a slow sink slows
/// evaluation. Sinks own their failure handling: the engine neither retries
/// nor inspects the outcome.
pub trait AlertSink: Send + Sync {
    fn on_alert(&self, alert: &Alert);
}

impl<F> AlertSink for F
where
    F: Fn(&Alert) + Send + Sync,
{
    fn on_alert(&self, alert: &Alert) {
        self(alert)
    }
}
