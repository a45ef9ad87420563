//! Bridges synchronous delivery into async consumers.

use tokio::sync::mpsc;
use tracing::debug;
use vitals_core::Alert;

use crate::traits::AlertSink;

/// Forwards alerts into an unbounded tokio channel.
///
/// `on_alert` never blocks, so the evaluating thread is not held up by the
/// consumer. Alerts sent after the receiver is dropped are discarded.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Alert>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Alert>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl AlertSink for ChannelSink {
    fn on_alert(&self, alert: &Alert) {
        if self.tx.send(alert.clone()).is_err() {
            debug!(
                patient_id = %alert.patient_id,
                condition = %alert.condition,
                "alert receiver closed, dropping alert"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn forwards_in_order() {
        let (sink, mut rx) = ChannelSink::new();
        sink.on_alert(&Alert::new(1, "ECG Anomaly Detected", 1));
        sink.on_alert(&Alert::new(1, "AbnormalHeartRate", 2));
        drop(sink);

        assert_eq!(rx.recv().await.map(|a| a.timestamp), Some(1));
        assert_eq!(rx.recv().await.map(|a| a.timestamp), Some(2));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn closed_receiver_is_ignored() {
        let (sink, rx) = ChannelSink::new();
        drop(rx);
        // Must not panic.
        sink.on_alert(&Alert::new(1, "AbnormalHeartRate", 2));
    }
}
