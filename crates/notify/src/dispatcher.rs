//! Fans one alert out to several sinks.
//!
//! Sinks receive each alert in registration order. A sink that drops or
//! mishandles an alert has no effect on the others.

use std::sync::Arc;

use vitals_core::Alert;

use crate::traits::AlertSink;

/// Composite sink delivering every alert to each registered sink.
#[derive(Default)]
pub struct Dispatcher {
    sinks: Vec<Arc<dyn AlertSink>>,
}

impl Dispatcher {
    /// Create an empty dispatcher.
    pub fn empty() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Create a dispatcher over the given sinks.
    pub fn with_sinks(sinks: Vec<Arc<dyn AlertSink>>) -> Self {
        Self { sinks }
    }

    /// Append a sink; it receives alerts after all earlier sinks.
    pub fn add(&mut self, sink: Arc<dyn AlertSink>) {
        self.sinks.push(sink);
    }

    /// Builder form of [`add`](Dispatcher::add).
    pub fn with(mut self, sink: Arc<dyn AlertSink>) -> Self {
        self.add(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl AlertSink for Dispatcher {
    fn on_alert(&self, alert: &Alert) {
        if self.sinks.is_empty() {
            tracing::debug!(condition = %alert.condition, "No alert sinks configured");
            return;
        }
        for sink in &self.sinks {
            sink.on_alert(alert);
        }
    }
}
