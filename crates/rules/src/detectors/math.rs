//! Rolling-window statistics.

use std::collections::VecDeque;

/// Fixed-capacity window over the most recent values; the oldest value is
/// evicted once capacity is exceeded.
#[derive(Debug, Clone)]
pub(super) struct RollingWindow {
    capacity: usize,
    values: VecDeque<f64>,
}

impl RollingWindow {
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            values: VecDeque::with_capacity(capacity.min(64)),
        }
    }

    pub(super) fn push(&mut self, value: f64) {
        self.values.push_back(value);
        if self.values.len() > self.capacity {
            self.values.pop_front();
        }
    }

    pub(super) fn is_full(&self) -> bool {
        self.capacity > 0 && self.values.len() == self.capacity
    }

    pub(super) fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Population standard deviation (divides by the count, not count - 1).
    pub(super) fn population_std_dev(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        let variance = self
            .values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / self.values.len() as f64;
        variance.sqrt()
    }
}
