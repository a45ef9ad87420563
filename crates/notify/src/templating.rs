//! Plain-text rendering of alert details.
//!
//! An alert's base line can be decorated with a priority prefix and a
//! repeat-count suffix; both are optional and independent.

use serde::{Deserialize, Serialize};
use vitals_core::Alert;

/// Priority tag prepended to a rendered alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
            Priority::Critical => write!(f, "Critical"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            other => Err(format!("unknown priority '{other}'")),
        }
    }
}

/// Optional decorations applied by [`format_details`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertDecoration {
    pub priority: Option<Priority>,
    pub repeat_count: Option<u32>,
}

impl AlertDecoration {
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_repeats(mut self, count: u32) -> Self {
        self.repeat_count = Some(count);
        self
    }
}

/// Render `alert` as a single line.
///
/// `[PRIORITY: High] ALERT: Patient 1 | Condition X | Timestamp 5| Repeats: 2`
pub fn format_details(alert: &Alert, decoration: &AlertDecoration) -> String {
    let mut line = String::new();
    if let Some(priority) = decoration.priority {
        line.push_str(&format!("[PRIORITY: {priority}] "));
    }
    line.push_str(&alert.details());
    if let Some(count) = decoration.repeat_count {
        line.push_str(&format!("| Repeats: {count}"));
    }
    line
}
