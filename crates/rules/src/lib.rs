//! Clinical alert rule engine.
//!
//! This crate provides:
//! - Detectors for trends, paired thresholds, combined hypotension and
//!   hypoxemia, rolling ECG anomalies, saturation drops, and heart rate
//! - `RuleEngine` that scans a patient's stored records and delivers
//!   alerts to an `AlertSink`
//! - YAML alert catalogue documents with validation and file loading

pub mod detectors;
pub mod evaluator;
pub mod loader;
pub mod schema;
pub mod validation;

pub use detectors::AlertRule;
pub use evaluator::{RuleEngine, SweepSummary};
pub use loader::{load_catalog, parse_catalog, RuleError};
pub use schema::{AlertCatalogRule, AlertCatalogSpec};
