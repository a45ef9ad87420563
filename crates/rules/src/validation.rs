//! Semantic checks for alert catalogue documents.
//!
//! Serde handles shape; these checks reject documents that parse but would
//! make a detector meaningless (inverted bands, degenerate windows).

use crate::loader::RuleError;
use crate::schema::{AlertCatalogRule, CATALOG_KIND};

/// Largest accepted `ecg.window_size`.
pub const MAX_ECG_WINDOW: usize = 10_000;

/// Validate a parsed catalogue, reporting every problem at once.
pub fn validate_catalog(rule: &AlertCatalogRule) -> Result<(), RuleError> {
    let mut errors = Vec::new();
    let spec = &rule.spec;

    if rule.kind != CATALOG_KIND {
        errors.push(format!("kind must be '{CATALOG_KIND}', got '{}'", rule.kind));
    }
    if rule.metadata.id.trim().is_empty() {
        errors.push("metadata.id must not be empty".to_string());
    }

    check_step(&mut errors, "trend.min_step", spec.trend.min_step);

    let bp = &spec.blood_pressure;
    check_band(&mut errors, "blood_pressure.systolic", bp.systolic_low, bp.systolic_high);
    check_band(&mut errors, "blood_pressure.diastolic", bp.diastolic_low, bp.diastolic_high);

    let hh = &spec.hypotensive_hypoxemia;
    check_finite(&mut errors, "hypotensive_hypoxemia.systolic_below", hh.systolic_below);
    check_finite(&mut errors, "hypotensive_hypoxemia.saturation_below", hh.saturation_below);
    if hh.max_gap_ms < 0 {
        errors.push("hypotensive_hypoxemia.max_gap_ms must not be negative".to_string());
    }

    if !(2..=MAX_ECG_WINDOW).contains(&spec.ecg.window_size) {
        errors.push(format!(
            "ecg.window_size must be between 2 and {MAX_ECG_WINDOW}, got {}",
            spec.ecg.window_size
        ));
    }
    check_step(&mut errors, "ecg.deviation_factor", spec.ecg.deviation_factor);

    let sat = &spec.saturation;
    check_finite(&mut errors, "saturation.low_below", sat.low_below);
    check_step(&mut errors, "saturation.rapid_drop", sat.rapid_drop);
    if sat.drop_window_ms < 0 {
        errors.push("saturation.drop_window_ms must not be negative".to_string());
    }

    check_band(&mut errors, "heart_rate", spec.heart_rate.low, spec.heart_rate.high);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(RuleError::Validation(errors.join("; ")))
    }
}

fn check_finite(errors: &mut Vec<String>, field: &str, value: f64) {
    if !value.is_finite() {
        errors.push(format!("{field} must be finite"));
    }
}

fn check_step(errors: &mut Vec<String>, field: &str, value: f64) {
    if !value.is_finite() || value < 0.0 {
        errors.push(format!("{field} must be a finite non-negative number, got {value}"));
    }
}

fn check_band(errors: &mut Vec<String>, field: &str, low: f64, high: f64) {
    if !low.is_finite() || !high.is_finite() {
        errors.push(format!("{field} bounds must be finite"));
    } else if low >= high {
        errors.push(format!("{field} low bound {low} must be below high bound {high}"));
    }
}
