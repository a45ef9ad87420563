//! Built-in alert detectors.
//!
//! Rules form a closed set: [`AlertRule`] holds one variant per detector,
//! each carrying its parameters from the alert catalogue. Detection is a
//! pure function of a patient's records.

mod evaluators;
mod math;
mod series;

pub use evaluators::*;

use serde::Serialize;
use vitals_core::{Alert, PatientId, Record, VitalSign};

use crate::schema::{
    BloodPressureParams, EcgParams, HeartRateParams, HypotensiveHypoxemiaParams, SaturationParams,
    TrendParams,
};

// ── Condition names ─────────────────────────────────────────────────

pub const CRITICAL_THRESHOLD: &str = "CriticalThresholdBreached";
pub const HYPOTENSIVE_HYPOXEMIA: &str = "Hypotensive Hypoxemia Alert";
pub const ECG_ANOMALY: &str = "ECG Anomaly Detected";
pub const LOW_SATURATION: &str = "LowSaturationAlert";
pub const RAPID_DROP_SATURATION: &str = "RapidDropSaturationAlert";
pub const ABNORMAL_HEART_RATE: &str = "AbnormalHeartRate";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Increasing,
    Decreasing,
}

/// `"<Type> Increasing Trend"` / `"<Type> Decreasing Trend"`.
pub fn trend_condition(vital: VitalSign, direction: TrendDirection) -> String {
    match direction {
        TrendDirection::Increasing => format!("{vital} Increasing Trend"),
        TrendDirection::Decreasing => format!("{vital} Decreasing Trend"),
    }
}

// ── Rule variants ───────────────────────────────────────────────────

/// One detector with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum AlertRule {
    /// Three-point rising/falling run on one signal.
    Trend { vital: VitalSign, params: TrendParams },
    /// Positionally paired systolic/diastolic critical bounds.
    Threshold(BloodPressureParams),
    /// Low systolic pressure near a low saturation reading.
    HypotensiveHypoxemia(HypotensiveHypoxemiaParams),
    /// Rolling mean + k·σ outlier on ECG values.
    EcgAnomaly(EcgParams),
    /// Low saturation and rapid saturation drops.
    Saturation(SaturationParams),
    /// Heart rate outside the acceptable band.
    HeartRate(HeartRateParams),
}

impl AlertRule {
    pub fn name(&self) -> &'static str {
        match self {
            AlertRule::Trend { .. } => "trend",
            AlertRule::Threshold(_) => "threshold",
            AlertRule::HypotensiveHypoxemia(_) => "hypotensive_hypoxemia",
            AlertRule::EcgAnomaly(_) => "ecg_anomaly",
            AlertRule::Saturation(_) => "saturation",
            AlertRule::HeartRate(_) => "heart_rate",
        }
    }

    /// Run this detector over `records`, appending alerts to `out`.
    pub fn check(&self, patient_id: PatientId, records: &[Record], out: &mut Vec<Alert>) {
        match self {
            AlertRule::Trend { vital, params } => {
                check_trend(patient_id, records, *vital, params, out)
            }
            AlertRule::Threshold(p) => check_threshold(patient_id, records, p, out),
            AlertRule::HypotensiveHypoxemia(p) => {
                check_hypotensive_hypoxemia(patient_id, records, p, out)
            }
            AlertRule::EcgAnomaly(p) => check_ecg(patient_id, records, p, out),
            AlertRule::Saturation(p) => check_saturation(patient_id, records, p, out),
            AlertRule::HeartRate(p) => check_heart_rate(patient_id, records, p, out),
        }
    }
}
