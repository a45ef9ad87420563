//! AlertCatalog rule kind: per-rule thresholds and windows.

use serde::{Deserialize, Serialize};
use vitals_core::VitalSign;

use crate::detectors::AlertRule;

use super::metadata::CommonMetadata;

pub const CATALOG_KIND: &str = "AlertCatalog";

// ── Document ────────────────────────────────────────────────────────

/// Top-level AlertCatalog document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AlertCatalogRule {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: CommonMetadata,
    #[serde(default)]
    pub spec: AlertCatalogSpec,
}

impl AlertCatalogRule {
    /// The catalogue used when no document is configured.
    pub fn builtin() -> Self {
        Self {
            api_version: "v1".to_string(),
            kind: CATALOG_KIND.to_string(),
            metadata: CommonMetadata {
                id: "builtin".to_string(),
                name: "Built-in alert catalogue".to_string(),
                description: None,
                tags: None,
                enabled: true,
            },
            spec: AlertCatalogSpec::default(),
        }
    }

    /// Rule list for this document; a disabled catalogue yields no rules.
    pub fn compile(&self) -> Vec<AlertRule> {
        if !self.metadata.enabled {
            return Vec::new();
        }
        self.spec.build_rules()
    }
}

/// Parameters for every rule in the standard list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AlertCatalogSpec {
    pub trend: TrendParams,
    pub blood_pressure: BloodPressureParams,
    pub hypotensive_hypoxemia: HypotensiveHypoxemiaParams,
    pub ecg: EcgParams,
    pub saturation: SaturationParams,
    pub heart_rate: HeartRateParams,
}

impl AlertCatalogSpec {
    /// The standard rule list in evaluation order.
    pub fn build_rules(&self) -> Vec<AlertRule> {
        vec![
            AlertRule::Trend {
                vital: VitalSign::SystolicPressure,
                params: self.trend.clone(),
            },
            AlertRule::Trend {
                vital: VitalSign::DiastolicPressure,
                params: self.trend.clone(),
            },
            AlertRule::Threshold(self.blood_pressure.clone()),
            AlertRule::HypotensiveHypoxemia(self.hypotensive_hypoxemia.clone()),
            AlertRule::EcgAnomaly(self.ecg.clone()),
            AlertRule::Saturation(self.saturation.clone()),
            AlertRule::HeartRate(self.heart_rate.clone()),
        ]
    }
}

// ── Per-rule parameters ─────────────────────────────────────────────

/// Three-point trend: both consecutive steps must exceed `min_step`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TrendParams {
    pub min_step: f64,
}

impl Default for TrendParams {
    fn default() -> Self {
        Self { min_step: 10.0 }
    }
}

/// Critical bounds for positionally paired systolic/diastolic readings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BloodPressureParams {
    pub systolic_high: f64,
    pub systolic_low: f64,
    pub diastolic_high: f64,
    pub diastolic_low: f64,
}

impl Default for BloodPressureParams {
    fn default() -> Self {
        Self {
            systolic_high: 180.0,
            systolic_low: 90.0,
            diastolic_high: 120.0,
            diastolic_low: 60.0,
        }
    }
}

/// Low systolic pressure and low saturation within `max_gap_ms` of each other.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HypotensiveHypoxemiaParams {
    pub systolic_below: f64,
    pub saturation_below: f64,
    pub max_gap_ms: i64,
}

impl Default for HypotensiveHypoxemiaParams {
    fn default() -> Self {
        Self {
            systolic_below: 90.0,
            saturation_below: 92.0,
            max_gap_ms: 60_000,
        }
    }
}

/// Rolling ECG window: fire when a value exceeds mean + factor x std-dev.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EcgParams {
    pub window_size: usize,
    pub deviation_factor: f64,
}

impl Default for EcgParams {
    fn default() -> Self {
        Self {
            window_size: 10,
            deviation_factor: 2.0,
        }
    }
}

/// Low saturation and rapid-drop detection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SaturationParams {
    pub low_below: f64,
    pub rapid_drop: f64,
    pub drop_window_ms: i64,
}

impl Default for SaturationParams {
    fn default() -> Self {
        Self {
            low_below: 92.0,
            rapid_drop: 5.0,
            drop_window_ms: 10 * 60 * 1000,
        }
    }
}

/// Acceptable heart-rate band, inclusive on both ends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HeartRateParams {
    pub low: f64,
    pub high: f64,
}

impl Default for HeartRateParams {
    fn default() -> Self {
        Self {
            low: 60.0,
            high: 100.0,
        }
    }
}
