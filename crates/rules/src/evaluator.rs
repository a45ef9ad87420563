//! Per-patient rule evaluation and alert delivery.

use std::sync::Arc;

use tracing::{debug, trace};
use vitals_core::{Alert, PatientId, Record, TimestampMillis};
use vitals_notify::AlertSink;
use vitals_storage::PatientRegistry;

use crate::detectors::AlertRule;
use crate::schema::AlertCatalogSpec;

// ── Rule engine ─────────────────────────────────────────────────────

/// Evaluates the rule list against patients in a shared registry.
///
/// Each evaluation takes one snapshot of the patient's records, runs every
/// rule over it in list order, and delivers the alerts to the sink
/// synchronously. No state is carried between evaluations.
pub struct RuleEngine {
    registry: Arc<PatientRegistry>,
    rules: Vec<AlertRule>,
    sink: Arc<dyn AlertSink>,
}

/// Outcome of one [`RuleEngine::evaluate_all`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub patients: usize,
    pub alerts: usize,
}

impl RuleEngine {
    /// Engine running the standard rule list with default thresholds.
    pub fn new(registry: Arc<PatientRegistry>, sink: Arc<dyn AlertSink>) -> Self {
        Self::with_catalog(registry, sink, &AlertCatalogSpec::default())
    }

    /// Engine running the standard rule list with catalogue thresholds.
    pub fn with_catalog(
        registry: Arc<PatientRegistry>,
        sink: Arc<dyn AlertSink>,
        catalog: &AlertCatalogSpec,
    ) -> Self {
        Self::with_rules(registry, sink, catalog.build_rules())
    }

    /// Engine running exactly `rules`, in the given order.
    pub fn with_rules(
        registry: Arc<PatientRegistry>,
        sink: Arc<dyn AlertSink>,
        rules: Vec<AlertRule>,
    ) -> Self {
        Self {
            registry,
            rules,
            sink,
        }
    }

    pub fn rules(&self) -> &[AlertRule] {
        &self.rules
    }

    pub fn registry(&self) -> &Arc<PatientRegistry> {
        &self.registry
    }

    /// Alerts the rules would raise for `patient_id`, without delivering them.
    pub fn scan(&self, patient_id: PatientId) -> Vec<Alert> {
        let records = self.registry.get_records(
            patient_id,
            TimestampMillis::MIN,
            TimestampMillis::MAX,
        );
        self.scan_records(patient_id, &records)
    }

    fn scan_records(&self, patient_id: PatientId, records: &[Record]) -> Vec<Alert> {
        let mut alerts = Vec::new();
        if records.is_empty() {
            return alerts;
        }
        for rule in &self.rules {
            let before = alerts.len();
            rule.check(patient_id, records, &mut alerts);
            trace!(
                patient_id,
                rule = rule.name(),
                alerts = alerts.len() - before,
                "rule evaluated"
            );
        }
        alerts
    }

    /// Scan `patient_id` and deliver each alert to the sink, in rule order.
    ///
    /// Returns the number of alerts delivered; unknown patients deliver none.
    pub fn evaluate(&self, patient_id: PatientId) -> usize {
        let alerts = self.scan(patient_id);
        for alert in &alerts {
            self.sink.on_alert(alert);
        }
        debug!(patient_id, alerts = alerts.len(), "patient evaluated");
        alerts.len()
    }

    /// Evaluate every known patient in registry order.
    pub fn evaluate_all(&self) -> SweepSummary {
        let patients = self.registry.all_patients();
        let alerts = patients.iter().map(|&id| self.evaluate(id)).sum();
        let summary = SweepSummary {
            patients: patients.len(),
            alerts,
        };
        debug!(patients = summary.patients, alerts = summary.alerts, "sweep complete");
        summary
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use vitals_core::VitalSign;
    use vitals_notify::CollectingSink;

    use crate::detectors::*;
    use crate::schema::{EcgParams, HeartRateParams, TrendParams};

    fn engine() -> (RuleEngine, Arc<CollectingSink>) {
        let registry = Arc::new(PatientRegistry::new());
        let sink = Arc::new(CollectingSink::new());
        (RuleEngine::new(registry, sink.clone()), sink)
    }

    #[test]
    fn threshold_breach_delivers_exactly_one_alert() {
        let (engine, sink) = engine();
        let registry = engine.registry();
        registry.add_measurement(1, 185.0, "SystolicPressure", 1_700_000_000_000);
        registry.add_measurement(1, 65.0, "DiastolicPressure", 1_700_000_000_000);

        assert_eq!(engine.evaluate(1), 1);
        assert_eq!(
            sink.alerts(),
            vec![Alert::new(1, CRITICAL_THRESHOLD, 1_700_000_000_000)]
        );
    }

    #[test]
    fn trend_delivers_exactly_one_alert() {
        let (engine, sink) = engine();
        let registry = engine.registry();
        registry.add_measurement(1, 110.0, "SystolicPressure", 1);
        registry.add_measurement(1, 125.0, "SystolicPressure", 2);
        registry.add_measurement(1, 140.0, "SystolicPressure", 3);

        engine.evaluate(1);
        assert_eq!(
            sink.alerts(),
            vec![Alert::new(1, "SystolicPressure Increasing Trend", 3)]
        );
    }

    #[test]
    fn alerts_follow_rule_order() {
        let (engine, sink) = engine();
        let registry = engine.registry();
        // Heart rate is written first but its rule runs last.
        registry.add_measurement(2, 130.0, "HeartRate", 1);
        registry.add_measurement(2, 85.0, "BloodSaturation", 2);
        registry.add_measurement(2, 80.0, "SystolicPressure", 3);
        registry.add_measurement(2, 70.0, "DiastolicPressure", 3);

        engine.evaluate(2);
        assert_eq!(
            sink.conditions(),
            vec![
                CRITICAL_THRESHOLD,
                HYPOTENSIVE_HYPOXEMIA,
                LOW_SATURATION,
                ABNORMAL_HEART_RATE,
            ]
        );
    }

    #[test]
    fn unknown_patient_delivers_nothing() {
        let (engine, sink) = engine();
        assert_eq!(engine.evaluate(99), 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn repeated_evaluation_repeats_alerts() {
        let (engine, sink) = engine();
        engine.registry().add_measurement(3, 40.0, "HeartRate", 1);
        engine.evaluate(3);
        engine.evaluate(3);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn scan_does_not_deliver() {
        let (engine, sink) = engine();
        engine.registry().add_measurement(3, 40.0, "HeartRate", 1);
        assert_eq!(engine.scan(3).len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn custom_rule_subset() {
        let registry = Arc::new(PatientRegistry::new());
        let sink = Arc::new(CollectingSink::new());
        let engine = RuleEngine::with_rules(
            registry.clone(),
            sink.clone(),
            vec![
                AlertRule::HeartRate(HeartRateParams { low: 50.0, high: 150.0 }),
                AlertRule::Trend {
                    vital: VitalSign::HeartRate,
                    params: TrendParams::default(),
                },
            ],
        );
        for (i, hr) in [45.0, 60.0, 75.0].iter().enumerate() {
            registry.add_measurement(1, *hr, "HeartRate", i as i64);
        }
        registry.add_measurement(1, 70.0, "BloodSaturation", 1);

        engine.evaluate(1);
        assert_eq!(
            sink.conditions(),
            vec![ABNORMAL_HEART_RATE, "HeartRate Increasing Trend"]
        );
    }

    #[test]
    fn unbounded_ecg_window_never_fills() {
        let registry = Arc::new(PatientRegistry::new());
        let sink = Arc::new(CollectingSink::new());
        let engine = RuleEngine::with_rules(
            registry.clone(),
            sink.clone(),
            vec![AlertRule::EcgAnomaly(EcgParams {
                window_size: usize::MAX,
                deviation_factor: 2.0,
            })],
        );
        registry.add_measurement(1, 72.0, "HeartRate", 1);
        registry.add_measurement(2, 0.4, "ECG", 1);
        registry.add_measurement(2, 9.0, "ECG", 2);

        assert_eq!(engine.evaluate_all(), SweepSummary { patients: 2, alerts: 0 });
        assert!(sink.is_empty());
    }

    #[test]
    fn sweep_covers_every_patient() {
        let (engine, sink) = engine();
        let registry = engine.registry();
        registry.add_measurement(10, 40.0, "HeartRate", 1);
        registry.add_measurement(11, 75.0, "HeartRate", 1);
        registry.add_measurement(12, 160.0, "HeartRate", 1);

        let summary = engine.evaluate_all();
        assert_eq!(summary, SweepSummary { patients: 3, alerts: 2 });
        let patients: Vec<String> = sink.alerts().into_iter().map(|a| a.patient_id).collect();
        assert_eq!(patients, vec!["10", "12"]);
    }

    #[test]
    fn closure_sink_receives_alerts() {
        let registry = Arc::new(PatientRegistry::new());
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = {
            let seen = seen.clone();
            move |alert: &Alert| seen.lock().unwrap().push(alert.timestamp)
        };
        let engine = RuleEngine::new(registry.clone(), Arc::new(sink));
        registry.add_measurement(5, 150.0, "HeartRate", 42);
        engine.evaluate(5);
        assert_eq!(*seen.lock().unwrap(), vec![42]);
    }
}
