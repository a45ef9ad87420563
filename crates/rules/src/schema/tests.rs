//! Schema deserialization tests.

use super::*;
use crate::detectors::AlertRule;
use vitals_core::VitalSign;

const STANDARD: &str = include_str!("../../../../data/rules/alert-catalog.yml");
const PEDIATRIC: &str = include_str!("../../../../data/rules/pediatric.yml");

#[test]
fn standard_document_matches_defaults() {
    let rule: AlertCatalogRule = serde_yaml::from_str(STANDARD).unwrap();
    assert_eq!(rule.kind, "AlertCatalog");
    assert_eq!(rule.metadata.id, "standard-vitals");
    assert_eq!(rule.spec, AlertCatalogSpec::default());
}

#[test]
fn partial_document_keeps_defaults_elsewhere() {
    let rule: AlertCatalogRule = serde_yaml::from_str(PEDIATRIC).unwrap();
    assert_eq!(rule.spec.heart_rate.high, 140.0);
    assert_eq!(rule.spec.blood_pressure.systolic_low, 70.0);
    assert_eq!(rule.spec.ecg, EcgParams::default());
    assert_eq!(rule.spec.saturation, SaturationParams::default());
}

#[test]
fn missing_spec_is_all_defaults() {
    let rule: AlertCatalogRule = serde_yaml::from_str(
        r#"
apiVersion: v1
kind: AlertCatalog
metadata:
  id: bare
  name: Bare
"#,
    )
    .unwrap();
    assert!(rule.metadata.enabled);
    assert_eq!(rule.spec, AlertCatalogSpec::default());
}

#[test]
fn unknown_fields_are_rejected() {
    let result: Result<AlertCatalogRule, _> = serde_yaml::from_str(
        r#"
apiVersion: v1
kind: AlertCatalog
metadata:
  id: typo
  name: Typo
spec:
  heart_rate:
    hi: 120
"#,
    );
    assert!(result.is_err());
}

#[test]
fn standard_rule_order() {
    let rules = AlertCatalogSpec::default().build_rules();
    let names: Vec<&str> = rules.iter().map(AlertRule::name).collect();
    assert_eq!(
        names,
        vec![
            "trend",
            "trend",
            "threshold",
            "hypotensive_hypoxemia",
            "ecg_anomaly",
            "saturation",
            "heart_rate",
        ]
    );
    assert!(matches!(
        rules[1],
        AlertRule::Trend { vital: VitalSign::DiastolicPressure, .. }
    ));
}

#[test]
fn disabled_catalog_compiles_to_nothing() {
    let mut rule = AlertCatalogRule::builtin();
    assert_eq!(rule.compile().len(), 7);
    rule.metadata.enabled = false;
    assert!(rule.compile().is_empty());
}
