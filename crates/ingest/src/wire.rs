use vitals_core::{PatientId, TimestampMillis};
use vitals_storage::PatientRegistry;

const FIELD_COUNT: usize = 4;

/// Errors from parsing a single wire line.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum WireError {
    #[error("expected {FIELD_COUNT} comma-separated fields, found {0}")]
    FieldCount(usize),

    #[error("invalid patient id '{0}'")]
    PatientId(String),

    #[error("invalid timestamp '{0}'")]
    Timestamp(String),

    #[error("empty record label")]
    EmptyLabel,

    #[error("invalid measurement value '{0}'")]
    Value(String),
}

/// One parsed `patientID,timestamp,label,value` line.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub patient_id: PatientId,
    pub timestamp: TimestampMillis,
    pub label: String,
    pub value: f64,
}

impl Measurement {
    /// Store this measurement. Returns `false` when it was a duplicate.
    pub fn apply(&self, registry: &PatientRegistry) -> bool {
        registry.add_measurement(self.patient_id, self.value, &self.label, self.timestamp)
    }
}

/// Parse one wire line. Fields are trimmed and a trailing unit suffix on the
/// value (`95%`) is dropped.
pub fn parse_line(line: &str) -> Result<Measurement, WireError> {
    let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
    if fields.len() != FIELD_COUNT {
        return Err(WireError::FieldCount(fields.len()));
    }

    let patient_id = fields[0]
        .parse::<PatientId>()
        .map_err(|_| WireError::PatientId(fields[0].to_string()))?;
    let timestamp = fields[1]
        .parse::<TimestampMillis>()
        .map_err(|_| WireError::Timestamp(fields[1].to_string()))?;
    let label = fields[2];
    if label.is_empty() {
        return Err(WireError::EmptyLabel);
    }
    let value = strip_suffix(fields[3])
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| WireError::Value(fields[3].to_string()))?;

    Ok(Measurement {
        patient_id,
        timestamp,
        label: label.to_string(),
        value,
    })
}

fn strip_suffix(raw: &str) -> &str {
    raw.trim_end_matches(|c: char| !c.is_ascii_digit() && c != '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_line() {
        let m = parse_line("1,1700000000000,HeartRate,72.5").unwrap();
        assert_eq!(
            m,
            Measurement {
                patient_id: 1,
                timestamp: 1_700_000_000_000,
                label: "HeartRate".into(),
                value: 72.5,
            }
        );
    }

    #[test]
    fn strips_percent_suffix() {
        let m = parse_line("7,10,BloodSaturation,95%").unwrap();
        assert_eq!(m.value, 95.0);
        let m = parse_line("7,10,BloodSaturation,93.5 %").unwrap();
        assert_eq!(m.value, 93.5);
    }

    #[test]
    fn trims_fields() {
        let m = parse_line("  3 , 42 , ECG , -0.25 \r").unwrap();
        assert_eq!(m.patient_id, 3);
        assert_eq!(m.timestamp, 42);
        assert_eq!(m.label, "ECG");
        assert_eq!(m.value, -0.25);
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert_eq!(parse_line("1,2,HeartRate"), Err(WireError::FieldCount(3)));
        assert_eq!(
            parse_line("1,2,HeartRate,70,extra"),
            Err(WireError::FieldCount(5))
        );
    }

    #[test]
    fn rejects_bad_numbers() {
        assert_eq!(
            parse_line("x,2,HeartRate,70"),
            Err(WireError::PatientId("x".into()))
        );
        assert_eq!(
            parse_line("1,soon,HeartRate,70"),
            Err(WireError::Timestamp("soon".into()))
        );
        assert_eq!(
            parse_line("1,2,HeartRate,abc"),
            Err(WireError::Value("abc".into()))
        );
        assert_eq!(
            parse_line("1,2,HeartRate,%"),
            Err(WireError::Value("%".into()))
        );
    }

    #[test]
    fn rejects_empty_label() {
        assert_eq!(parse_line("1,2, ,70"), Err(WireError::EmptyLabel));
    }

    #[test]
    fn apply_reports_duplicates() {
        let registry = PatientRegistry::new();
        let m = parse_line("1,2,HeartRate,70").unwrap();
        assert!(m.apply(&registry));
        assert!(!m.apply(&registry));
        assert_eq!(registry.record_count(), 1);
    }
}
