//! Detector implementations.
//!
//! Each detector filters the patient's records down to the signals it reads,
//! sorts them chronologically, and appends any alerts it produces to `out`
//! in generation order.

use vitals_core::{Alert, PatientId, Record, VitalSign};

use crate::schema::{
    BloodPressureParams, EcgParams, HeartRateParams, HypotensiveHypoxemiaParams, SaturationParams,
    TrendParams,
};

use super::math::RollingWindow;
use super::series::series;
use super::{
    trend_condition, TrendDirection, ABNORMAL_HEART_RATE, CRITICAL_THRESHOLD, ECG_ANOMALY,
    HYPOTENSIVE_HYPOXEMIA, LOW_SATURATION, RAPID_DROP_SATURATION,
};

// ── Trend ───────────────────────────────────────────────────────────

/// Flag every overlapping three-point window whose two steps both rise (or
/// both fall) by more than `min_step`. Fires at the third point.
pub fn check_trend(
    patient_id: PatientId,
    records: &[Record],
    vital: VitalSign,
    params: &TrendParams,
    out: &mut Vec<Alert>,
) {
    let points = series(records, vital);
    for window in points.windows(3) {
        let (v1, v2, v3) = (window[0].value(), window[1].value(), window[2].value());
        let direction = if v2 - v1 > params.min_step && v3 - v2 > params.min_step {
            TrendDirection::Increasing
        } else if v1 - v2 > params.min_step && v2 - v3 > params.min_step {
            TrendDirection::Decreasing
        } else {
            continue;
        };
        out.push(Alert::new(
            patient_id,
            trend_condition(vital, direction),
            window[2].timestamp(),
        ));
    }
}

// ── Paired threshold ────────────────────────────────────────────────

/// Pair the i-th systolic reading with the i-th diastolic reading (by sorted
/// position, not by timestamp) and flag any pair outside the critical bounds.
pub fn check_threshold(
    patient_id: PatientId,
    records: &[Record],
    params: &BloodPressureParams,
    out: &mut Vec<Alert>,
) {
    let systolic = series(records, VitalSign::SystolicPressure);
    let diastolic = series(records, VitalSign::DiastolicPressure);

    for (sys, dia) in systolic.iter().zip(diastolic.iter()) {
        let breached = sys.value() > params.systolic_high
            || sys.value() < params.systolic_low
            || dia.value() > params.diastolic_high
            || dia.value() < params.diastolic_low;
        if breached {
            out.push(Alert::new(
                patient_id,
                CRITICAL_THRESHOLD,
                sys.timestamp().max(dia.timestamp()),
            ));
        }
    }
}

// ── Combined hypotension + hypoxemia ────────────────────────────────

/// Emit at most one alert per scan: the earliest hypotensive reading that has
/// a low-saturation reading within `max_gap_ms` either side.
pub fn check_hypotensive_hypoxemia(
    patient_id: PatientId,
    records: &[Record],
    params: &HypotensiveHypoxemiaParams,
    out: &mut Vec<Alert>,
) {
    let systolic = series(records, VitalSign::SystolicPressure);
    let saturation = series(records, VitalSign::BloodSaturation);
    let max_gap = u64::try_from(params.max_gap_ms).unwrap_or(0);

    let first = systolic
        .iter()
        .filter(|bp| bp.value() < params.systolic_below)
        .find(|bp| {
            saturation.iter().any(|o2| {
                bp.timestamp().abs_diff(o2.timestamp()) <= max_gap
                    && o2.value() < params.saturation_below
            })
        });

    if let Some(bp) = first {
        out.push(Alert::new(patient_id, HYPOTENSIVE_HYPOXEMIA, bp.timestamp()));
    }
}

// ── Rolling ECG anomaly ─────────────────────────────────────────────

/// Slide a window over ECG values; once full, flag a value that exceeds the
/// window mean by more than `deviation_factor` population std-devs. The
/// statistics include the value being tested.
pub fn check_ecg(patient_id: PatientId, records: &[Record], params: &EcgParams, out: &mut Vec<Alert>) {
    let readings = series(records, VitalSign::Ecg);
    if readings.is_empty() {
        return;
    }
    let mut window = RollingWindow::new(params.window_size);

    for record in readings {
        window.push(record.value());
        if !window.is_full() {
            continue;
        }
        let limit = window.mean() + params.deviation_factor * window.population_std_dev();
        if record.value() > limit {
            out.push(Alert::new(patient_id, ECG_ANOMALY, record.timestamp()));
        }
    }
}

// ── Saturation ──────────────────────────────────────────────────────

/// Low-saturation alerts for every reading under `low_below`, followed by at
/// most one rapid-drop alert per starting reading.
pub fn check_saturation(
    patient_id: PatientId,
    records: &[Record],
    params: &SaturationParams,
    out: &mut Vec<Alert>,
) {
    let readings = series(records, VitalSign::BloodSaturation);

    for r in &readings {
        if r.value() < params.low_below {
            out.push(Alert::new(patient_id, LOW_SATURATION, r.timestamp()));
        }
    }

    for (i, start) in readings.iter().enumerate() {
        for next in &readings[i + 1..] {
            // Chronological order: once past the window nothing later re-enters it.
            if next.timestamp().saturating_sub(start.timestamp()) > params.drop_window_ms {
                break;
            }
            if start.value() - next.value() >= params.rapid_drop {
                out.push(Alert::new(patient_id, RAPID_DROP_SATURATION, next.timestamp()));
                break;
            }
        }
    }
}

// ── Heart rate ──────────────────────────────────────────────────────

pub fn check_heart_rate(
    patient_id: PatientId,
    records: &[Record],
    params: &HeartRateParams,
    out: &mut Vec<Alert>,
) {
    for r in series(records, VitalSign::HeartRate) {
        if r.value() < params.low || r.value() > params.high {
            out.push(Alert::new(patient_id, ABNORMAL_HEART_RATE, r.timestamp()));
        }
    }
}
