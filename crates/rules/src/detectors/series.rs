//! Per-signal views over a patient's records.

use vitals_core::{Record, VitalSign};

/// Records of one vital sign, sorted by timestamp.
///
/// The sort is stable, so records sharing a timestamp keep insertion order.
pub(super) fn series(records: &[Record], vital: VitalSign) -> Vec<&Record> {
    let mut out: Vec<&Record> = records
        .iter()
        .filter(|r| r.is_type(vital.label()))
        .collect();
    out.sort_by_key(|r| r.timestamp());
    out
}
