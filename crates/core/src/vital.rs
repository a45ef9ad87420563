use serde::{Deserialize, Serialize};

use crate::record::labels_match;

/// Canonical record-type labels the alert rules read.
///
/// Producers may send any casing; stored records keep the label they arrived
/// with and rules match case-insensitively against [`VitalSign::label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VitalSign {
    SystolicPressure,
    DiastolicPressure,
    BloodSaturation,
    #[serde(rename = "ECG")]
    Ecg,
    HeartRate,
}

impl VitalSign {
    pub const ALL: [VitalSign; 5] = [
        VitalSign::SystolicPressure,
        VitalSign::DiastolicPressure,
        VitalSign::BloodSaturation,
        VitalSign::Ecg,
        VitalSign::HeartRate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            VitalSign::SystolicPressure => "SystolicPressure",
            VitalSign::DiastolicPressure => "DiastolicPressure",
            VitalSign::BloodSaturation => "BloodSaturation",
            VitalSign::Ecg => "ECG",
            VitalSign::HeartRate => "HeartRate",
        }
    }

    /// Parse a wire label, ignoring case. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| labels_match(v.label(), label))
    }
}

impl std::fmt::Display for VitalSign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
