use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Kind of vitals reading
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum RecordType {
    /// Blood pressure measurement (systolic/diastolic, mmHg)
    BloodPressure,

    /// Capillary blood glucose measurement (mg/dL)
    Dtx,
}

impl RecordType {
    /// Wire code as stored in the `record_type` column
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::BloodPressure => "blood_pressure",
            RecordType::Dtx => "dtx",
        }
    }

    /// Parse a wire code; `None` for anything unrecognized
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "blood_pressure" => Some(RecordType::BloodPressure),
            "dtx" => Some(RecordType::Dtx),
            _ => None,
        }
    }

    /// Display label shown in the UI
    pub fn label(&self) -> &'static str {
        match self {
            RecordType::BloodPressure => "ความดันโลหิต",
            RecordType::Dtx => "DTX",
        }
    }
}

/// One of the four fixed daily measurement windows
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum TimePeriod {
    Morning,
    Afternoon,
    Evening,
    BeforeSleep,
}

impl TimePeriod {
    /// Wire code as stored in the `time_period` column
    pub fn as_str(&self) -> &'static str {
        match self {
            TimePeriod::Morning => "morning",
            TimePeriod::Afternoon => "afternoon",
            TimePeriod::Evening => "evening",
            TimePeriod::BeforeSleep => "before_sleep",
        }
    }

    /// Parse a wire code; `None` for anything unrecognized
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "morning" => Some(TimePeriod::Morning),
            "afternoon" => Some(TimePeriod::Afternoon),
            "evening" => Some(TimePeriod::Evening),
            "before_sleep" => Some(TimePeriod::BeforeSleep),
            _ => None,
        }
    }

    /// Display label shown in the UI
    pub fn label(&self) -> &'static str {
        match self {
            TimePeriod::Morning => "เช้า",
            TimePeriod::Afternoon => "กลางวัน",
            TimePeriod::Evening => "เย็น",
            TimePeriod::BeforeSleep => "ก่อนนอน",
        }
    }
}

/// Display label for a raw time-period code.
///
/// Each known code maps to its fixed label; an unknown code is passed
/// through unchanged, so codes already present in the store always render.
pub fn time_period_text(code: &str) -> &str {
    match TimePeriod::from_code(code) {
        Some(period) => period.label(),
        None => code,
    }
}

/// A reading as submitted by the user, before validation.
///
/// Selections are raw strings and the measurement fields are all optional;
/// the validator decides which combination is acceptable.
#[derive(Debug, Clone, Default)]
pub struct ReadingDraft {
    pub hn: String,
    pub record_type: String,
    pub time_period: String,
    pub systolic: Option<u16>,
    pub diastolic: Option<u16>,
    pub dtx_value: Option<f64>,
    pub notes: Option<String>,
}

/// The measurement payload of a reading, one variant per record type
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(untagged)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum Measurement {
    BloodPressure { systolic: u16, diastolic: u16 },
    Dtx { value: f64 },
}

impl Measurement {
    pub fn record_type(&self) -> RecordType {
        match self {
            Measurement::BloodPressure { .. } => RecordType::BloodPressure,
            Measurement::Dtx { .. } => RecordType::Dtx,
        }
    }

    /// Display text with unit, e.g. `120/80 mmHg` or `95 mg/dL`
    pub fn value_text(&self) -> String {
        match self {
            Measurement::BloodPressure { systolic, diastolic } => {
                format!("{}/{} mmHg", systolic, diastolic)
            }
            Measurement::Dtx { value } => format!("{} mg/dL", value),
        }
    }
}

/// A validated reading, ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedReading {
    /// Hospital number, trimmed
    pub hn: String,
    pub measurement: Measurement,
    pub time_period: TimePeriod,
    /// Trimmed notes; blank input becomes `None`
    pub notes: Option<String>,
}

/// A stored, immutable reading.
///
/// `time_period` stays a raw code: grouping and display tolerate codes this
/// version of the service does not know about.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub hn: String,
    pub measurement: Measurement,
    pub time_period: String,
    pub notes: Option<String>,
    pub measured_at: DateTime<Utc>,
}

impl Reading {
    pub fn record_type(&self) -> RecordType {
        self.measurement.record_type()
    }
}
