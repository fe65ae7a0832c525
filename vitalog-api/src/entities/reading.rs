use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use vitalog_domain::entities::{time_period_text, Reading, ReadingDraft, RecordType};

/// Request payload for submitting a new reading.
///
/// Selection fields default to empty strings so that an omitted field fails
/// domain validation with its specific guidance message instead of being
/// rejected at deserialization.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReadingRequest {
    /// Hospital number
    #[serde(default)]
    pub hn: String,

    /// Reading type code: `blood_pressure` or `dtx`
    #[serde(default)]
    pub record_type: String,

    /// Time period code: `morning`, `afternoon`, `evening` or `before_sleep`
    #[serde(default)]
    pub time_period: String,

    /// Systolic pressure in mmHg (blood pressure readings)
    #[serde(default)]
    pub systolic: Option<u16>,

    /// Diastolic pressure in mmHg (blood pressure readings)
    #[serde(default)]
    pub diastolic: Option<u16>,

    /// Glucose value in mg/dL (DTX readings)
    #[serde(default)]
    pub dtx_value: Option<f64>,

    /// Optional free-text notes
    #[serde(default)]
    #[validate(length(max = 1000, message = "Notes cannot exceed 1000 characters"))]
    pub notes: Option<String>,
}

impl From<CreateReadingRequest> for ReadingDraft {
    fn from(request: CreateReadingRequest) -> Self {
        ReadingDraft {
            hn: request.hn,
            record_type: request.record_type,
            time_period: request.time_period,
            systolic: request.systolic,
            diastolic: request.diastolic,
            dtx_value: request.dtx_value,
            notes: request.notes,
        }
    }
}

/// A stored reading as returned to clients
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadingResponse {
    pub hn: String,

    /// Reading type code
    pub record_type: RecordType,

    /// Display label for the reading type
    pub record_type_label: String,

    /// Time period code
    pub time_period: String,

    /// Display label for the time period; unknown codes pass through
    pub time_period_label: String,

    /// Formatted value with unit, e.g. `120/80 mmHg` or `95 mg/dL`
    pub value: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub systolic: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diastolic: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtx_value: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub measured_at: DateTime<Utc>,
}

impl From<Reading> for ReadingResponse {
    fn from(reading: Reading) -> Self {
        use vitalog_domain::entities::Measurement;

        let (systolic, diastolic, dtx_value) = match reading.measurement {
            Measurement::BloodPressure { systolic, diastolic } => {
                (Some(systolic), Some(diastolic), None)
            }
            Measurement::Dtx { value } => (None, None, Some(value)),
        };

        Self {
            hn: reading.hn.clone(),
            record_type: reading.record_type(),
            record_type_label: reading.record_type().label().to_string(),
            time_period_label: time_period_text(&reading.time_period).to_string(),
            time_period: reading.time_period.clone(),
            value: reading.measurement.value_text(),
            systolic,
            diastolic,
            dtx_value,
            notes: reading.notes,
            measured_at: reading.measured_at,
        }
    }
}

/// Response to a successful submission
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitResponse {
    /// Confirmation message shown to the user
    pub message: String,

    pub reading: ReadingResponse,
}

/// Query parameters for searching a patient's readings
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SearchParams {
    /// Hospital number to search for
    #[serde(default)]
    pub hn: String,

    /// Optional reading type filter (`blood_pressure` or `dtx`)
    pub record_type: Option<String>,
}

/// Search results, newest first
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    pub hn: String,

    /// Number of readings found
    pub count: usize,

    pub readings: Vec<ReadingResponse>,
}

/// Query parameters for the statistics report
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct StatisticsParams {
    /// Hospital number to analyze
    #[serde(default)]
    pub hn: String,

    /// Window length in calendar months (default: 1, max: 12)
    pub months: Option<u32>,
}
