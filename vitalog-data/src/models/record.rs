use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row model for the `patients` table.
///
/// The store owns the schema; `id` and `created_at` are assigned server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRow {
    /// Server-assigned row id
    #[serde(default)]
    pub id: Option<i64>,

    /// Hospital number, the unique patient identifier
    pub hn: String,

    /// When the patient row was created
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for the `patients` table
#[derive(Debug, Clone, Serialize)]
pub struct NewPatient {
    pub hn: String,
}

/// Row model for the `patient_records` table.
///
/// Exactly the measurement fields relevant to `record_type` are populated;
/// the others are null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecordRow {
    /// Server-assigned row id
    #[serde(default)]
    pub id: Option<i64>,

    /// Hospital number the reading belongs to
    pub hn: String,

    /// Reading type: `blood_pressure` or `dtx`
    pub record_type: String,

    /// Systolic pressure in mmHg (blood pressure readings only)
    #[serde(default)]
    pub systolic: Option<i32>,

    /// Diastolic pressure in mmHg (blood pressure readings only)
    #[serde(default)]
    pub diastolic: Option<i32>,

    /// Capillary blood glucose in mg/dL (DTX readings only)
    #[serde(default)]
    pub dtx_value: Option<f64>,

    /// Daily measurement window code
    pub time_period: String,

    /// Optional free-text notes
    #[serde(default)]
    pub notes: Option<String>,

    /// Server-assigned timestamp of the measurement
    pub measured_at: DateTime<Utc>,
}

/// Insert payload for the `patient_records` table.
///
/// `measured_at` is deliberately absent: the store assigns it at insert.
#[derive(Debug, Clone, Serialize)]
pub struct NewPatientRecord {
    pub hn: String,
    pub record_type: String,
    pub systolic: Option<i32>,
    pub diastolic: Option<i32>,
    pub dtx_value: Option<f64>,
    pub time_period: String,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_payload_omits_measured_at() {
        let record = NewPatientRecord {
            hn: "HN001".to_string(),
            record_type: "dtx".to_string(),
            systolic: None,
            diastolic: None,
            dtx_value: Some(100.0),
            time_period: "morning".to_string(),
            notes: None,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("measured_at").is_none());
        assert_eq!(json["record_type"], "dtx");
        assert_eq!(json["dtx_value"], 100.0);
        assert!(json["systolic"].is_null());
    }

    #[test]
    fn record_row_round_trips_from_store_json() {
        let json = r#"{
            "id": 7,
            "hn": "HN001",
            "record_type": "blood_pressure",
            "systolic": 120,
            "diastolic": 80,
            "dtx_value": null,
            "time_period": "evening",
            "notes": "after dinner",
            "measured_at": "2024-03-01T18:30:00Z"
        }"#;

        let row: PatientRecordRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.id, Some(7));
        assert_eq!(row.systolic, Some(120));
        assert_eq!(row.dtx_value, None);
        assert_eq!(row.time_period, "evening");
    }
}
