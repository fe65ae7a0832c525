use thiserror::Error;
use tracing::warn;

use vitalog_data::models::{NewPatientRecord, PatientRecordRow};

use super::reading::{Measurement, Reading, RecordType, ValidatedReading};

/// Conversion functions between store rows and domain entities.
/// These follow the pattern convert_to_[target_layer]_[model_name].

/// Error raised when a stored row cannot be classified as a reading
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("unknown record type: {0}")]
    UnknownRecordType(String),

    #[error("{record_type} row is missing its measurement fields")]
    MissingMeasurement { record_type: &'static str },

    #[error("{record_type} row has a measurement outside the storable range")]
    MeasurementOutOfRange { record_type: &'static str },
}

/// Convert a validated reading into the store's insert payload.
///
/// Only the measurement fields matching the record type are populated; the
/// rest stay null, preserving the store invariant.
pub fn convert_to_data_new_record(validated: &ValidatedReading) -> NewPatientRecord {
    let (systolic, diastolic, dtx_value) = match validated.measurement {
        Measurement::BloodPressure { systolic, diastolic } => {
            (Some(systolic as i32), Some(diastolic as i32), None)
        }
        Measurement::Dtx { value } => (None, None, Some(value)),
    };

    NewPatientRecord {
        hn: validated.hn.clone(),
        record_type: validated.measurement.record_type().as_str().to_string(),
        systolic,
        diastolic,
        dtx_value,
        time_period: validated.time_period.as_str().to_string(),
        notes: validated.notes.clone(),
    }
}

/// Convert a store row into a domain reading
pub fn convert_to_domain_reading(row: PatientRecordRow) -> Result<Reading, ConversionError> {
    let record_type = RecordType::from_code(&row.record_type)
        .ok_or_else(|| ConversionError::UnknownRecordType(row.record_type.clone()))?;

    let measurement = match record_type {
        RecordType::BloodPressure => match (row.systolic, row.diastolic) {
            // The store owns the columns as plain integers; a value that
            // does not fit the pressure type is as unusable as a missing one.
            (Some(systolic), Some(diastolic)) => {
                let systolic = u16::try_from(systolic).map_err(|_| {
                    ConversionError::MeasurementOutOfRange {
                        record_type: "blood_pressure",
                    }
                })?;
                let diastolic = u16::try_from(diastolic).map_err(|_| {
                    ConversionError::MeasurementOutOfRange {
                        record_type: "blood_pressure",
                    }
                })?;
                Measurement::BloodPressure { systolic, diastolic }
            }
            _ => {
                return Err(ConversionError::MissingMeasurement {
                    record_type: "blood_pressure",
                })
            }
        },
        RecordType::Dtx => match row.dtx_value {
            Some(value) => Measurement::Dtx { value },
            None => {
                return Err(ConversionError::MissingMeasurement { record_type: "dtx" })
            }
        },
    };

    Ok(Reading {
        hn: row.hn,
        measurement,
        time_period: row.time_period,
        notes: row.notes,
        measured_at: row.measured_at,
    })
}

/// Convert a batch of rows, dropping any the domain cannot classify.
///
/// The store schema is owned externally; a malformed row is logged and
/// skipped rather than failing the whole query.
pub fn convert_to_domain_readings(rows: Vec<PatientRecordRow>) -> Vec<Reading> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id;
            match convert_to_domain_reading(row) {
                Ok(reading) => Some(reading),
                Err(e) => {
                    warn!("Skipping unreadable record row {:?}: {}", id, e);
                    None
                }
            }
        })
        .collect()
}
