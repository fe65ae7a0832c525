use std::ops::RangeInclusive;

use thiserror::Error;

use crate::entities::reading::{
    Measurement, ReadingDraft, RecordType, TimePeriod, ValidatedReading,
};

/// Accepted systolic pressure range, mmHg
pub const SYSTOLIC_RANGE: RangeInclusive<u16> = 50..=300;

/// Accepted diastolic pressure range, mmHg
pub const DIASTOLIC_RANGE: RangeInclusive<u16> = 30..=200;

/// Accepted DTX range, mg/dL
pub const DTX_RANGE: RangeInclusive<f64> = 0.0..=1000.0;

/// Why a submitted reading was rejected.
///
/// One variant per rule; the messages are the Thai guidance texts shown
/// to the user.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("กรุณากรอกหมายเลข HN")]
    MissingHn,

    #[error("กรุณาเลือกประเภทการวัด")]
    MissingRecordType,

    #[error("กรุณาเลือกช่วงเวลาที่วัด")]
    MissingTimePeriod,

    #[error("กรุณากรอกค่าความดันโลหิตให้ครบถ้วน")]
    IncompleteBloodPressure,

    #[error("ค่าความดันโลหิตไม่อยู่ในช่วงที่เหมาะสม")]
    BloodPressureOutOfRange,

    #[error("กรุณากรอกค่า DTX")]
    MissingDtxValue,

    #[error("ค่า DTX ไม่อยู่ในช่วงที่เหมาะสม")]
    DtxOutOfRange,

    #[error("กรุณากรอกหมายเลข HN ที่ต้องการค้นหา")]
    MissingSearchHn,

    #[error("กรุณากรอกหมายเลข HN ที่ต้องการดูสถิติ")]
    MissingStatsHn,
}

impl ValidationError {
    /// Stable reason code for API clients
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingHn => "missing_hn",
            ValidationError::MissingRecordType => "missing_record_type",
            ValidationError::MissingTimePeriod => "missing_time_period",
            ValidationError::IncompleteBloodPressure => "incomplete_blood_pressure",
            ValidationError::BloodPressureOutOfRange => "blood_pressure_out_of_range",
            ValidationError::MissingDtxValue => "missing_dtx_value",
            ValidationError::DtxOutOfRange => "dtx_out_of_range",
            ValidationError::MissingSearchHn => "missing_search_hn",
            ValidationError::MissingStatsHn => "missing_stats_hn",
        }
    }
}

/// Validate a submitted reading.
///
/// Rules run in order and the first failure wins. Pure function: no side
/// effects, no store access. A zero systolic or diastolic counts as not
/// entered; a zero DTX value is a real value.
pub fn validate_draft(draft: &ReadingDraft) -> Result<ValidatedReading, ValidationError> {
    let hn = draft.hn.trim();
    if hn.is_empty() {
        return Err(ValidationError::MissingHn);
    }

    // An unrecognized code cannot come from the selection UI, so it is
    // treated the same as no selection.
    let record_type = RecordType::from_code(draft.record_type.trim())
        .ok_or(ValidationError::MissingRecordType)?;

    let time_period = TimePeriod::from_code(draft.time_period.trim())
        .ok_or(ValidationError::MissingTimePeriod)?;

    let measurement = match record_type {
        RecordType::BloodPressure => {
            let systolic = draft.systolic.filter(|&v| v != 0);
            let diastolic = draft.diastolic.filter(|&v| v != 0);

            match (systolic, diastolic) {
                (Some(systolic), Some(diastolic)) => {
                    if !SYSTOLIC_RANGE.contains(&systolic)
                        || !DIASTOLIC_RANGE.contains(&diastolic)
                    {
                        return Err(ValidationError::BloodPressureOutOfRange);
                    }
                    Measurement::BloodPressure { systolic, diastolic }
                }
                _ => return Err(ValidationError::IncompleteBloodPressure),
            }
        }
        RecordType::Dtx => {
            let value = draft.dtx_value.ok_or(ValidationError::MissingDtxValue)?;
            if !DTX_RANGE.contains(&value) {
                return Err(ValidationError::DtxOutOfRange);
            }
            Measurement::Dtx { value }
        }
    };

    let notes = draft
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(ValidatedReading {
        hn: hn.to_string(),
        measurement,
        time_period,
        notes,
    })
}
