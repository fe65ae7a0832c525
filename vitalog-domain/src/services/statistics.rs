use std::collections::BTreeMap;

use serde::Serialize;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use crate::entities::reading::{Measurement, Reading};

/// Summary statistics for the blood-pressure subset of a window
#[derive(Debug, Clone, Serialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct BloodPressureStats {
    /// Number of blood pressure readings in the window
    pub count: usize,

    /// Average systolic pressure (exact sum/count division)
    pub avg_systolic: f64,

    /// Average diastolic pressure
    pub avg_diastolic: f64,

    /// Highest systolic value; independent of the diastolic extrema
    pub max_systolic: u16,

    /// Lowest systolic value
    pub min_systolic: u16,

    /// Highest diastolic value
    pub max_diastolic: u16,

    /// Lowest diastolic value
    pub min_diastolic: u16,
}

/// Summary statistics for the DTX subset of a window
#[derive(Debug, Clone, Serialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct DtxStats {
    /// Number of DTX readings in the window
    pub count: usize,

    /// Average glucose value in mg/dL
    pub avg: f64,

    /// Highest glucose value
    pub max: f64,

    /// Lowest glucose value
    pub min: f64,
}

/// Aggregate statistics over one patient's readings.
///
/// A subset with no readings has no stats entry; a time period with no
/// readings has no count entry. The all-empty summary is a valid result.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct VitalsSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<BloodPressureStats>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtx: Option<DtxStats>,

    /// Reading counts per time-period code present in the window
    pub time_periods: BTreeMap<String, u64>,
}

impl VitalsSummary {
    pub fn blood_pressure_count(&self) -> usize {
        self.blood_pressure.as_ref().map_or(0, |s| s.count)
    }

    pub fn dtx_count(&self) -> usize {
        self.dtx.as_ref().map_or(0, |s| s.count)
    }
}

/// Compute summary statistics over a window of readings.
///
/// The result depends only on the multiset of readings: sums, counts and
/// extrema ignore input order, and averages are exact sum/count divisions.
pub fn summarize(readings: &[Reading]) -> VitalsSummary {
    let mut summary = VitalsSummary::default();

    let mut systolic_sum: f64 = 0.0;
    let mut diastolic_sum: f64 = 0.0;
    let mut bp_count: usize = 0;
    let mut max_systolic: u16 = u16::MIN;
    let mut min_systolic: u16 = u16::MAX;
    let mut max_diastolic: u16 = u16::MIN;
    let mut min_diastolic: u16 = u16::MAX;

    let mut dtx_sum: f64 = 0.0;
    let mut dtx_count: usize = 0;
    let mut dtx_max = f64::MIN;
    let mut dtx_min = f64::MAX;

    for reading in readings {
        match reading.measurement {
            Measurement::BloodPressure { systolic, diastolic } => {
                bp_count += 1;
                systolic_sum += systolic as f64;
                diastolic_sum += diastolic as f64;
                max_systolic = max_systolic.max(systolic);
                min_systolic = min_systolic.min(systolic);
                max_diastolic = max_diastolic.max(diastolic);
                min_diastolic = min_diastolic.min(diastolic);
            }
            Measurement::Dtx { value } => {
                dtx_count += 1;
                dtx_sum += value;
                dtx_max = dtx_max.max(value);
                dtx_min = dtx_min.min(value);
            }
        }

        *summary
            .time_periods
            .entry(reading.time_period.clone())
            .or_insert(0) += 1;
    }

    if bp_count > 0 {
        summary.blood_pressure = Some(BloodPressureStats {
            count: bp_count,
            avg_systolic: systolic_sum / bp_count as f64,
            avg_diastolic: diastolic_sum / bp_count as f64,
            max_systolic,
            min_systolic,
            max_diastolic,
            min_diastolic,
        });
    }

    if dtx_count > 0 {
        summary.dtx = Some(DtxStats {
            count: dtx_count,
            avg: dtx_sum / dtx_count as f64,
            max: dtx_max,
            min: dtx_min,
        });
    }

    summary
}
