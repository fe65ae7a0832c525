use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use crate::models::{NewPatientRecord, PatientRecordRow};
use super::errors::StoreError;
use super::record_store::{ReadingQuery, RecordStore, SortOrder};

/// In-memory record store.
///
/// Backs tests and doubles as the mock repository; assigns `measured_at`
/// itself the way the remote store would.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    patients: Arc<Mutex<HashSet<String>>>,
    readings: Arc<Mutex<Vec<PatientRecordRow>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully-formed row, keeping its `measured_at`. Test seeding.
    ///
    /// The seeding and inspection helpers recover a poisoned lock instead
    /// of panicking or erroring: the data is plain rows and stays readable
    /// even after a writer panicked.
    pub fn seed_reading(&self, row: PatientRecordRow) {
        let mut readings = self
            .readings
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        readings.push(row);
    }

    pub fn patient_count(&self) -> usize {
        self.patients
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn reading_count(&self) -> usize {
        self.readings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn has_patient(&self, hn: &str) -> bool {
        self.patients
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(hn)
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn ensure_patient(&self, hn: &str) -> Result<(), StoreError> {
        let mut patients = self.patients.lock()?;
        patients.insert(hn.to_string());
        Ok(())
    }

    async fn insert_reading(
        &self,
        record: NewPatientRecord,
    ) -> Result<PatientRecordRow, StoreError> {
        let mut readings = self.readings.lock()?;

        let row = PatientRecordRow {
            id: Some(readings.len() as i64 + 1),
            hn: record.hn,
            record_type: record.record_type,
            systolic: record.systolic,
            diastolic: record.diastolic,
            dtx_value: record.dtx_value,
            time_period: record.time_period,
            notes: record.notes,
            measured_at: Utc::now(),
        };

        readings.push(row.clone());
        Ok(row)
    }

    async fn query_readings(
        &self,
        query: &ReadingQuery,
    ) -> Result<Vec<PatientRecordRow>, StoreError> {
        let readings = self.readings.lock()?;

        let mut matching: Vec<PatientRecordRow> = readings
            .iter()
            .filter(|row| {
                if row.hn != query.hn {
                    return false;
                }

                if let Some(record_type) = &query.record_type {
                    if &row.record_type != record_type {
                        return false;
                    }
                }

                if let Some(since) = query.since {
                    if row.measured_at < since {
                        return false;
                    }
                }

                true
            })
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            let cmp = a.measured_at.cmp(&b.measured_at);
            match query.order {
                SortOrder::Ascending => cmp,
                SortOrder::Descending => cmp.reverse(),
            }
        });

        Ok(matching)
    }
}
