use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{NewPatientRecord, PatientRecordRow};
use super::errors::StoreError;

/// Sort direction for `measured_at` in query results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first (statistics windows)
    Ascending,
    /// Newest first (search results)
    Descending,
}

/// Filter for querying a patient's readings
#[derive(Debug, Clone)]
pub struct ReadingQuery {
    /// Hospital number to match
    pub hn: String,

    /// Restrict to one reading type when set
    pub record_type: Option<String>,

    /// Only readings measured at or after this instant
    pub since: Option<DateTime<Utc>>,

    /// Result ordering by `measured_at`
    pub order: SortOrder,
}

impl ReadingQuery {
    pub fn for_patient(hn: impl Into<String>) -> Self {
        Self {
            hn: hn.into(),
            record_type: None,
            since: None,
            order: SortOrder::Descending,
        }
    }
}

/// Repository trait for the patient record store.
///
/// Failures are opaque to the caller; no operation is retried. Readings are
/// append-only and never mutated.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Create the patient row if it does not exist. Idempotent.
    async fn ensure_patient(&self, hn: &str) -> Result<(), StoreError>;

    /// Append one immutable reading. The store assigns `measured_at`.
    async fn insert_reading(&self, record: NewPatientRecord)
        -> Result<PatientRecordRow, StoreError>;

    /// Fetch readings matching the query, ordered by `measured_at`.
    async fn query_readings(&self, query: &ReadingQuery)
        -> Result<Vec<PatientRecordRow>, StoreError>;
}

#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    async fn ensure_patient(&self, hn: &str) -> Result<(), StoreError> {
        (**self).ensure_patient(hn).await
    }

    async fn insert_reading(
        &self,
        record: NewPatientRecord,
    ) -> Result<PatientRecordRow, StoreError> {
        (**self).insert_reading(record).await
    }

    async fn query_readings(
        &self,
        query: &ReadingQuery,
    ) -> Result<Vec<PatientRecordRow>, StoreError> {
        (**self).query_readings(query).await
    }
}
