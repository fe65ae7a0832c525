use async_trait::async_trait;
use tracing::debug;

use crate::client::{RestClient, StoreConfig};
use crate::models::{NewPatient, NewPatientRecord, PatientRecordRow, PatientRow};
use super::errors::StoreError;
use super::record_store::{ReadingQuery, RecordStore, SortOrder};

const PATIENTS_TABLE: &str = "patients";
const RECORDS_TABLE: &str = "patient_records";

/// Record store backed by the remote Supabase/PostgREST service.
///
/// Constructed in a disabled state when no configuration is available: every
/// operation then fails with `StoreError::NotConfigured` instead of crashing.
pub struct SupabaseStore {
    client: Option<RestClient>,
}

impl SupabaseStore {
    /// Create a store connected to the configured endpoint
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        Ok(Self {
            client: Some(RestClient::new(config)?),
        })
    }

    /// Create a store with no backing endpoint; all operations short-circuit
    pub fn disabled() -> Self {
        Self { client: None }
    }

    /// Build from the environment, falling back to the disabled state
    pub fn from_env() -> Result<Self, StoreError> {
        match StoreConfig::from_env() {
            Some(config) => Self::new(config),
            None => Ok(Self::disabled()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    fn client(&self) -> Result<&RestClient, StoreError> {
        self.client.as_ref().ok_or(StoreError::NotConfigured)
    }
}

#[async_trait]
impl RecordStore for SupabaseStore {
    async fn ensure_patient(&self, hn: &str) -> Result<(), StoreError> {
        let client = self.client()?;

        let existing: Vec<PatientRow> = client
            .select(
                PATIENTS_TABLE,
                &[
                    ("select", "hn".to_string()),
                    ("hn", format!("eq.{}", hn)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        if existing.is_empty() {
            debug!("Patient {} not found, creating", hn);
            let _: Vec<PatientRow> = client
                .insert(PATIENTS_TABLE, &[NewPatient { hn: hn.to_string() }])
                .await?;
        }

        Ok(())
    }

    async fn insert_reading(
        &self,
        record: NewPatientRecord,
    ) -> Result<PatientRecordRow, StoreError> {
        let client = self.client()?;

        let mut rows: Vec<PatientRecordRow> =
            client.insert(RECORDS_TABLE, &[record]).await?;

        if rows.is_empty() {
            return Err(StoreError::Decode(
                "insert returned no representation".to_string(),
            ));
        }

        Ok(rows.remove(0))
    }

    async fn query_readings(
        &self,
        query: &ReadingQuery,
    ) -> Result<Vec<PatientRecordRow>, StoreError> {
        let client = self.client()?;

        let mut params = vec![
            ("select", "*".to_string()),
            ("hn", format!("eq.{}", query.hn)),
        ];

        if let Some(record_type) = &query.record_type {
            params.push(("record_type", format!("eq.{}", record_type)));
        }

        if let Some(since) = query.since {
            params.push(("measured_at", format!("gte.{}", since.to_rfc3339())));
        }

        let direction = match query.order {
            SortOrder::Ascending => "measured_at.asc",
            SortOrder::Descending => "measured_at.desc",
        };
        params.push(("order", direction.to_string()));

        client.select(RECORDS_TABLE, &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_store_short_circuits_every_operation() {
        let store = SupabaseStore::disabled();
        assert!(!store.is_configured());

        let result = store.ensure_patient("HN001").await;
        assert!(matches!(result, Err(StoreError::NotConfigured)));

        let record = NewPatientRecord {
            hn: "HN001".to_string(),
            record_type: "dtx".to_string(),
            systolic: None,
            diastolic: None,
            dtx_value: Some(95.0),
            time_period: "morning".to_string(),
            notes: None,
        };
        let result = store.insert_reading(record).await;
        assert!(matches!(result, Err(StoreError::NotConfigured)));

        let result = store
            .query_readings(&ReadingQuery::for_patient("HN001"))
            .await;
        assert!(matches!(result, Err(StoreError::NotConfigured)));
    }

    #[test]
    fn configured_store_reports_configured() {
        let store =
            SupabaseStore::new(StoreConfig::new("https://example.supabase.co", "key")).unwrap();
        assert!(store.is_configured());
    }
}
