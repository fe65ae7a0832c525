use std::sync::Arc;

use chrono::{DateTime, Months, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use vitalog_data::repository::{ReadingQuery, RecordStore, SortOrder, StoreError};

use crate::entities::conversions;
use crate::entities::reading::{Reading, ReadingDraft, RecordType};
use super::statistics::{summarize, VitalsSummary};
use super::validation::{validate_draft, ValidationError};

/// Vitals service errors
#[derive(Debug, Error)]
pub enum VitalsServiceError {
    /// The submitted input failed a validation rule
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The record store was never configured; the action is unavailable
    #[error("กรุณาตั้งค่าการเชื่อมต่อฐานข้อมูลก่อนใช้งาน")]
    NotConfigured,

    /// The record store failed; the action was aborted, nothing is retried
    #[error("record store error: {0}")]
    Store(String),
}

/// Statistics report over one patient's recent readings
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct StatisticsReport {
    /// Hospital number the report covers
    pub hn: String,

    /// Window length in calendar months before now
    pub period_months: u32,

    /// Number of readings analyzed
    pub reading_count: usize,

    pub summary: VitalsSummary,

    /// When the report was generated
    pub generated_at: DateTime<Utc>,
}

/// Vitals service: orchestrates submit, search and statistics over the
/// record store. Holds no state beyond the store handle.
pub struct VitalsService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> VitalsService<S> {
    /// Create a new vitals service
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn map_store_error(&self, err: StoreError) -> VitalsServiceError {
        match err {
            StoreError::NotConfigured => VitalsServiceError::NotConfigured,
            _ => VitalsServiceError::Store(err.to_string()),
        }
    }

    /// Validate and persist one reading.
    ///
    /// The patient row is created first if absent, then the reading is
    /// appended. The two calls are sequential with no transaction; a
    /// failing insert can leave a patient without readings, which is
    /// accepted.
    pub async fn submit_reading(
        &self,
        draft: ReadingDraft,
    ) -> Result<Reading, VitalsServiceError> {
        let validated = validate_draft(&draft)?;

        debug!("Submitting {} reading for HN {}",
            validated.measurement.record_type().as_str(), validated.hn);

        self.store
            .ensure_patient(&validated.hn)
            .await
            .map_err(|e| self.map_store_error(e))?;

        let row = self
            .store
            .insert_reading(conversions::convert_to_data_new_record(&validated))
            .await
            .map_err(|e| self.map_store_error(e))?;

        info!("Stored reading for HN {}", validated.hn);

        conversions::convert_to_domain_reading(row)
            .map_err(|e| VitalsServiceError::Store(e.to_string()))
    }

    /// Search a patient's readings, newest first.
    pub async fn search_readings(
        &self,
        hn: &str,
        record_type: Option<RecordType>,
    ) -> Result<Vec<Reading>, VitalsServiceError> {
        let hn = hn.trim();
        if hn.is_empty() {
            return Err(ValidationError::MissingSearchHn.into());
        }

        let mut query = ReadingQuery::for_patient(hn);
        query.record_type = record_type.map(|t| t.as_str().to_string());
        query.order = SortOrder::Descending;

        let rows = self
            .store
            .query_readings(&query)
            .await
            .map_err(|e| self.map_store_error(e))?;

        debug!("Search for HN {} returned {} row(s)", hn, rows.len());
        Ok(conversions::convert_to_domain_readings(rows))
    }

    /// Aggregate a patient's readings over the last `months` calendar months.
    pub async fn statistics(
        &self,
        hn: &str,
        months: u32,
    ) -> Result<StatisticsReport, VitalsServiceError> {
        let hn = hn.trim();
        if hn.is_empty() {
            return Err(ValidationError::MissingStatsHn.into());
        }

        let now = Utc::now();
        let since = now
            .checked_sub_months(Months::new(months))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        let mut query = ReadingQuery::for_patient(hn);
        query.since = Some(since);
        query.order = SortOrder::Ascending;

        let rows = self
            .store
            .query_readings(&query)
            .await
            .map_err(|e| self.map_store_error(e))?;

        let readings = conversions::convert_to_domain_readings(rows);
        let summary = summarize(&readings);

        info!("Generated statistics for HN {} over {} month(s): {} reading(s)",
            hn, months, readings.len());

        Ok(StatisticsReport {
            hn: hn.to_string(),
            period_months: months,
            reading_count: readings.len(),
            summary,
            generated_at: Utc::now(),
        })
    }
}

/// Store handle shared across request handlers
pub type SharedRecordStore = Arc<dyn RecordStore>;

/// Create a vitals service over a shared store handle
pub fn create_vitals_service(store: SharedRecordStore) -> VitalsService<SharedRecordStore> {
    VitalsService::new(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use vitalog_data::models::PatientRecordRow;
    use vitalog_data::repository::{InMemoryStore, SupabaseStore};

    fn bp_draft(hn: &str, systolic: u16, diastolic: u16, time_period: &str) -> ReadingDraft {
        ReadingDraft {
            hn: hn.to_string(),
            record_type: "blood_pressure".to_string(),
            time_period: time_period.to_string(),
            systolic: Some(systolic),
            diastolic: Some(diastolic),
            ..Default::default()
        }
    }

    fn dtx_draft(hn: &str, value: f64) -> ReadingDraft {
        ReadingDraft {
            hn: hn.to_string(),
            record_type: "dtx".to_string(),
            time_period: "morning".to_string(),
            dtx_value: Some(value),
            ..Default::default()
        }
    }

    fn backdated_row(hn: &str, days_ago: i64, systolic: i32) -> PatientRecordRow {
        PatientRecordRow {
            id: None,
            hn: hn.to_string(),
            record_type: "blood_pressure".to_string(),
            systolic: Some(systolic),
            diastolic: Some(80),
            dtx_value: None,
            time_period: "morning".to_string(),
            notes: None,
            measured_at: Utc::now() - Duration::days(days_ago),
        }
    }

    #[tokio::test]
    async fn submit_creates_patient_then_reading() {
        let store = InMemoryStore::new();
        let service = VitalsService::new(store.clone());

        let reading = service
            .submit_reading(bp_draft("HN001", 120, 80, "morning"))
            .await
            .unwrap();

        assert!(store.has_patient("HN001"));
        assert_eq!(store.reading_count(), 1);
        assert_eq!(reading.record_type(), RecordType::BloodPressure);
        assert_eq!(reading.time_period, "morning");
    }

    #[tokio::test]
    async fn invalid_submission_touches_nothing() {
        let store = InMemoryStore::new();
        let service = VitalsService::new(store.clone());

        let result = service.submit_reading(dtx_draft("HN001", -5.0)).await;

        assert!(matches!(
            result,
            Err(VitalsServiceError::Validation(ValidationError::DtxOutOfRange))
        ));
        assert_eq!(store.patient_count(), 0);
        assert_eq!(store.reading_count(), 0);
    }

    #[tokio::test]
    async fn submit_without_configuration_is_rejected() {
        let service = VitalsService::new(SupabaseStore::disabled());

        let result = service
            .submit_reading(bp_draft("HN001", 120, 80, "morning"))
            .await;

        assert!(matches!(result, Err(VitalsServiceError::NotConfigured)));
    }

    #[tokio::test]
    async fn search_returns_newest_first_and_honours_filter() {
        let store = InMemoryStore::new();
        store.seed_reading(backdated_row("HN001", 3, 110));
        store.seed_reading(backdated_row("HN001", 1, 130));

        let service = VitalsService::new(store.clone());
        let readings = service.search_readings("HN001", None).await.unwrap();

        assert_eq!(readings.len(), 2);
        assert!(readings[0].measured_at > readings[1].measured_at);

        let dtx_only = service
            .search_readings("HN001", Some(RecordType::Dtx))
            .await
            .unwrap();
        assert!(dtx_only.is_empty());
    }

    #[tokio::test]
    async fn search_requires_hn() {
        let service = VitalsService::new(InMemoryStore::new());

        let result = service.search_readings("  ", None).await;
        assert!(matches!(
            result,
            Err(VitalsServiceError::Validation(ValidationError::MissingSearchHn))
        ));
    }

    #[tokio::test]
    async fn statistics_requires_hn() {
        let service = VitalsService::new(InMemoryStore::new());

        let result = service.statistics("", 1).await;
        assert!(matches!(
            result,
            Err(VitalsServiceError::Validation(ValidationError::MissingStatsHn))
        ));
    }

    #[tokio::test]
    async fn statistics_windows_out_old_readings() {
        let store = InMemoryStore::new();
        store.seed_reading(backdated_row("HN001", 10, 140));
        store.seed_reading(backdated_row("HN001", 400, 190));

        let service = VitalsService::new(store.clone());
        let report = service.statistics("HN001", 1).await.unwrap();

        assert_eq!(report.reading_count, 1);
        let stats = report.summary.blood_pressure.unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.max_systolic, 140);
    }

    #[tokio::test]
    async fn statistics_on_empty_window_is_a_valid_result() {
        let service = VitalsService::new(InMemoryStore::new());

        let report = service.statistics("HN404", 3).await.unwrap();

        assert_eq!(report.reading_count, 0);
        assert_eq!(report.summary.blood_pressure_count(), 0);
        assert_eq!(report.summary.dtx_count(), 0);
        assert!(report.summary.time_periods.is_empty());
    }

    #[tokio::test]
    async fn service_works_through_a_shared_store_handle() {
        let store: SharedRecordStore = Arc::new(InMemoryStore::new());
        let service = create_vitals_service(store);

        let reading = service.submit_reading(dtx_draft("HN002", 0.0)).await.unwrap();
        assert_eq!(reading.measurement.value_text(), "0 mg/dL");
    }
}
