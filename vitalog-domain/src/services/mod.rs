pub mod statistics;
pub mod validation;
pub mod vitals;

// Domain services
// This module contains business logic implementations.

// Re-export service types and factory functions
pub use statistics::{summarize, BloodPressureStats, DtxStats, VitalsSummary};
pub use validation::{validate_draft, ValidationError};
pub use vitals::{create_vitals_service, SharedRecordStore, VitalsService, VitalsServiceError};
