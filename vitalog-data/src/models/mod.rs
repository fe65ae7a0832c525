// Row models mirroring the record store's tables
pub mod record;

pub use record::{NewPatient, NewPatientRecord, PatientRecordRow, PatientRow};
