// Domain entities and value objects
pub mod conversions;
pub mod reading;

// Re-export common types for easier imports
pub use reading::{
    time_period_text, Measurement, Reading, ReadingDraft, RecordType, TimePeriod,
    ValidatedReading,
};
