// Public request/response entities
pub mod common;
pub mod reading;

// Re-export common types for easier imports
pub use common::ErrorResponse;
pub use reading::{
    CreateReadingRequest, ReadingResponse, SearchParams, SearchResponse, StatisticsParams,
    SubmitResponse,
};
