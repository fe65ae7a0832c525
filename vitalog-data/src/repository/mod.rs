// Repository module structure
pub mod errors;
mod in_memory;
mod record_store;
mod supabase;

// Re-export commonly used types
pub use errors::StoreError;
pub use in_memory::InMemoryStore;
pub use record_store::{ReadingQuery, RecordStore, SortOrder};
pub use supabase::SupabaseStore;
