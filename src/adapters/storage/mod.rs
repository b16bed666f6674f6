//! Payment history storage adapters.
//!
//! - `InMemoryHistoryStore` - process-local, lost on restart
//! - `FileHistoryStore` - JSON file on disk

mod file_history_store;
mod in_memory_history_store;

pub use file_history_store::FileHistoryStore;
pub use in_memory_history_store::InMemoryHistoryStore;
