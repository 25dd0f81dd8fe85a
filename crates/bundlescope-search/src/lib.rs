//! Record storage and search for bundlescope
//!
//! This crate holds the extracted records for a session and runs line-level
//! searches across them.

mod filter;
mod query;
mod store;

pub use filter::CompiledFilter;
pub use query::{DEFAULT_HIT_LIMIT, search};
pub use store::RecordStore;

// Re-export types used in our public API
pub use bundlescope_types::{LogRecord, SearchHit};
