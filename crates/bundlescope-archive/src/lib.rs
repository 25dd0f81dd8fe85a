//! Archive extraction for bundlescope
//!
//! This crate decompresses gzip log bundles and recovers the individual
//! log files inside tar-wrapped archives, entirely from in-memory buffers.

mod error;
mod extract;
mod gzip;
mod tar;

pub use error::ExtractError;
pub use extract::{ArchiveKind, extract_archive, extract_plain, extract_tar};
pub use gzip::decompress;

// Re-export types used in our public API
pub use bundlescope_types::LogRecord;
