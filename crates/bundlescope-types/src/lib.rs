//! Shared types for bundlescope
//!
//! This crate contains data structures used across multiple bundlescope crates.

use serde::Serialize;

// ============================================================================
// Record Types
// ============================================================================

/// One decoded log/text file recovered from an archive.
///
/// Records are created by the extractor and never mutated afterwards; callers
/// own them outright.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    /// Unique identifier, stable for the lifetime of the session
    pub id: String,

    /// File name as stored in the archive (or derived from the archive name)
    pub name: String,

    /// Decoded text content
    pub content: String,

    /// Byte length of the content before decoding
    pub size: usize,

    /// Name of the archive this record was extracted from
    pub source_archive: String,
}

impl LogRecord {
    pub fn new(
        id: String,
        name: String,
        content: String,
        size: usize,
        source_archive: String,
    ) -> Self {
        Self {
            id,
            name,
            content,
            size,
            source_archive,
        }
    }

    /// Number of lines in the content
    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }

    /// Human-readable size for list displays, e.g. "12kb"
    pub fn display_size(&self) -> String {
        format!("{}kb", self.size / 1024)
    }
}

// ============================================================================
// Search Types
// ============================================================================

/// A single matching line produced by a search
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Id of the record the line came from
    pub record_id: String,

    /// Name of the record the line came from
    pub record_name: String,

    /// 1-based line number within the record
    pub line_number: usize,

    /// The full line text
    pub line: String,

    /// Byte ranges of pattern matches within the line (for highlighting)
    pub spans: Vec<(usize, usize)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_count() {
        let record = LogRecord::new(
            "id".to_string(),
            "app.log".to_string(),
            "one\ntwo\nthree\n".to_string(),
            14,
            "app.log.gz".to_string(),
        );
        assert_eq!(record.line_count(), 3);
    }

    #[test]
    fn test_display_size() {
        let record = LogRecord::new(
            "id".to_string(),
            "app.log".to_string(),
            String::new(),
            4096,
            "app.log.gz".to_string(),
        );
        assert_eq!(record.display_size(), "4kb");
    }
}
