use thiserror::Error;

/// Failures surfaced while extracting a single archive.
///
/// Every variant carries the originating archive name so a caller processing
/// a batch can report which input failed. None of these are retryable with
/// the same input.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The input was not a valid gzip stream (bad magic, corrupt or truncated)
    #[error("{archive}: invalid gzip stream: {source}")]
    Decompression {
        archive: String,
        #[source]
        source: std::io::Error,
    },

    /// The decompressed bytes are not a structurally valid tar archive
    #[error("{archive}: malformed tar archive: {reason}")]
    MalformedArchive { archive: String, reason: String },

    /// The archive name does not match any supported suffix convention
    #[error("{archive}: unsupported archive format")]
    UnsupportedFormat { archive: String },
}

impl ExtractError {
    /// Name of the archive this error originated from
    pub fn archive(&self) -> &str {
        match self {
            Self::Decompression { archive, .. }
            | Self::MalformedArchive { archive, .. }
            | Self::UnsupportedFormat { archive } => archive,
        }
    }
}
