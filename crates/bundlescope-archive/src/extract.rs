use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::error::ExtractError;
use crate::{gzip, tar};
use bundlescope_types::LogRecord;

/// Supported archive layouts, selected by file-name suffix
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveKind {
    /// Gzip-compressed tar bundle (`.tar.gz`, `.tgz`)
    TarGz,
    /// Single gzip-compressed log file (`.gz`)
    Gz,
}

impl ArchiveKind {
    /// Detect the archive kind from its file name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        if lower.ends_with(".tar.gz") || lower.ends_with(".tgz") {
            Some(Self::TarGz)
        } else if lower.ends_with(".gz") {
            Some(Self::Gz)
        } else {
            None
        }
    }
}

/// Session-wide sequence for record ids. Combined with the archive and entry
/// names this keeps ids collision-free even for duplicate entry names within
/// one archive or across a batch.
static NEXT_RECORD_SEQ: AtomicU64 = AtomicU64::new(0);

fn next_record_id(archive: &str, entry: &str) -> String {
    let seq = NEXT_RECORD_SEQ.fetch_add(1, Ordering::SeqCst);
    format!("{archive}::{entry}::{seq}")
}

/// Extract all log records from the raw bytes of one uploaded archive.
///
/// This is the single entry point callers need: it dispatches on the archive
/// name suffix, decompresses, and parses the container when there is one.
/// Failures carry the archive name; a caller working through a batch should
/// let other archives' successes stand.
pub fn extract_archive(raw: &[u8], archive_name: &str) -> Result<Vec<LogRecord>, ExtractError> {
    let kind = ArchiveKind::from_name(archive_name).ok_or_else(|| {
        ExtractError::UnsupportedFormat {
            archive: archive_name.to_string(),
        }
    })?;

    let decompressed = gzip::decompress(raw).map_err(|source| ExtractError::Decompression {
        archive: archive_name.to_string(),
        source,
    })?;
    debug!(
        archive = archive_name,
        compressed = raw.len(),
        decompressed = decompressed.len(),
        "decompressed archive"
    );

    let records = match kind {
        ArchiveKind::TarGz => extract_tar(&decompressed, archive_name)?,
        ArchiveKind::Gz => extract_plain(&decompressed, archive_name),
    };
    debug!(
        archive = archive_name,
        records = records.len(),
        "extraction finished"
    );
    Ok(records)
}

/// Treat the decompressed bytes as one log file.
///
/// The inner name is the archive name minus its `.gz` suffix; when the
/// suffix is absent a generic `.txt` name is synthesized. Invalid UTF-8 is
/// replaced rather than rejected.
pub fn extract_plain(decompressed: &[u8], archive_name: &str) -> Vec<LogRecord> {
    let name = match archive_name.strip_suffix(".gz") {
        Some(inner) => inner.to_string(),
        None => format!("{archive_name}.txt"),
    };

    vec![LogRecord::new(
        next_record_id(archive_name, &name),
        name,
        String::from_utf8_lossy(decompressed).into_owned(),
        decompressed.len(),
        archive_name.to_string(),
    )]
}

/// Walk a decompressed tar buffer and decode every regular `.log`/`.txt`
/// entry, in header order.
///
/// Entries that are not regular files, or whose names do not carry a log
/// suffix, are skipped but still advance the walk by their declared size.
/// A structural violation fails the whole archive with no partial records.
pub fn extract_tar(buffer: &[u8], archive_name: &str) -> Result<Vec<LogRecord>, ExtractError> {
    let entries = tar::walk(buffer).map_err(|violation| ExtractError::MalformedArchive {
        archive: archive_name.to_string(),
        reason: violation.to_string(),
    })?;

    let mut records = Vec::new();
    for entry in entries {
        if !entry.is_regular() || !has_log_suffix(&entry.name) {
            continue;
        }

        let content_bytes = entry.content(buffer);
        records.push(LogRecord::new(
            next_record_id(archive_name, &entry.name),
            entry.name.clone(),
            String::from_utf8_lossy(content_bytes).into_owned(),
            entry.size,
            archive_name.to_string(),
        ));
    }

    Ok(records)
}

fn has_log_suffix(name: &str) -> bool {
    name.ends_with(".log") || name.ends_with(".txt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tar::BLOCK_LEN;
    use crate::tar::tests::{entry_bytes, header_block};
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    fn gzip_compress(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_kind_from_name() {
        assert_eq!(ArchiveKind::from_name("x.tar.gz"), Some(ArchiveKind::TarGz));
        assert_eq!(ArchiveKind::from_name("x.tgz"), Some(ArchiveKind::TarGz));
        assert_eq!(ArchiveKind::from_name("X.TGZ"), Some(ArchiveKind::TarGz));
        assert_eq!(ArchiveKind::from_name("x.log.gz"), Some(ArchiveKind::Gz));
        assert_eq!(ArchiveKind::from_name("x.zip"), None);
        assert_eq!(ArchiveKind::from_name("plain.log"), None);
    }

    #[test]
    fn test_unsupported_suffix_is_rejected_before_extraction() {
        let err = extract_archive(b"anything", "report.zip").unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat { .. }));
        assert_eq!(err.archive(), "report.zip");
    }

    #[test]
    fn test_corrupt_gzip_surfaces_decompression_error() {
        let err = extract_archive(&[0xde, 0xad, 0xbe, 0xef], "bundle.tar.gz").unwrap_err();
        assert!(matches!(err, ExtractError::Decompression { .. }));
    }

    #[test]
    fn test_plain_gz_yields_exactly_one_record() {
        let payload = b"line one\nline two\n";
        let compressed = gzip_compress(payload);

        let records = extract_archive(&compressed, "server.log.gz").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "server.log");
        assert_eq!(records[0].content, "line one\nline two\n");
        assert_eq!(records[0].size, payload.len());
        assert_eq!(records[0].source_archive, "server.log.gz");
    }

    #[test]
    fn test_plain_name_synthesized_without_gz_suffix() {
        let records = extract_plain(b"data", "dump");
        assert_eq!(records[0].name, "dump.txt");
    }

    #[test]
    fn test_plain_invalid_utf8_is_replaced_not_fatal() {
        let records = extract_plain(&[0x68, 0x69, 0xff, 0xfe], "x.gz");
        assert!(records[0].content.starts_with("hi"));
        assert!(records[0].content.contains('\u{FFFD}'));
        assert_eq!(records[0].size, 4);
    }

    #[test]
    fn test_tar_single_log_entry() {
        let mut buffer = entry_bytes("app.log", b"hello log\n", b'0');
        buffer.extend_from_slice(&[0u8; BLOCK_LEN * 2]);

        let records = extract_tar(&buffer, "bundle.tar.gz").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "app.log");
        assert_eq!(records[0].content, "hello log\n");
        assert_eq!(records[0].size, 10);
        assert_eq!(records[0].source_archive, "bundle.tar.gz");
    }

    #[test]
    fn test_tar_non_log_entry_skipped_but_cursor_advances() {
        let mut buffer = entry_bytes("readme.md", b"# docs\nsome prose\n", b'0');
        buffer.extend_from_slice(&entry_bytes("err.log", b"boom\n", b'0'));

        let records = extract_tar(&buffer, "bundle.tar.gz").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "err.log");
        assert_eq!(records[0].content, "boom\n");
    }

    #[test]
    fn test_tar_directory_entry_skipped() {
        let mut buffer = entry_bytes("logs/", b"", b'5');
        buffer.extend_from_slice(&entry_bytes("logs/app.log", b"ok\n", b'0'));

        let records = extract_tar(&buffer, "bundle.tar.gz").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "logs/app.log");
    }

    #[test]
    fn test_tar_non_regular_with_content_still_advances() {
        // A non-regular entry that nevertheless declares content must move
        // the cursor past that content
        let mut buffer = entry_bytes("weird.log", b"payload bytes\n", b'7');
        buffer.extend_from_slice(&entry_bytes("real.log", b"kept\n", b'0'));

        let records = extract_tar(&buffer, "bundle.tar.gz").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "real.log");
    }

    #[test]
    fn test_tar_txt_suffix_qualifies() {
        let buffer = entry_bytes("notes.txt", b"note\n", b'0');
        let records = extract_tar(&buffer, "bundle.tar.gz").unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_tar_bad_size_fails_with_no_records() {
        let mut first = entry_bytes("good.log", b"fine\n", b'0');
        let mut bad = header_block("bad.log", 0, b'0');
        bad[124..136].copy_from_slice(b"ZZZZZZZZZZZ\0");
        first.extend_from_slice(&bad);

        let err = extract_tar(&first, "bundle.tar.gz").unwrap_err();
        assert!(matches!(err, ExtractError::MalformedArchive { .. }));
        assert_eq!(err.archive(), "bundle.tar.gz");
    }

    #[test]
    fn test_tar_oversized_content_fails() {
        let mut buffer = header_block("huge.log", 4096, b'0').to_vec();
        buffer.extend_from_slice(&[0u8; BLOCK_LEN]);

        let err = extract_tar(&buffer, "bundle.tar.gz").unwrap_err();
        assert!(matches!(err, ExtractError::MalformedArchive { .. }));
    }

    #[test]
    fn test_tar_no_qualifying_entries_is_empty_not_error() {
        let buffer = entry_bytes("image.png", &[0x89, 0x50, 0x4e, 0x47], b'0');
        let records = extract_tar(&buffer, "bundle.tar.gz").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_tar_end_to_end_through_gzip() {
        let mut tar = entry_bytes("svc/app.log", b"started\nstopped\n", b'0');
        tar.extend_from_slice(&[0u8; BLOCK_LEN * 2]);
        let compressed = gzip_compress(&tar);

        let records = extract_archive(&compressed, "svc-logs.tgz").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "svc/app.log");
        assert_eq!(records[0].size, 16);
    }

    #[test]
    fn test_ids_unique_across_duplicate_names() {
        let mut tar = entry_bytes("app.log", b"a\n", b'0');
        tar.extend_from_slice(&entry_bytes("app.log", b"b\n", b'0'));

        let records = extract_tar(&tar, "bundle.tar.gz").unwrap();
        assert_eq!(records.len(), 2);
        assert_ne!(records[0].id, records[1].id);
    }

    #[test]
    fn test_repeat_extraction_equal_except_ids() {
        let mut tar = entry_bytes("a.log", b"alpha\n", b'0');
        tar.extend_from_slice(&entry_bytes("b.log", b"beta\n", b'0'));

        let first = extract_tar(&tar, "bundle.tar.gz").unwrap();
        let second = extract_tar(&tar, "bundle.tar.gz").unwrap();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_ne!(a.id, b.id);
            assert_eq!(a.name, b.name);
            assert_eq!(a.content, b.content);
            assert_eq!(a.size, b.size);
            assert_eq!(a.source_archive, b.source_archive);
        }
    }
}
