use std::io::{self, Read};

use flate2::read::MultiGzDecoder;

/// Decompress a complete gzip byte stream into a single contiguous buffer.
///
/// The whole stream is consumed; concatenated gzip members decode as one
/// payload. Invalid framing, a corrupt deflate stream, or a truncated input
/// all surface as an error rather than partial output. Pure function, safe
/// to call concurrently for independent inputs.
pub fn decompress(raw: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = MultiGzDecoder::new(raw);
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed)?;
    Ok(decompressed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    fn gzip_compress(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_round_trip() {
        let original = b"2024-01-15T10:30:00Z INFO service started\n";
        let compressed = gzip_compress(original);
        let result = decompress(&compressed).unwrap();
        assert_eq!(result, original);
    }

    #[test]
    fn test_bad_magic_is_error() {
        let invalid = vec![0x00, 0x01, 0x02, 0x03];
        assert!(decompress(&invalid).is_err());
    }

    #[test]
    fn test_truncated_stream_is_error() {
        let compressed = gzip_compress(b"some log content that compresses");
        let truncated = &compressed[..compressed.len() / 2];
        assert!(decompress(truncated).is_err());
    }

    #[test]
    fn test_concatenated_members_decode_fully() {
        let mut joined = gzip_compress(b"first\n");
        joined.extend_from_slice(&gzip_compress(b"second\n"));
        let result = decompress(&joined).unwrap();
        assert_eq!(result, b"first\nsecond\n");
    }
}
