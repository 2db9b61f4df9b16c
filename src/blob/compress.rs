//! Gzip compression for stored blobs.

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use super::errors::{BlobError, BlobResult};

/// Gzip-compresses the UTF-8 bytes of `data`.
pub fn compress(data: &str) -> BlobResult<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data.as_bytes())
        .map_err(|e| BlobError::Compression(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| BlobError::Compression(e.to_string()))
}

/// Decompresses gzip bytes back into text.
pub fn decompress(bytes: &[u8]) -> BlobResult<String> {
    let mut decoder = GzDecoder::new(bytes);
    let mut raw = Vec::new();
    decoder
        .read_to_end(&mut raw)
        .map_err(|e| BlobError::Compression(e.to_string()))?;
    String::from_utf8(raw).map_err(|e| BlobError::InvalidUtf8(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_unicode() {
        let text = "héllo wörld ✓\nsecond line";
        let packed = compress(text).unwrap();
        assert_eq!(&packed[..2], &[0x1f, 0x8b]);
        assert_eq!(decompress(&packed).unwrap(), text);
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(decompress(&compress("").unwrap()).unwrap(), "");
    }

    #[test]
    fn test_garbage_rejected() {
        let result = decompress(b"definitely not gzip");
        assert!(matches!(result, Err(BlobError::Compression(_))));
    }
}
