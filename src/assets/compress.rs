//! Gzip compression of asset payloads

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;

/// Compress `data` into a self-contained gzip member at the best compression level.
pub fn gzip_best(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2 + 32), Compression::best());
    encoder.write_all(data)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn gunzip(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        GzDecoder::new(data).read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn test_gzip_magic() {
        let compressed = gzip_best(b"hello").unwrap();
        assert_eq!(&compressed[..2], &[0x1f, 0x8b]);
    }

    #[test]
    fn test_gzip_decodes_to_input() {
        let input = b"rotating banner ".repeat(64);
        let compressed = gzip_best(&input).unwrap();
        assert!(compressed.len() < input.len());
        assert_eq!(gunzip(&compressed), input);
    }

    #[test]
    fn test_gzip_empty_input() {
        let compressed = gzip_best(b"").unwrap();
        assert!(gunzip(&compressed).is_empty());
    }
}
