//! Upstream body decoding.
//!
//! The HTTP client runs without transparent decompression so that the
//! upstream `Content-Encoding` header survives for reporting. Bodies are
//! decoded here instead, after the header has been captured.

use std::io::{self, Read};

use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};

/// Undo `content_encoding` on `body`.
///
/// Codings are removed in reverse order of application. Codings other than
/// gzip and deflate are left in place.
pub fn decode_body(content_encoding: Option<&str>, body: Vec<u8>) -> io::Result<Vec<u8>> {
    let Some(encoding) = content_encoding else {
        return Ok(body);
    };

    let mut decoded = body;
    for coding in encoding.rsplit(',').map(|c| c.trim().to_ascii_lowercase()) {
        decoded = match coding.as_str() {
            "" | "identity" => decoded,
            "gzip" | "x-gzip" => read_all(GzDecoder::new(decoded.as_slice()))?,
            "deflate" => inflate(&decoded)?,
            _ => break,
        };
    }
    Ok(decoded)
}

// "deflate" should be zlib-wrapped, but raw deflate streams are common.
fn inflate(body: &[u8]) -> io::Result<Vec<u8>> {
    read_all(ZlibDecoder::new(body)).or_else(|_| read_all(DeflateDecoder::new(body)))
}

fn read_all<R: Read>(mut reader: R) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    reader.read_to_end(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};
    use flate2::Compression;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_no_encoding_passthrough() {
        let body = b"{\"a\":1}".to_vec();
        assert_eq!(decode_body(None, body.clone()).unwrap(), body);
        assert_eq!(decode_body(Some("identity"), body.clone()).unwrap(), body);
    }

    #[test]
    fn test_gzip() {
        let body = gzip(b"{\"a\":1}");
        assert_eq!(decode_body(Some("gzip"), body.clone()).unwrap(), b"{\"a\":1}");
        assert_eq!(decode_body(Some("X-GZIP"), body).unwrap(), b"{\"a\":1}");
    }

    #[test]
    fn test_deflate_zlib_and_raw() {
        let mut zlib = ZlibEncoder::new(Vec::new(), Compression::default());
        zlib.write_all(b"hello").unwrap();
        let zlib = zlib.finish().unwrap();
        assert_eq!(decode_body(Some("deflate"), zlib).unwrap(), b"hello");

        let mut raw = DeflateEncoder::new(Vec::new(), Compression::default());
        raw.write_all(b"hello").unwrap();
        let raw = raw.finish().unwrap();
        assert_eq!(decode_body(Some("deflate"), raw).unwrap(), b"hello");
    }

    #[test]
    fn test_stacked_codings() {
        let body = gzip(&gzip(b"twice"));
        assert_eq!(decode_body(Some("gzip, gzip"), body).unwrap(), b"twice");
    }

    #[test]
    fn test_unknown_coding_left_alone() {
        let body = b"\x0b\x02\x80opaque".to_vec();
        assert_eq!(decode_body(Some("br"), body.clone()).unwrap(), body);
    }

    #[test]
    fn test_corrupt_gzip_is_error() {
        assert!(decode_body(Some("gzip"), b"not gzip at all".to_vec()).is_err());
    }
}
