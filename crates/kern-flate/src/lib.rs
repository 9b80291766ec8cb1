//! kern-flate: miniz-compatible DEFLATE for the kern signing device.
//!
//! A single fixed profile, not a general compression library:
//!
//! - **Inflate** handles all three RFC 1951 block types with selectable
//!   output strategies (caller buffer or grow-on-demand up to 16 MiB).
//! - **Deflate** emits one final fixed-Huffman block from a longest-match
//!   LZ77 over a circular window of `2^wbits` bytes (8-15, default 10).
//! - **Zlib** adds the RFC 1950 CMF/FLG header and Adler-32 trailer.
//!
//! Envelope compression and `Z`-encoded QR payloads both store these bytes
//! verbatim, so the encoder's output (including its match tie-breaking) is
//! part of the device's wire format and is pinned by tests.

pub mod deflate;
pub mod error;
pub mod inflate;
pub mod zlib;

pub use deflate::{deflate_raw, deflate_raw_with_wbits, DEFAULT_WBITS};
pub use error::{FlateError, FlateResult};
pub use inflate::{inflate_raw, inflate_raw_into, MAX_INFLATE_SIZE};
pub use zlib::{adler32, compress, compress_with_wbits, looks_like_zlib, uncompress};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_content_roundtrip() {
        let mut data = Vec::new();
        data.extend_from_slice(b"text header ");
        data.extend((0u32..512).map(|i| (i % 256) as u8));
        data.extend_from_slice(b" text footer text footer");

        let compressed = compress(&data);
        assert_eq!(uncompress(&compressed).unwrap(), data);

        let raw = deflate_raw(&data);
        assert_eq!(inflate_raw(&raw).unwrap(), data);
    }

    #[test]
    fn test_psbt_like_binary_roundtrip() {
        // Transaction-shaped bytes: magic, zero runs, key-value pairs.
        let mut data = vec![0x70, 0x73, 0x62, 0x74, 0xFF];
        data.extend_from_slice(&[0x01, 0x00, 0x52, 0x02, 0x00, 0x00, 0x00, 0x01]);
        data.extend(std::iter::repeat(0x00).take(64));
        data.extend((0u32..128).map(|i| (i * 31 % 256) as u8));

        let compressed = deflate_raw_with_wbits(&data, 10);
        assert!(compressed.len() < data.len());
        assert_eq!(inflate_raw(&compressed).unwrap(), data);
    }
}
