//! BBQr ("Better Bitcoin QR") multi-part codec.
//!
//! Every part is one QR-friendly ASCII string:
//!
//! ```text
//! B$ <encoding> <file_type> <total:base36 x2> <index:base36 x2> <payload>
//! ```
//!
//! Payloads are hex (`H`, decode-only here), RFC 4648 base32 (`2`), or
//! base32 over raw DEFLATE (`Z`). Up to 1295 parts (`ZZ` in base 36).

use kern_flate::{deflate_raw, inflate_raw, looks_like_zlib, uncompress};

use crate::base32;
use crate::error::{QrError, QrResult};

/// Header is exactly 8 ASCII characters.
pub const HEADER_LEN: usize = 8;

/// Two base-36 characters cap the part count.
pub const MAX_PARTS: usize = 1295;

const BASE36_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Payload encoding, the third header character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Uppercase hex. Accepted from other implementations, never produced.
    Hex,
    /// RFC 4648 base32, uncompressed.
    Base32,
    /// Base32 over raw DEFLATE (zlib-wrapped accepted leniently).
    Zlib,
}

impl Encoding {
    pub fn from_char(c: u8) -> QrResult<Self> {
        match c {
            b'H' => Ok(Self::Hex),
            b'2' => Ok(Self::Base32),
            b'Z' => Ok(Self::Zlib),
            _ => Err(QrError::BadEncoding(c as char)),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Hex => 'H',
            Self::Base32 => '2',
            Self::Zlib => 'Z',
        }
    }
}

/// Transported file type, the fourth header character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Psbt,
    Transaction,
    Json,
    Unicode,
}

impl FileType {
    pub fn from_char(c: u8) -> QrResult<Self> {
        match c {
            b'P' => Ok(Self::Psbt),
            b'T' => Ok(Self::Transaction),
            b'J' => Ok(Self::Json),
            b'U' => Ok(Self::Unicode),
            _ => Err(QrError::BadFileType(c as char)),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Psbt => 'P',
            Self::Transaction => 'T',
            Self::Json => 'J',
            Self::Unicode => 'U',
        }
    }
}

/// Decode a two-character base-36 pair (case-insensitive).
pub fn base36_decode_pair(c1: u8, c2: u8) -> QrResult<usize> {
    let val = |c: u8| -> QrResult<usize> {
        match c.to_ascii_uppercase() {
            d @ b'0'..=b'9' => Ok((d - b'0') as usize),
            d @ b'A'..=b'Z' => Ok((d - b'A') as usize + 10),
            _ => Err(QrError::BadBase36),
        }
    };
    Ok(val(c1)? * 36 + val(c2)?)
}

/// Encode a value 0..=1295 as a two-character base-36 pair.
pub fn base36_encode_pair(value: usize) -> QrResult<[u8; 2]> {
    if value > MAX_PARTS {
        return Err(QrError::BadBase36);
    }
    Ok([BASE36_ALPHABET[value / 36], BASE36_ALPHABET[value % 36]])
}

/// One parsed part; the payload borrows from the scanned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Part<'a> {
    pub encoding: Encoding,
    pub file_type: FileType,
    pub total: usize,
    pub index: usize,
    pub payload: &'a [u8],
}

impl<'a> Part<'a> {
    /// Parse the 8-character header; everything after it is payload.
    pub fn parse(data: &'a [u8]) -> QrResult<Self> {
        if data.len() < HEADER_LEN {
            return Err(QrError::BadHeader);
        }
        if &data[..2] != b"B$" {
            return Err(QrError::BadHeader);
        }

        let encoding = Encoding::from_char(data[2].to_ascii_uppercase())?;
        let file_type = FileType::from_char(data[3].to_ascii_uppercase())?;

        let total = base36_decode_pair(data[4], data[5])?;
        if total < 1 || total > MAX_PARTS {
            return Err(QrError::BadHeader);
        }
        let index = base36_decode_pair(data[6], data[7])?;
        if index >= total {
            return Err(QrError::BadHeader);
        }

        Ok(Self {
            encoding,
            file_type,
            total,
            index,
            payload: &data[HEADER_LEN..],
        })
    }
}

/// Decode an assembled payload according to its encoding.
pub fn decode_payload(encoding: Encoding, payload: &[u8]) -> QrResult<Vec<u8>> {
    if payload.is_empty() {
        return Err(QrError::EmptyPayload);
    }

    match encoding {
        Encoding::Hex => hex::decode(payload).map_err(|_| QrError::BadHex),
        Encoding::Base32 => base32::decode(payload),
        Encoding::Zlib => {
            let compressed = base32::decode(payload)?;
            // BBQr mandates raw DEFLATE, but zlib-wrapped streams exist in
            // the wild; sniff the header and accept both.
            if looks_like_zlib(&compressed) {
                if let Ok(out) = uncompress(&compressed) {
                    return Ok(out);
                }
            }
            inflate_raw(&compressed).map_err(|_| QrError::Decompress)
        }
    }
}

/// A payload split into QR-ready part strings.
#[derive(Debug, Clone)]
pub struct EncodedParts {
    pub parts: Vec<String>,
    pub encoding: Encoding,
    pub file_type: FileType,
}

/// Encode `data` as BBQr parts, each at most `max_chars_per_qr` characters
/// including the header.
///
/// Compression is attempted first (raw DEFLATE, 1 KiB window) and used only
/// when it strictly shrinks the payload. All parts except the last carry a
/// payload that is a multiple of 8 characters, so each decodes on its own
/// base32 group boundary.
pub fn encode(data: &[u8], file_type: FileType, max_chars_per_qr: usize) -> QrResult<EncodedParts> {
    if data.is_empty() {
        return Err(QrError::EmptyPayload);
    }
    if max_chars_per_qr < HEADER_LEN + 8 {
        return Err(QrError::CapacityTooSmall);
    }
    let max_payload_per_part = max_chars_per_qr - HEADER_LEN;

    let compressed = deflate_raw(data);
    let (encoding, encoded) = if compressed.len() < data.len() {
        (Encoding::Zlib, base32::encode(&compressed))
    } else {
        (Encoding::Base32, base32::encode(data))
    };

    // First estimate: the largest 8-aligned payload that fits.
    let mut payload_per_part = (max_payload_per_part / 8) * 8;
    if payload_per_part == 0 {
        payload_per_part = 8;
    }

    let num_parts = encoded.len().div_ceil(payload_per_part).max(1);
    if num_parts > MAX_PARTS {
        return Err(QrError::TooManyParts(num_parts));
    }

    // Redistribute evenly across that many parts, keeping 8-alignment.
    payload_per_part = encoded.len().div_ceil(num_parts).div_ceil(8) * 8;

    let total_pair = base36_encode_pair(num_parts)?;
    let mut parts = Vec::with_capacity(num_parts);

    for (index, chunk) in encoded.as_bytes().chunks(payload_per_part).enumerate() {
        let index_pair = base36_encode_pair(index)?;
        let mut part = String::with_capacity(HEADER_LEN + chunk.len());
        part.push_str("B$");
        part.push(encoding.as_char());
        part.push(file_type.as_char());
        part.push(total_pair[0] as char);
        part.push(total_pair[1] as char);
        part.push(index_pair[0] as char);
        part.push(index_pair[1] as char);
        part.push_str(std::str::from_utf8(chunk).expect("base32 output is ASCII"));
        parts.push(part);
    }

    debug_assert_eq!(parts.len(), num_parts);

    Ok(EncodedParts {
        parts,
        encoding,
        file_type,
    })
}
