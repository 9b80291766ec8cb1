//! Envelope header parsing and recognition.
//!
//! Layout: `len_id(1) ‖ id(len_id) ‖ version(1) ‖ iterations(3 BE) ‖
//! iv(0|12|16) ‖ ciphertext ‖ exposed_auth?`

use crate::error::{KefError, KefResult};
use crate::version::{decode_iterations, find_version, Mode};

/// Smallest possible header: len_id + 1-byte id + version + iterations.
pub const MIN_HEADER: usize = 6;

/// The ID length is stored in one byte.
pub const MAX_ID_LEN: usize = 255;

/// Parsed header fields; `id` borrows from the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeHeader<'a> {
    pub id: &'a [u8],
    pub version: u8,
    pub iterations: u32,
}

impl<'a> EnvelopeHeader<'a> {
    /// Parse the fixed header without touching the payload.
    pub fn parse(envelope: &'a [u8]) -> KefResult<Self> {
        if envelope.len() < MIN_HEADER {
            return Err(KefError::InvalidArg);
        }

        let id_len = envelope[0] as usize;
        if id_len == 0 {
            return Err(KefError::InvalidArg);
        }

        let header_len = 1 + id_len + 1 + 3;
        if envelope.len() < header_len {
            return Err(KefError::EnvelopeTooShort);
        }

        let id = &envelope[1..1 + id_len];
        let version = envelope[1 + id_len];
        let iterations = decode_iterations([
            envelope[1 + id_len + 1],
            envelope[1 + id_len + 2],
            envelope[1 + id_len + 3],
        ]);

        Ok(Self {
            id,
            version,
            iterations,
        })
    }

    /// Byte length of the header this was parsed from.
    pub fn header_len(&self) -> usize {
        1 + self.id.len() + 1 + 3
    }
}

/// True if `data` parses as an envelope with a known version and carries at
/// least the minimum payload: IV, one cipher unit (a block for ECB/CBC, a
/// byte for stream modes), and the exposed trailer if the version has one.
pub fn is_envelope(data: &[u8]) -> bool {
    let Ok(header) = EnvelopeHeader::parse(data) else {
        return false;
    };
    let Some(vi) = find_version(header.version) else {
        return false;
    };

    let min_cipher = match vi.mode {
        Mode::Ecb | Mode::Cbc => 16,
        Mode::Ctr | Mode::Gcm => 1,
    };
    let trailer = if vi.has_trailer() { vi.auth_size } else { 0 };
    let min_total = header.header_len() + vi.iv_size + min_cipher + trailer;

    data.len() >= min_total
}
