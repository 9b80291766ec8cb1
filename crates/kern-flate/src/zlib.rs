//! RFC 1950 zlib wrapping: CMF/FLG header, raw DEFLATE body, big-endian
//! Adler-32 trailer.

use crate::deflate::{deflate_raw_with_wbits, DEFAULT_WBITS};
use crate::error::{FlateError, FlateResult};
use crate::inflate::inflate_raw;

const ADLER_MOD: u32 = 65521;

/// Adler-32 of `data` (seed 1). Sums are reduced every 5550 bytes, the
/// largest block that cannot overflow 32-bit accumulators.
pub fn adler32(data: &[u8]) -> u32 {
    let mut s1: u32 = 1;
    let mut s2: u32 = 0;

    for block in data.chunks(5550) {
        for &b in block {
            s1 += u32::from(b);
            s2 += s1;
        }
        s1 %= ADLER_MOD;
        s2 %= ADLER_MOD;
    }

    (s2 << 16) | s1
}

/// True if the first two bytes form a valid zlib header (method 8 and a
/// passing FCHECK).
pub fn looks_like_zlib(data: &[u8]) -> bool {
    data.len() >= 2
        && data[0] & 0x0F == 0x08
        && (u32::from(data[0]) * 256 + u32::from(data[1])) % 31 == 0
}

/// Compress into a zlib stream with the default window.
pub fn compress(src: &[u8]) -> Vec<u8> {
    compress_with_wbits(src, DEFAULT_WBITS)
}

/// Compress into a zlib stream: CMF/FLG header, fixed-Huffman DEFLATE body,
/// Adler-32 trailer.
pub fn compress_with_wbits(src: &[u8], wbits: u32) -> Vec<u8> {
    let wbits = if (8..=15).contains(&wbits) {
        wbits
    } else {
        DEFAULT_WBITS
    };

    // CMF: CM=8 (deflate), CINFO=wbits-8. FLG: FDICT=0, level bits 0,
    // FCHECK chosen so (CMF*256 + FLG) % 31 == 0.
    let cmf = 0x08 | ((wbits - 8) << 4) as u8;
    let mut flg = 0u8;
    flg |= (31 - (u32::from(cmf) * 256 + u32::from(flg)) % 31) as u8;

    let body = deflate_raw_with_wbits(src, wbits);
    let adler = adler32(src);

    let mut out = Vec::with_capacity(2 + body.len() + 4);
    out.push(cmf);
    out.push(flg);
    out.extend_from_slice(&body);
    out.extend_from_slice(&adler.to_be_bytes());
    out
}

/// Decompress a zlib stream, verifying the header check, rejecting preset
/// dictionaries, and verifying the Adler-32 trailer.
pub fn uncompress(src: &[u8]) -> FlateResult<Vec<u8>> {
    if src.len() < 6 {
        return Err(FlateError::Data);
    }

    let cmf = src[0];
    let flg = src[1];
    if cmf & 0x0F != 8 {
        return Err(FlateError::Data);
    }
    if (u32::from(cmf) * 256 + u32::from(flg)) % 31 != 0 {
        return Err(FlateError::Data);
    }
    if flg & 0x20 != 0 {
        // Preset dictionary not supported
        return Err(FlateError::Data);
    }

    let out = inflate_raw(&src[2..src.len() - 4])?;

    let stored = u32::from_be_bytes([
        src[src.len() - 4],
        src[src.len() - 3],
        src[src.len() - 2],
        src[src.len() - 1],
    ]);
    if adler32(&out) != stored {
        return Err(FlateError::Data);
    }

    Ok(out)
}
