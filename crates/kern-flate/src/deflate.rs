//! RFC 1951 DEFLATE compression: LZ77 with fixed Huffman codes.
//!
//! Emits a single final block (BFINAL=1, BTYPE=01). The match search scans
//! the whole window and keeps the most recent offset on equal lengths; the
//! compressed bytes are stored inside envelopes and QR parts, so the
//! tie-break is part of the observable format.

/// Default window bits (1024-byte window).
pub const DEFAULT_WBITS: u32 = 10;

const MATCH_LEN_MIN: usize = 3;
const MATCH_LEN_MAX: usize = 258;

const MIRROR_NIBBLE: [u8; 16] = [
    0x0, 0x8, 0x4, 0xc, 0x2, 0xa, 0x6, 0xe, 0x1, 0x9, 0x5, 0xd, 0x3, 0xb, 0x7, 0xf,
];

/// Reverse the bit order of a byte; fixed Huffman code values are defined
/// MSB-first but transmitted LSB-first.
fn mirror_byte(b: u8) -> u8 {
    (MIRROR_NIBBLE[(b & 0xf) as usize] << 4) | MIRROR_NIBBLE[(b >> 4) as usize]
}

fn int_log2(mut x: usize) -> usize {
    let mut r = 0;
    loop {
        x >>= 1;
        if x == 0 {
            break;
        }
        r += 1;
    }
    r
}

struct Deflater {
    out: Vec<u8>,
    bit_buf: u32,
    bit_count: u32,
    hist: Vec<u8>,
    hist_start: usize,
    hist_len: usize,
}

impl Deflater {
    fn new(window_size: usize) -> Self {
        Self {
            out: Vec::new(),
            bit_buf: 0,
            bit_count: 0,
            hist: vec![0u8; window_size],
            hist_start: 0,
            hist_len: 0,
        }
    }

    /// Append bits LSB-first, flushing whole bytes to the output.
    fn put_bits(&mut self, bits: u32, nbits: u32) {
        self.bit_buf |= bits << self.bit_count;
        self.bit_count += nbits;
        while self.bit_count >= 8 {
            self.out.push((self.bit_buf & 0xFF) as u8);
            self.bit_buf >>= 8;
            self.bit_count -= 8;
        }
    }

    fn put_literal(&mut self, c: u8) {
        if c <= 143 {
            // 0-143: 8-bit codes starting at 0x30
            self.put_bits(u32::from(mirror_byte(0x30 + c)), 8);
        } else {
            // 144-255: 9-bit codes starting at 0x190
            self.put_bits(1 + 2 * u32::from(mirror_byte(0x90 - 144 + c)), 9);
        }
    }

    /// Emit a length/distance pair with fixed codes. Lengths above 258 are
    /// split into multiple codes.
    fn put_match(&mut self, distance: usize, mut len: usize) {
        let distance = distance - 1;

        while len > 0 {
            let mut thislen = if len > 260 {
                258
            } else if len <= 258 {
                len
            } else {
                len - 3
            };
            len -= thislen;
            thislen -= 3;

            let mut lcode = 28;
            let mut x = int_log2(thislen);
            if thislen < 255 {
                if x > 0 {
                    x -= 1;
                }
                let y = (thislen >> if x > 0 { x - 1 } else { 0 }) & 3;
                lcode = x * 4 + y;
            }

            // Length codes 256-279 are 7 bits, 280-287 are 8 bits.
            if lcode <= 22 {
                self.put_bits(u32::from(mirror_byte(((lcode + 1) * 2) as u8)), 7);
            } else {
                self.put_bits(u32::from(mirror_byte((lcode + 169) as u8)), 8);
            }

            if thislen < 255 && x > 1 {
                let extra = x - 1;
                let lmin = (thislen >> extra) << extra;
                self.put_bits((thislen - lmin) as u32, extra as u32);
            }

            let x = int_log2(distance);
            let y = (distance >> if x > 0 { x - 1 } else { 0 }) & 1;

            // Distance codes are 5 bits.
            self.put_bits(u32::from(mirror_byte(((x * 2 + y) * 8) as u8)), 5);

            if x > 1 {
                let extra = x - 1;
                let dmin = (distance >> extra) << extra;
                self.put_bits((distance - dmin) as u32, extra as u32);
            }
        }
    }

    fn start_block(&mut self) {
        // BFINAL=1, BTYPE=01 (fixed Huffman)
        self.put_bits(3, 3);
    }

    fn finish_block(&mut self) {
        // End-of-block symbol 256: seven zero bits, then pad to a byte.
        self.put_bits(0, 7);
        if self.bit_count > 0 {
            self.put_bits(0, 8 - self.bit_count);
        }
    }

    /// Longest match against the history window. `src` is the remaining
    /// input; matches may run past the end of history into `src` itself
    /// (overlapping copies). Equal lengths keep the most recent offset.
    fn find_match(&self, src: &[u8]) -> Option<(usize, usize)> {
        let mask = self.hist.len() - 1;
        let mut longest_len = 0;
        let mut match_offset = 0;

        for hist_search in 0..self.hist_len {
            let mut match_len = 0;
            while match_len < MATCH_LEN_MAX && match_len < src.len() {
                let hist = if hist_search + match_len < self.hist_len {
                    self.hist[(self.hist_start + hist_search + match_len) & mask]
                } else {
                    src[hist_search + match_len - self.hist_len]
                };
                if src[match_len] != hist {
                    break;
                }
                match_len += 1;
            }

            if match_len >= MATCH_LEN_MIN && match_len >= longest_len {
                longest_len = match_len;
                match_offset = self.hist_len - hist_search;
            }
        }

        if longest_len == 0 {
            None
        } else {
            Some((match_offset, longest_len))
        }
    }

    fn push_history(&mut self, data: &[u8]) {
        let mask = self.hist.len() - 1;
        for &b in data {
            self.hist[(self.hist_start + self.hist_len) & mask] = b;
            if self.hist_len == self.hist.len() {
                self.hist_start = (self.hist_start + 1) & mask;
            } else {
                self.hist_len += 1;
            }
        }
    }

    fn compress(&mut self, mut src: &[u8]) {
        while !src.is_empty() {
            match self.find_match(src) {
                None => {
                    self.put_literal(src[0]);
                    self.push_history(&src[..1]);
                    src = &src[1..];
                }
                Some((offset, len)) => {
                    self.put_match(offset, len);
                    self.push_history(&src[..len]);
                    src = &src[len..];
                }
            }
        }
    }
}

/// Compress with the default 1024-byte window.
pub fn deflate_raw(src: &[u8]) -> Vec<u8> {
    deflate_raw_with_wbits(src, DEFAULT_WBITS)
}

/// Compress with a `2^wbits`-byte window. Out-of-range `wbits` falls back
/// to the default, matching the decoder-agnostic behavior callers rely on.
pub fn deflate_raw_with_wbits(src: &[u8], wbits: u32) -> Vec<u8> {
    let wbits = if (8..=15).contains(&wbits) {
        wbits
    } else {
        DEFAULT_WBITS
    };

    let mut state = Deflater::new(1usize << wbits);
    state.start_block();
    state.compress(src);
    state.finish_block();
    state.out
}
