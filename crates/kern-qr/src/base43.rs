//! Base43: a 43-symbol subset of the QR alphanumeric character set, as
//! used by Krux for compact QR transport of binary payloads.
//!
//! The input is treated as one big-endian integer and converted between
//! base 256 and base 43 by repeated division. Leading 0x00 bytes carry no
//! numeric weight, so they map one-to-one onto leading `0` symbols.

use crate::error::{QrError, QrResult};

const ALPHABET: &[u8; 43] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ$*+-./:";
const BASE: u32 = 43;

fn digit_of(c: u8) -> Option<u32> {
    ALPHABET.iter().position(|&a| a == c).map(|p| p as u32)
}

pub fn encode(data: &[u8]) -> String {
    let n_pad = data.iter().take_while(|&&b| b == 0).count();

    // Repeatedly divide the zero-stripped magnitude by 43, collecting
    // remainders (least significant digit first).
    let mut num = data[n_pad..].to_vec();
    let mut digits = Vec::new();

    while !num.is_empty() {
        let mut remainder = 0u32;
        let mut quotient = Vec::with_capacity(num.len());
        for &b in &num {
            let val = remainder * 256 + u32::from(b);
            let q = (val / BASE) as u8;
            remainder = val % BASE;
            if !quotient.is_empty() || q > 0 {
                quotient.push(q);
            }
        }
        digits.push(ALPHABET[remainder as usize]);
        num = quotient;
    }

    let mut out = String::with_capacity(n_pad + digits.len());
    for _ in 0..n_pad {
        out.push('0');
    }
    out.extend(digits.iter().rev().map(|&d| d as char));
    out
}

pub fn decode(input: &str) -> QrResult<Vec<u8>> {
    if input.is_empty() {
        return Err(QrError::EmptyPayload);
    }

    // buf holds the big-endian magnitude: buf = buf * 43 + digit.
    let mut buf: Vec<u8> = Vec::new();
    for c in input.bytes() {
        let digit = digit_of(c).ok_or(QrError::BadBase43(c as char))?;

        let mut carry = digit;
        for b in buf.iter_mut().rev() {
            let val = u32::from(*b) * BASE + carry;
            *b = (val & 0xFF) as u8;
            carry = val >> 8;
        }
        while carry > 0 {
            buf.insert(0, (carry & 0xFF) as u8);
            carry >>= 8;
        }
    }

    let n_pad = input.bytes().take_while(|&b| b == b'0').count();
    let mut out = vec![0u8; n_pad];
    out.extend_from_slice(&buf);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_byte_values() {
        assert_eq!(encode(&[0x00]), "0");
        assert_eq!(encode(&[0x01]), "1");
        assert_eq!(encode(&[42]), ":");
        assert_eq!(encode(&[43]), "10");
        assert_eq!(decode("0").unwrap(), [0x00]);
        assert_eq!(decode("10").unwrap(), [43]);
    }

    #[test]
    fn test_leading_zero_bytes_survive() {
        let data = [0x00, 0x00, 0x01, 0x02];
        let encoded = encode(&data);
        assert!(encoded.starts_with("00"));
        assert_eq!(decode(&encoded).unwrap(), data);
    }

    #[test]
    fn test_all_zero_input() {
        assert_eq!(encode(&[0x00, 0x00, 0x00]), "000");
        assert_eq!(decode("000").unwrap(), [0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_known_string_roundtrip() {
        // Krux-compatible sample: decoding then re-encoding is identity.
        let s = "0CQV4*87Q-";
        let decoded = decode(s).unwrap();
        assert_eq!(decoded[0], 0x00, "leading '0' symbol maps to a zero byte");
        assert_eq!(encode(&decoded), s);
    }

    #[test]
    fn test_rejects_invalid_symbols() {
        assert_eq!(decode("AB#").unwrap_err(), QrError::BadBase43('#'));
        // Lowercase is not part of the QR alphanumeric subset.
        assert_eq!(decode("abc").unwrap_err(), QrError::BadBase43('a'));
    }

    #[test]
    fn test_rejects_empty_input() {
        assert_eq!(decode("").unwrap_err(), QrError::EmptyPayload);
    }

    #[test]
    fn test_empty_data_encodes_to_empty_string() {
        assert_eq!(encode(&[]), "");
    }

    proptest::proptest! {
        #[test]
        fn roundtrip_arbitrary(data in proptest::collection::vec(proptest::prelude::any::<u8>(), 1..=128)) {
            let encoded = encode(&data);
            proptest::prop_assert_eq!(decode(&encoded).unwrap(), data);
        }

        /// Zero-heavy inputs exercise the leading-pad mapping.
        #[test]
        fn roundtrip_with_leading_zeros(
            zeros in 0usize..8,
            data in proptest::collection::vec(proptest::prelude::any::<u8>(), 0..=32),
        ) {
            let mut padded = vec![0u8; zeros];
            padded.extend_from_slice(&data);
            proptest::prop_assume!(!padded.is_empty());
            let encoded = encode(&padded);
            proptest::prop_assert_eq!(decode(&encoded).unwrap(), padded);
        }
    }
}
