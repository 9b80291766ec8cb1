//! Format detection for mnemonic-carrying QR payloads, plus the SeedQR and
//! Compact SeedQR conversions.
//!
//! A scanned payload is classified by shape alone, without decoding:
//! compact entropy is raw BIP-39 entropy bytes, SeedQR is 4-digit decimal
//! wordlist indices, and plaintext is the mnemonic itself.

use bip39::{Language, Mnemonic};

use crate::error::{QrError, QrResult};

/// Compact SeedQR payload lengths (entropy bytes).
pub const COMPACT_SEEDQR_12_WORDS_LEN: usize = 16;
pub const COMPACT_SEEDQR_24_WORDS_LEN: usize = 32;

/// SeedQR payload lengths (4 decimal digits per word).
pub const SEEDQR_12_WORDS_LEN: usize = 48;
pub const SEEDQR_24_WORDS_LEN: usize = 96;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MnemonicQrFormat {
    /// Space-separated mnemonic words.
    Plaintext,
    /// Raw entropy bytes (16 or 32).
    CompactSeedQr,
    /// Decimal wordlist indices (48 or 96 digits).
    SeedQr,
    Unknown,
}

impl MnemonicQrFormat {
    pub fn name(self) -> &'static str {
        match self {
            Self::Plaintext => "Plaintext",
            Self::CompactSeedQr => "Compact SeedQR",
            Self::SeedQr => "SeedQR",
            Self::Unknown => "Unknown",
        }
    }
}

fn is_printable(b: u8) -> bool {
    (0x20..=0x7E).contains(&b)
}

fn has_non_printable(data: &[u8]) -> bool {
    data.iter()
        .any(|&b| !is_printable(b) && !b.is_ascii_whitespace())
}

fn is_all_digits(data: &[u8]) -> bool {
    data.iter().all(|b| b.is_ascii_digit())
}

fn looks_like_plaintext(data: &[u8]) -> bool {
    let mut has_space = false;
    let mut has_letter = false;

    for &b in data {
        if b == b' ' {
            has_space = true;
        } else if b.is_ascii_alphabetic() {
            has_letter = true;
        } else if !is_printable(b) {
            return false;
        }
    }
    has_space && has_letter
}

/// Classify an opaque scanned payload.
pub fn detect_format(data: &[u8]) -> MnemonicQrFormat {
    if data.is_empty() {
        return MnemonicQrFormat::Unknown;
    }

    let compact_len =
        data.len() == COMPACT_SEEDQR_12_WORDS_LEN || data.len() == COMPACT_SEEDQR_24_WORDS_LEN;

    if compact_len && has_non_printable(data) {
        return MnemonicQrFormat::CompactSeedQr;
    }

    if (data.len() == SEEDQR_12_WORDS_LEN || data.len() == SEEDQR_24_WORDS_LEN)
        && is_all_digits(data)
    {
        return MnemonicQrFormat::SeedQr;
    }

    if looks_like_plaintext(data) {
        return MnemonicQrFormat::Plaintext;
    }

    // 16 or 32 printable bytes: entropy that happens to be ASCII.
    if compact_len {
        return MnemonicQrFormat::CompactSeedQr;
    }

    MnemonicQrFormat::Unknown
}

fn normalize(words: &str) -> String {
    words.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_mnemonic(words: &str) -> QrResult<Mnemonic> {
    Mnemonic::parse(normalize(words).as_str()).map_err(|_| QrError::InvalidMnemonic)
}

/// Convert Compact SeedQR entropy bytes to a mnemonic string.
pub fn compact_to_mnemonic(data: &[u8]) -> QrResult<String> {
    if data.len() != COMPACT_SEEDQR_12_WORDS_LEN && data.len() != COMPACT_SEEDQR_24_WORDS_LEN {
        return Err(QrError::BadEntropyLength(data.len()));
    }
    let mnemonic = Mnemonic::from_entropy(data).map_err(|_| QrError::InvalidMnemonic)?;
    Ok(mnemonic.to_string())
}

/// Convert SeedQR decimal digits to a mnemonic string.
pub fn seedqr_to_mnemonic(data: &[u8]) -> QrResult<String> {
    if (data.len() != SEEDQR_12_WORDS_LEN && data.len() != SEEDQR_24_WORDS_LEN)
        || !is_all_digits(data)
    {
        return Err(QrError::UnknownFormat);
    }

    let wordlist = Language::English.word_list();
    let mut words = Vec::with_capacity(data.len() / 4);

    for group in data.chunks_exact(4) {
        let mut index: u16 = 0;
        for &d in group {
            index = index * 10 + u16::from(d - b'0');
        }
        if index > 2047 {
            return Err(QrError::WordIndexOutOfRange(index));
        }
        words.push(wordlist[index as usize]);
    }

    let joined = words.join(" ");
    // Indices alone do not guarantee a valid checksum.
    parse_mnemonic(&joined)?;
    Ok(joined)
}

/// Decode any recognized format to a mnemonic, reporting what was
/// detected.
pub fn qr_to_mnemonic(data: &[u8]) -> QrResult<(String, MnemonicQrFormat)> {
    let format = detect_format(data);
    let mnemonic = match format {
        MnemonicQrFormat::CompactSeedQr => compact_to_mnemonic(data)?,
        MnemonicQrFormat::SeedQr => seedqr_to_mnemonic(data)?,
        MnemonicQrFormat::Plaintext => {
            let text = std::str::from_utf8(data).map_err(|_| QrError::InvalidMnemonic)?;
            let parsed = parse_mnemonic(text)?;
            parsed.to_string()
        }
        MnemonicQrFormat::Unknown => return Err(QrError::UnknownFormat),
    };
    Ok((mnemonic, format))
}

/// Render a mnemonic as SeedQR digits (4 per word).
pub fn mnemonic_to_seedqr(words: &str) -> QrResult<String> {
    let mnemonic = parse_mnemonic(words)?;
    let count = mnemonic.word_count();
    if count != 12 && count != 24 {
        return Err(QrError::BadWordCount(count));
    }

    let wordlist = Language::English.word_list();
    let mut out = String::with_capacity(count * 4);

    for word in normalize(words).split(' ') {
        let index = wordlist
            .iter()
            .position(|&w| w == word)
            .ok_or_else(|| QrError::UnknownWord(word.to_string()))?;
        out.push_str(&format!("{index:04}"));
    }

    Ok(out)
}

/// Render a mnemonic as Compact SeedQR entropy bytes.
pub fn mnemonic_to_compact(words: &str) -> QrResult<Vec<u8>> {
    let mnemonic = parse_mnemonic(words)?;
    let entropy = mnemonic.to_entropy();
    if entropy.len() != COMPACT_SEEDQR_12_WORDS_LEN && entropy.len() != COMPACT_SEEDQR_24_WORDS_LEN
    {
        return Err(QrError::BadEntropyLength(entropy.len()));
    }
    Ok(entropy)
}
