use thiserror::Error;

pub type QrResult<T> = Result<T, QrError>;

/// Errors from QR transport codecs and the part assembler.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QrError {
    #[error("not a BBQr part header")]
    BadHeader,

    #[error("unknown BBQr encoding {0:?}")]
    BadEncoding(char),

    #[error("unknown BBQr file type {0:?}")]
    BadFileType(char),

    #[error("invalid base-36 pair")]
    BadBase36,

    #[error("part header inconsistent with the transfer in progress")]
    Inconsistent,

    #[error("duplicate part index {0}")]
    DuplicateIndex(usize),

    #[error("transfer incomplete: {received} of {total} parts")]
    Incomplete { received: usize, total: usize },

    #[error("payload needs {0} parts, above the 1295-part cap")]
    TooManyParts(usize),

    #[error("QR capacity too small for a part")]
    CapacityTooSmall,

    #[error("empty payload")]
    EmptyPayload,

    #[error("invalid hex payload")]
    BadHex,

    #[error("invalid base32 character {0:?}")]
    BadBase32(char),

    #[error("invalid base43 character {0:?}")]
    BadBase43(char),

    #[error("payload decompression failed")]
    Decompress,

    #[error("not a UR string")]
    BadUr,

    #[error("invalid UR type")]
    BadUrType,

    #[error("invalid UR sequence component")]
    BadSequence,

    #[error("invalid BIP-39 mnemonic")]
    InvalidMnemonic,

    #[error("unsupported word count {0}")]
    BadWordCount(usize),

    #[error("word index {0} outside the BIP-39 wordlist")]
    WordIndexOutOfRange(u16),

    #[error("unknown BIP-39 word {0:?}")]
    UnknownWord(String),

    #[error("unsupported entropy length {0}")]
    BadEntropyLength(usize),

    #[error("unrecognized QR payload format")]
    UnknownFormat,
}
