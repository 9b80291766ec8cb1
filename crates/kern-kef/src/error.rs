use thiserror::Error;

pub type KefResult<T> = Result<T, KefError>;

/// Errors from envelope encryption, decryption, and parsing.
///
/// [`KefError::Auth`] is deliberately uninformative: it covers every
/// authentication failure (hidden trailer, exposed trailer, GCM tag) without
/// revealing which check failed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum KefError {
    #[error("invalid argument")]
    InvalidArg,

    #[error("unsupported KEF version {0}")]
    UnsupportedVersion(u8),

    #[error("cryptographic operation failed")]
    Crypto,

    #[error("authentication failed")]
    Auth,

    #[error("compression failed")]
    Compress,

    #[error("decompression failed")]
    Decompress,

    #[error("envelope too short")]
    EnvelopeTooShort,

    #[error("duplicate ECB blocks detected")]
    DuplicateBlocks,
}
