//! kern-kef: the Key Encryption Format.
//!
//! Versioned AES-256 envelopes protecting secrets at rest on the signing
//! device. Each envelope records its own version, PBKDF2 salt (the ID) and
//! iteration count, so any envelope can be opened with nothing but the
//! password:
//!
//! ```text
//! [len_id:1] [id:len_id] [version:1] [iterations:3 BE]
//! [iv:0|12|16] [ciphertext] [exposed_auth?]
//! ```
//!
//! The version table selects the cipher mode (ECB/CBC/CTR/GCM), padding,
//! optional raw-deflate compression, and authentication style. Every call
//! is self-contained over caller-provided buffers; derived keys and
//! plaintext intermediates are zeroized on all exit paths.
//!
//! # Example
//!
//! ```
//! let envelope = kern_kef::encrypt(b"wallet-1", 20, b"hunter2", 100_000, b"secret").unwrap();
//! assert!(kern_kef::is_envelope(&envelope));
//! let plain = kern_kef::decrypt(&envelope, b"hunter2").unwrap();
//! assert_eq!(&plain[..], b"secret");
//! ```

pub mod auth;
pub mod cipher;
pub mod decrypt;
pub mod encrypt;
pub mod envelope;
pub mod error;
pub mod kdf;
pub mod pad;
pub mod version;

pub use decrypt::decrypt;
pub use encrypt::{encrypt, encrypt_with_rng};
pub use envelope::{is_envelope, EnvelopeHeader, MAX_ID_LEN, MIN_HEADER};
pub use error::{KefError, KefResult};
pub use kdf::{derive_key, DerivedKey, KEY_SIZE};
pub use version::{
    decode_iterations, encode_iterations, find_version, AuthKind, Mode, Padding, VersionInfo,
    VERSIONS,
};
