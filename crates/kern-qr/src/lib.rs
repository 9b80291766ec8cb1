//! kern-qr: chunked QR transport for the kern signing device.
//!
//! Large payloads (signed PSBTs, descriptors, encrypted envelopes) do not
//! fit a single scannable QR code. This crate fragments them into short
//! ASCII strings and reassembles scans arriving in any order:
//!
//! - **BBQr** — the 8-character `B$..` header scheme with hex, base32, and
//!   deflated-base32 payloads ([`bbqr`], [`assemble`]).
//! - **base32 / base43** — the transport alphabets ([`base32`], [`base43`]).
//! - **UR** — `ur:type/seq-total/...` string parsing for coordinators that
//!   speak Uniform Resources ([`ur`]).
//! - **Mnemonic QR detection** — SeedQR, Compact SeedQR, and plaintext
//!   classification plus conversions ([`detect`]).
//!
//! Decoding is purely functional: a [`assemble::PartCollector`] owns the
//! only state, and it is per-transfer.

pub mod assemble;
pub mod base32;
pub mod base43;
pub mod bbqr;
pub mod detect;
pub mod error;
pub mod ur;

pub use assemble::PartCollector;
pub use bbqr::{decode_payload, encode, EncodedParts, Encoding, FileType, Part};
pub use detect::{detect_format, qr_to_mnemonic, MnemonicQrFormat};
pub use error::{QrError, QrResult};
pub use ur::{is_ur_type, parse_sequence_component, parse_ur_string, UrString};
