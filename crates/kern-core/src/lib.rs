//! kern-core: contracts shared between the cryptographic core and its host.
//!
//! The crypto crates (`kern-kef`, `kern-qr`, `kern-flate`) are pure over
//! caller-provided buffers. Everything platform-shaped lives behind the
//! seams defined here: where envelopes persist ([`kv::KvStore`]), how the
//! host holds passwords ([`passphrase::Passphrase`]), and which tunables it
//! exposes ([`config::DeviceConfig`]).

pub mod config;
pub mod kv;
pub mod passphrase;

pub use config::{DeviceConfig, KefConfig, TransferConfig};
pub use kv::{sanitize_id, KvStore, MemoryKvStore};
pub use passphrase::Passphrase;
