//! Envelope persistence contract.
//!
//! The device stores `.kef` envelopes on internal flash and, optionally, a
//! removable card. Those backends live with the host firmware; the core
//! only needs these five operations plus a deterministic way to turn an
//! envelope ID into a storage key.

use sha2::{Digest, Sha256};

/// Longest sanitized ID kept for a storage key.
pub const MAX_SANITIZED_ID_LEN: usize = 40;

/// Key-value persistence for envelopes.
pub trait KvStore {
    type Error;

    /// Read a value; `Ok(None)` when the key does not exist.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error>;
    fn write(&mut self, key: &str, value: &[u8]) -> Result<(), Self::Error>;
    fn list(&self) -> Result<Vec<String>, Self::Error>;
    fn delete(&mut self, key: &str) -> Result<(), Self::Error>;
    /// Remove every stored value.
    fn wipe(&mut self) -> Result<(), Self::Error>;
}

/// Turn a user-chosen envelope ID into a filesystem-safe key: unsafe
/// characters collapse to single underscores, edge underscores and dots
/// are trimmed, and an ID with nothing left falls back to a hash prefix.
pub fn sanitize_id(raw_id: &str) -> String {
    let trimmed = raw_id.trim_start_matches([' ', '\t', '.']);

    let mut out = String::new();
    let mut last_underscore = false;

    for c in trimmed.chars() {
        if out.len() >= MAX_SANITIZED_ID_LEN {
            break;
        }
        match c {
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | ' ' => {
                if !last_underscore {
                    out.push('_');
                    last_underscore = true;
                }
            }
            _ => {
                out.push(c);
                last_underscore = false;
            }
        }
    }

    while out.ends_with(['_', '.']) {
        out.pop();
    }

    if out.is_empty() {
        let digest = Sha256::digest(raw_id.as_bytes());
        for b in &digest[..4] {
            out.push_str(&format!("{b:02X}"));
        }
    }

    out
}

/// In-memory store for tests and the simulator.
#[derive(Debug, Default, Clone)]
pub struct MemoryKvStore {
    entries: std::collections::BTreeMap<String, Vec<u8>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    type Error = std::convert::Infallible;

    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.entries.keys().cloned().collect())
    }

    fn delete(&mut self, key: &str) -> Result<(), Self::Error> {
        self.entries.remove(key);
        Ok(())
    }

    fn wipe(&mut self) -> Result<(), Self::Error> {
        self.entries.clear();
        Ok(())
    }
}
