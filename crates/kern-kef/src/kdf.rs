//! Key derivation: PBKDF2-HMAC-SHA256 password + envelope ID → AES-256 key.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroize;

/// AES-256 key size in bytes.
pub const KEY_SIZE: usize = 32;

/// A 256-bit key derived from a password and envelope ID.
///
/// Zeroized on drop to prevent secrets lingering in memory.
#[derive(Clone)]
pub struct DerivedKey {
    bytes: [u8; KEY_SIZE],
}

impl DerivedKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Derive the AES-256 key for an envelope.
///
/// The envelope ID doubles as the PBKDF2 salt, so the same password yields
/// a different key for every stored secret.
pub fn derive_key(password: &[u8], id: &[u8], iterations: u32) -> DerivedKey {
    let mut bytes = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha256>(password, id, iterations, &mut bytes);
    DerivedKey::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kdf_deterministic() {
        let k1 = derive_key(b"password", b"salt-id", 1000);
        let k2 = derive_key(b"password", b"salt-id", 1000);
        assert_eq!(k1.as_bytes(), k2.as_bytes(), "KDF must be deterministic");
    }

    #[test]
    fn test_kdf_known_vector() {
        // RFC 6070-style vector for PBKDF2-HMAC-SHA256:
        // P="password", S="salt", c=1, dkLen=32
        let key = derive_key(b"password", b"salt", 1);
        assert_eq!(
            key.as_bytes()[..8],
            [0x12, 0x0f, 0xb6, 0xcf, 0xfc, 0xf8, 0xb3, 0x2c]
        );
    }

    #[test]
    fn test_kdf_different_ids() {
        let k1 = derive_key(b"password", b"id-a", 1000);
        let k2 = derive_key(b"password", b"id-b", 1000);
        assert_ne!(
            k1.as_bytes(),
            k2.as_bytes(),
            "different IDs must produce different keys"
        );
    }

    #[test]
    fn test_kdf_different_iterations() {
        let k1 = derive_key(b"password", b"id", 1000);
        let k2 = derive_key(b"password", b"id", 1001);
        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn test_debug_redacts_key() {
        let key = derive_key(b"password", b"id", 1);
        let rendered = format!("{key:?}");
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("12"));
    }
}
