//! Hidden and exposed authentication trailers.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::kdf::DerivedKey;

/// SHA-256 of the (possibly compressed) data; the first `auth_size` bytes
/// are appended inside the padded region and encrypted with it.
pub fn hidden_auth(data: &[u8]) -> Zeroizing<[u8; 32]> {
    Zeroizing::new(Sha256::digest(data).into())
}

/// SHA-256 over version ‖ IV ‖ data ‖ key; the first `auth_size` bytes
/// trail the ciphertext in cleartext. Binding the derived key keeps the
/// trailer unforgeable without the password.
pub fn exposed_auth(version: u8, iv: &[u8], data: &[u8], key: &DerivedKey) -> Zeroizing<[u8; 32]> {
    let mut hasher = Sha256::new();
    hasher.update([version]);
    hasher.update(iv);
    hasher.update(data);
    hasher.update(key.as_bytes());
    Zeroizing::new(hasher.finalize().into())
}

/// Constant-time equality for auth trailers.
pub fn auth_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && bool::from(a.ct_eq(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kdf::derive_key;

    #[test]
    fn test_hidden_auth_is_sha256() {
        let digest = hidden_auth(b"abc");
        // SHA-256("abc")
        assert_eq!(
            digest[..4],
            [0xba, 0x78, 0x16, 0xbf],
            "hidden auth must be plain SHA-256 of the data"
        );
    }

    #[test]
    fn test_exposed_auth_binds_every_input() {
        let key = derive_key(b"pw", b"id", 100);
        let base = exposed_auth(10, &[0u8; 16], b"data", &key);

        assert_ne!(*exposed_auth(11, &[0u8; 16], b"data", &key), *base);
        assert_ne!(*exposed_auth(10, &[1u8; 16], b"data", &key), *base);
        assert_ne!(*exposed_auth(10, &[0u8; 16], b"datb", &key), *base);

        let other_key = derive_key(b"pw2", b"id", 100);
        assert_ne!(*exposed_auth(10, &[0u8; 16], b"data", &other_key), *base);
    }

    #[test]
    fn test_exposed_auth_empty_iv() {
        // ECB versions have no IV; the formula simply omits it.
        let key = derive_key(b"pw", b"id", 100);
        let a = exposed_auth(5, &[], b"data", &key);
        let b = exposed_auth(5, &[], b"data", &key);
        assert_eq!(*a, *b);
    }

    #[test]
    fn test_auth_eq() {
        assert!(auth_eq(b"abcd", b"abcd"));
        assert!(!auth_eq(b"abcd", b"abce"));
        assert!(!auth_eq(b"abcd", b"abc"));
        assert!(auth_eq(b"", b""));
    }
}
