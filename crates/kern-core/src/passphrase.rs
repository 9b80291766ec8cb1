//! Passphrase handling for the host UI.

use secrecy::{ExposeSecret, SecretString};

/// A user passphrase held by the host between entry and key derivation.
///
/// Wraps [`SecretString`], so the content is zeroized on drop and never
/// appears in Debug output.
#[derive(Debug)]
pub struct Passphrase(SecretString);

impl Passphrase {
    pub fn new(s: impl Into<String>) -> Self {
        Self(SecretString::from(s.into()))
    }

    /// Borrow the raw bytes for key derivation.
    pub fn expose_bytes(&self) -> &[u8] {
        self.0.expose_secret().as_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }
}
