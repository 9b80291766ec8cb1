//! Envelope decryption.

use tracing::debug;
use zeroize::Zeroizing;

use kern_flate::inflate_raw;

use crate::cipher::{self, BLOCK_SIZE};
use crate::envelope::EnvelopeHeader;
use crate::error::{KefError, KefResult};
use crate::kdf::derive_key;
use crate::pad;
use crate::version::{find_version, AuthKind, Mode, Padding};

/// Decrypt a KEF envelope. The returned plaintext zeroizes on drop.
pub fn decrypt(envelope: &[u8], password: &[u8]) -> KefResult<Zeroizing<Vec<u8>>> {
    if envelope.is_empty() || password.is_empty() {
        return Err(KefError::InvalidArg);
    }

    let header = EnvelopeHeader::parse(envelope)?;
    let vi = find_version(header.version).ok_or(KefError::UnsupportedVersion(header.version))?;

    let iv_start = header.header_len();
    if iv_start + vi.iv_size > envelope.len() {
        return Err(KefError::EnvelopeTooShort);
    }
    let iv = &envelope[iv_start..iv_start + vi.iv_size];

    let data_start = iv_start + vi.iv_size;
    let mut data_end = envelope.len();

    let trailer = if vi.has_trailer() {
        if data_end < data_start + vi.auth_size {
            return Err(KefError::EnvelopeTooShort);
        }
        data_end -= vi.auth_size;
        &envelope[data_end..]
    } else {
        &[][..]
    };

    let ciphertext = &envelope[data_start..data_end];
    if ciphertext.is_empty() {
        return Err(KefError::EnvelopeTooShort);
    }
    if matches!(vi.mode, Mode::Ecb | Mode::Cbc) && ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(KefError::EnvelopeTooShort);
    }

    debug!(
        version = header.version,
        ciphertext_len = ciphertext.len(),
        "opening envelope"
    );

    let key = derive_key(password, header.id, header.iterations);

    let decrypted: Zeroizing<Vec<u8>> = match vi.mode {
        Mode::Gcm => cipher::gcm_decrypt(&key, iv, ciphertext, trailer)?,
        Mode::Ctr => {
            let mut buf = Zeroizing::new(ciphertext.to_vec());
            cipher::ctr_apply(&key, iv, &mut buf);
            buf
        }
        Mode::Ecb => Zeroizing::new(cipher::ecb_decrypt(&key, ciphertext)?),
        Mode::Cbc => Zeroizing::new(cipher::cbc_decrypt(&key, iv, ciphertext)?),
    };

    // Unpad and verify. GCM was authenticated during decryption.
    let plain_len = if vi.auth_kind == AuthKind::Gcm {
        decrypted.len()
    } else {
        match vi.padding {
            Padding::NulZero => match vi.auth_kind {
                AuthKind::Hidden => pad::nul_recover_hidden(&decrypted, vi.auth_size)?,
                _ => pad::nul_recover_exposed(&decrypted, header.version, iv, &key, trailer)?,
            },
            Padding::Pkcs7 => {
                let unpadded = pad::pkcs7_unpad(&decrypted).ok_or(KefError::Auth)?;
                if unpadded < vi.auth_size {
                    return Err(KefError::Auth);
                }
                let data_len = unpadded - vi.auth_size;
                let digest = crate::auth::hidden_auth(&decrypted[..data_len]);
                if !crate::auth::auth_eq(&digest[..vi.auth_size], &decrypted[data_len..unpadded]) {
                    return Err(KefError::Auth);
                }
                data_len
            }
            Padding::None => {
                if decrypted.len() < vi.auth_size {
                    return Err(KefError::Auth);
                }
                let data_len = decrypted.len() - vi.auth_size;
                let digest = crate::auth::hidden_auth(&decrypted[..data_len]);
                if !crate::auth::auth_eq(&digest[..vi.auth_size], &decrypted[data_len..]) {
                    return Err(KefError::Auth);
                }
                data_len
            }
        }
    };

    if vi.compress {
        let inflated = inflate_raw(&decrypted[..plain_len]).map_err(|_| KefError::Decompress)?;
        Ok(Zeroizing::new(inflated))
    } else {
        Ok(Zeroizing::new(decrypted[..plain_len].to_vec()))
    }
}
