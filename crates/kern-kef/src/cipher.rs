//! AES-256 façade: ECB/CBC/CTR primitives plus GCM with truncated tags.
//!
//! The envelope format stores GCM tags truncated to the version's
//! `auth_size` (4 bytes for the registered rows). The `aes-gcm` AEAD API
//! only verifies 12..16-byte tags, so decryption is built from the detached
//! pieces: CTR-decrypt the body (SP 800-38D counter layout for 96-bit IVs),
//! recompute the full tag over the recovered plaintext, and compare the
//! stored prefix in constant time.

use aes::Aes256;
use aes_gcm::{AeadInPlace, Aes256Gcm, Nonce};
use cbc::cipher::{block_padding::NoPadding, BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit};
use ctr::cipher::StreamCipher;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::error::{KefError, KefResult};
use crate::kdf::DerivedKey;

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

type EcbEnc = ecb::Encryptor<Aes256>;
type EcbDec = ecb::Decryptor<Aes256>;
type CbcEnc = cbc::Encryptor<Aes256>;
type CbcDec = cbc::Decryptor<Aes256>;
type Ctr32 = ctr::Ctr32BE<Aes256>;

pub fn ecb_encrypt(key: &DerivedKey, data: &[u8]) -> KefResult<Vec<u8>> {
    let mut out = vec![0u8; data.len()];
    EcbEnc::new(key.as_bytes().into())
        .encrypt_padded_b2b_mut::<NoPadding>(data, &mut out)
        .map_err(|_| KefError::Crypto)?;
    Ok(out)
}

pub fn ecb_decrypt(key: &DerivedKey, data: &[u8]) -> KefResult<Vec<u8>> {
    let mut out = vec![0u8; data.len()];
    EcbDec::new(key.as_bytes().into())
        .decrypt_padded_b2b_mut::<NoPadding>(data, &mut out)
        .map_err(|_| KefError::Crypto)?;
    Ok(out)
}

pub fn cbc_encrypt(key: &DerivedKey, iv: &[u8], data: &[u8]) -> KefResult<Vec<u8>> {
    let mut out = vec![0u8; data.len()];
    CbcEnc::new_from_slices(key.as_bytes(), iv)
        .map_err(|_| KefError::Crypto)?
        .encrypt_padded_b2b_mut::<NoPadding>(data, &mut out)
        .map_err(|_| KefError::Crypto)?;
    Ok(out)
}

pub fn cbc_decrypt(key: &DerivedKey, iv: &[u8], data: &[u8]) -> KefResult<Vec<u8>> {
    let mut out = vec![0u8; data.len()];
    CbcDec::new_from_slices(key.as_bytes(), iv)
        .map_err(|_| KefError::Crypto)?
        .decrypt_padded_b2b_mut::<NoPadding>(data, &mut out)
        .map_err(|_| KefError::Crypto)?;
    Ok(out)
}

/// Build the 16-byte initial counter block from a short IV: the IV in the
/// high bytes, a 32-bit big-endian block counter in the low bytes.
fn counter_block(iv: &[u8], counter: u32) -> [u8; BLOCK_SIZE] {
    let mut block = [0u8; BLOCK_SIZE];
    block[..iv.len()].copy_from_slice(iv);
    block[BLOCK_SIZE - 4..].copy_from_slice(&counter.to_be_bytes());
    block
}

/// Apply the CTR keystream in place; encryption and decryption are the same
/// operation.
pub fn ctr_apply(key: &DerivedKey, iv: &[u8], buf: &mut [u8]) {
    let block = counter_block(iv, 0);
    let mut cipher = Ctr32::new(key.as_bytes().into(), (&block).into());
    cipher.apply_keystream(buf);
}

/// GCM-encrypt `buf` in place, returning the full 16-byte tag; the caller
/// stores a truncated prefix.
pub fn gcm_encrypt(key: &DerivedKey, iv: &[u8], buf: &mut [u8]) -> KefResult<[u8; 16]> {
    let cipher = Aes256Gcm::new(key.as_bytes().into());
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(iv), b"", buf)
        .map_err(|_| KefError::Crypto)?;
    Ok(tag.into())
}

/// GCM verify-and-decrypt against a truncated stored tag.
///
/// For a 96-bit IV, GCM's payload counters start at IV‖2 (IV‖1 is reserved
/// for the tag mask), so the body is plain AES-CTR from there. The full tag
/// is then recomputed by re-encrypting the recovered plaintext and its
/// prefix compared against the stored bytes.
pub fn gcm_decrypt(
    key: &DerivedKey,
    iv: &[u8],
    ciphertext: &[u8],
    stored_tag: &[u8],
) -> KefResult<Zeroizing<Vec<u8>>> {
    let mut plain = Zeroizing::new(ciphertext.to_vec());
    let block = counter_block(iv, 2);
    let mut body = Ctr32::new(key.as_bytes().into(), (&block).into());
    body.apply_keystream(&mut plain);

    let mut scratch = Zeroizing::new(plain.to_vec());
    let cipher = Aes256Gcm::new(key.as_bytes().into());
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(iv), b"", &mut scratch)
        .map_err(|_| KefError::Crypto)?;

    if stored_tag.is_empty() || stored_tag.len() > tag.len() {
        return Err(KefError::Auth);
    }
    if bool::from(tag[..stored_tag.len()].ct_eq(stored_tag)) {
        Ok(plain)
    } else {
        Err(KefError::Auth)
    }
}
