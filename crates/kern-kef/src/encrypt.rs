//! Envelope encryption.

use rand::{rngs::OsRng, CryptoRng, RngCore};
use tracing::debug;
use zeroize::Zeroizing;

use kern_flate::{deflate_raw_with_wbits, DEFAULT_WBITS};

use crate::auth;
use crate::cipher::{self, BLOCK_SIZE};
use crate::envelope::MAX_ID_LEN;
use crate::error::{KefError, KefResult};
use crate::kdf::derive_key;
use crate::version::{encode_iterations, find_version, AuthKind, Mode};

/// True if any two 16-byte blocks are bytewise identical. Equal plaintext
/// blocks produce equal ECB ciphertext blocks, so such payloads are
/// refused rather than leaked.
fn has_duplicate_blocks(data: &[u8]) -> bool {
    let blocks: Vec<&[u8]> = data.chunks_exact(BLOCK_SIZE).collect();
    for i in 0..blocks.len() {
        for j in i + 1..blocks.len() {
            if blocks[i] == blocks[j] {
                return true;
            }
        }
    }
    false
}

/// Encrypt `plaintext` into a KEF envelope using the platform CSPRNG for
/// the IV.
pub fn encrypt(
    id: &[u8],
    version: u8,
    password: &[u8],
    iterations: u32,
    plaintext: &[u8],
) -> KefResult<Vec<u8>> {
    encrypt_with_rng(id, version, password, iterations, plaintext, &mut OsRng)
}

/// Encrypt with an injected RNG (hardware entropy source, test fixture).
///
/// The envelope stores the iteration count in its 3-byte encoded form; the
/// key is derived with the count that decoding will recover, so every
/// envelope this produces is decryptable. Counts below 10000 are not
/// representable and are normalized upward by the encoding.
pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
    id: &[u8],
    version: u8,
    password: &[u8],
    iterations: u32,
    plaintext: &[u8],
    rng: &mut R,
) -> KefResult<Vec<u8>> {
    if id.is_empty() || id.len() > MAX_ID_LEN || password.is_empty() || plaintext.is_empty() {
        return Err(KefError::InvalidArg);
    }
    if iterations == 0 {
        return Err(KefError::InvalidArg);
    }
    let vi = find_version(version).ok_or(KefError::UnsupportedVersion(version))?;

    debug!(version, plaintext_len = plaintext.len(), "sealing envelope");

    let stored_iterations = encode_iterations(iterations);
    let effective = crate::version::decode_iterations(stored_iterations);
    let key = derive_key(password, id, effective);

    let mut iv = [0u8; 16];
    if vi.iv_size > 0 {
        rng.fill_bytes(&mut iv[..vi.iv_size]);
    }
    let iv = &iv[..vi.iv_size];

    // Working data: compressed if the version says so, otherwise a copy.
    let work: Zeroizing<Vec<u8>> = if vi.compress {
        Zeroizing::new(deflate_raw_with_wbits(plaintext, DEFAULT_WBITS))
    } else {
        Zeroizing::new(plaintext.to_vec())
    };

    // Hidden auth rides inside the padded region.
    let mut pre_pad = Zeroizing::new(Vec::with_capacity(work.len() + vi.auth_size));
    pre_pad.extend_from_slice(&work);
    if vi.auth_kind == AuthKind::Hidden {
        let digest = auth::hidden_auth(&work);
        pre_pad.extend_from_slice(&digest[..vi.auth_size]);
    }

    let padded = crate::pad::apply(vi.padding, &pre_pad);

    if vi.mode == Mode::Ecb && has_duplicate_blocks(&padded) {
        return Err(KefError::DuplicateBlocks);
    }

    let header_len = 1 + id.len() + 1 + 3;
    let mut envelope =
        Vec::with_capacity(header_len + vi.iv_size + padded.len() + vi.auth_size);
    envelope.push(id.len() as u8);
    envelope.extend_from_slice(id);
    envelope.push(version);
    envelope.extend_from_slice(&stored_iterations);
    envelope.extend_from_slice(iv);

    match vi.mode {
        Mode::Ecb => envelope.extend_from_slice(&cipher::ecb_encrypt(&key, &padded)?),
        Mode::Cbc => envelope.extend_from_slice(&cipher::cbc_encrypt(&key, iv, &padded)?),
        Mode::Ctr => {
            let mut body = padded.to_vec();
            cipher::ctr_apply(&key, iv, &mut body);
            envelope.extend_from_slice(&body);
        }
        Mode::Gcm => {
            let mut body = padded.to_vec();
            let tag = cipher::gcm_encrypt(&key, iv, &mut body)?;
            envelope.extend_from_slice(&body);
            envelope.extend_from_slice(&tag[..vi.auth_size]);
        }
    }

    if vi.auth_kind == AuthKind::Exposed {
        let digest = auth::exposed_auth(version, iv, &work, &key);
        envelope.extend_from_slice(&digest[..vi.auth_size]);
    }

    Ok(envelope)
}
