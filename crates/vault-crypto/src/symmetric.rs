//! AES-256-CBC block encryption with explicit IV re-seeding.
//!
//! The vault format reuses a single 16-byte IV across the db header, every
//! record header, and every record payload — but each of those is its own
//! independent CBC chain, *re-seeded* to the original IV rather than
//! continuing the chain from the previous block group. [`encrypt_group`]
//! and [`decrypt_group`] each construct a fresh cipher instance from
//! `(key, iv)`, so calling either twice with the same IV always starts a
//! new chain; callers never hold cipher state across groups themselves.
//!
//! Every plaintext handed to this module is already a multiple of 16 bytes
//! (the db header, each 64-byte record header, and each record payload,
//! which the record generator pads to a block boundary), so no padding
//! scheme is applied — block-cipher padding would corrupt the fixed-size
//! on-disk layout.

use crate::error::CryptoError;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use cbc::cipher::block_padding::NoPadding;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;

/// AES block size / IV length in bytes.
pub const BLOCK_LEN: usize = 16;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Encrypt `plaintext` as one independent CBC group seeded from `iv`.
///
/// `plaintext.len()` must be a multiple of 16 bytes; the ciphertext is
/// returned at the same length.
///
/// # Errors
///
/// Returns `CryptoError::Encryption` if `key` is not 32 bytes, `iv` is not
/// 16 bytes, or `plaintext` is not block-aligned.
pub fn encrypt_group(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if key.len() != KEY_LEN {
        return Err(CryptoError::Encryption(format!(
            "invalid key length: {} bytes (expected {KEY_LEN})",
            key.len()
        )));
    }
    if iv.len() != BLOCK_LEN {
        return Err(CryptoError::Encryption(format!(
            "invalid iv length: {} bytes (expected {BLOCK_LEN})",
            iv.len()
        )));
    }
    if plaintext.len() % BLOCK_LEN != 0 {
        return Err(CryptoError::Encryption(format!(
            "plaintext length {} is not a multiple of {BLOCK_LEN}",
            plaintext.len()
        )));
    }

    let cipher = Aes256CbcEnc::new_from_slices(key, iv)
        .map_err(|e| CryptoError::Encryption(format!("failed to initialize cipher: {e}")))?;

    Ok(cipher.encrypt_padded_vec_mut::<NoPadding>(plaintext))
}

/// Decrypt `ciphertext` as one independent CBC group seeded from `iv`.
///
/// `ciphertext.len()` must be a multiple of 16 bytes; the plaintext is
/// returned at the same length.
///
/// # Errors
///
/// Returns `CryptoError::Decryption` if `key` is not 32 bytes, `iv` is not
/// 16 bytes, or `ciphertext` is not block-aligned.
pub fn decrypt_group(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if key.len() != KEY_LEN {
        return Err(CryptoError::Decryption(format!(
            "invalid key length: {} bytes (expected {KEY_LEN})",
            key.len()
        )));
    }
    if iv.len() != BLOCK_LEN {
        return Err(CryptoError::Decryption(format!(
            "invalid iv length: {} bytes (expected {BLOCK_LEN})",
            iv.len()
        )));
    }
    if ciphertext.len() % BLOCK_LEN != 0 {
        return Err(CryptoError::Decryption(format!(
            "ciphertext length {} is not a multiple of {BLOCK_LEN}",
            ciphertext.len()
        )));
    }

    let cipher = Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|e| CryptoError::Decryption(format!("failed to initialize cipher: {e}")))?;

    cipher
        .decrypt_padded_vec_mut::<NoPadding>(ciphertext)
        .map_err(|e| CryptoError::Decryption(format!("block decryption failed: {e}")))
}
