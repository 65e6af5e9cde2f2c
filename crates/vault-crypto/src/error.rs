//! Cryptographic error types for `vault-crypto`.

use thiserror::Error;

/// Errors produced by cryptographic operations.
///
/// Every variant is deliberately coarse: callers never learn which
/// primitive step failed, only that a cryptographic operation could
/// not be completed. Internal diagnostic detail is carried for local
/// debugging but higher layers must not surface it verbatim to users.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Key derivation (scrypt) failed, or was called with invalid parameters.
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// Block-cipher encryption failed or was given misaligned input.
    #[error("encryption error: {0}")]
    Encryption(String),

    /// Block-cipher decryption failed or was given misaligned input.
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// Secure memory allocation failure (mlock, CSPRNG draw).
    #[error("secure memory error: {0}")]
    SecureMemory(String),

    /// Password/passphrase generation failure (invalid parameters, CSPRNG unavailable).
    #[error("password generation error: {0}")]
    PasswordGeneration(String),
}
