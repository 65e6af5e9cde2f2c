//! CSPRNG draw used for salt, IV, and raw password bytes.

use crate::error::CryptoError;
use rand::rngs::OsRng;
use rand::RngCore;

/// Fill `buf` with cryptographically strong random bytes.
///
/// # Errors
///
/// Returns `CryptoError::SecureMemory` if the OS CSPRNG is unavailable.
pub fn randomize(buf: &mut [u8]) -> Result<(), CryptoError> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| CryptoError::SecureMemory(format!("CSPRNG fill failed: {e}")))
}
