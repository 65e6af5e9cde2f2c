//! scrypt key derivation.
//!
//! The vault format fixes a single scrypt parameter tuple for every vault:
//! `N = 2^18`, `r = 8`, `p = 1`, output length 32 bytes. There is no tiered
//! preset system and no runtime calibration — create and open must use the
//! exact same tuple or the derived key (and therefore the whole vault) is
//! unrecoverable.

use crate::error::CryptoError;
use crate::memory::SecretBuffer;
use zeroize::Zeroize;

/// Output length of the KDF in bytes (256 bits).
const OUTPUT_LEN: usize = 32;

/// `log2(N)` cost parameter. `N = 2^18 = 262144`.
const LOG_N: u8 = 18;

/// Memory cost factor `r`. 8 is the conventional scrypt default for this `N`.
const R: u32 = 8;

/// Parallelization factor `p`. Fixed at 1 by the vault format.
const P: u32 = 1;

/// Minimum salt length in bytes accepted by this module.
///
/// The vault format always supplies a 32-byte salt; this floor exists to
/// reject obviously-wrong callers (e.g. a truncated or corrupt vault file)
/// before handing bytes to the scrypt implementation.
const MIN_SALT_LEN: usize = 16;

/// scrypt cost parameters. Exists so the fixed tuple is documented in one
/// place and can be asserted against in tests; the vault format does not
/// allow choosing a different tuple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KdfParams {
    /// `log2(N)`.
    pub log_n: u8,
    /// Memory cost factor.
    pub r: u32,
    /// Parallelization factor.
    pub p: u32,
}

impl KdfParams {
    /// The single parameter tuple the vault format uses: `N = 2^18, r = 8, p = 1`.
    pub const VAULT: Self = Self {
        log_n: LOG_N,
        r: R,
        p: P,
    };
}

/// Derive a 256-bit key from a passphrase and salt using scrypt.
///
/// Always uses [`KdfParams::VAULT`]. Returns a [`SecretBuffer`] holding
/// 32 bytes; the intermediate stack buffer is zeroized after copying.
///
/// Accepts a passphrase of any length, including empty — the 32-byte UI
/// ceiling described in the external interface is enforced by the CLI
/// driver, not here.
///
/// # Errors
///
/// Returns `CryptoError::KeyDerivation` if the salt is shorter than 16
/// bytes, or if the underlying scrypt computation fails.
pub fn derive(password: &[u8], salt: &[u8]) -> Result<SecretBuffer, CryptoError> {
    if salt.len() < MIN_SALT_LEN {
        return Err(CryptoError::KeyDerivation(format!(
            "salt too short: {} bytes (minimum {MIN_SALT_LEN})",
            salt.len()
        )));
    }

    let params = scrypt::Params::new(KdfParams::VAULT.log_n, KdfParams::VAULT.r, KdfParams::VAULT.p, OUTPUT_LEN)
        .map_err(|e| CryptoError::KeyDerivation(format!("invalid scrypt params: {e}")))?;

    let mut output = [0u8; OUTPUT_LEN];
    scrypt::scrypt(password, salt, &params, &mut output)
        .map_err(|e| CryptoError::KeyDerivation(format!("scrypt derivation failed: {e}")))?;

    let result = SecretBuffer::new(&output)
        .map_err(|e| CryptoError::KeyDerivation(format!("secure buffer allocation failed: {e}")))?;
    output.zeroize();
    Ok(result)
}
