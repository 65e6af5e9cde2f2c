//! Printable-ASCII password record generation.
//!
//! Generates a CSPRNG-backed buffer for a single vault record: the first
//! `length` bytes are mapped into a fixed printable-ASCII alphabet, and the
//! remainder up to the next 16-byte boundary is NUL-padded so the buffer can
//! be handed directly to [`crate::symmetric::encrypt_group`].
//!
//! The byte-to-alphabet mapping (`b mod 0x5E + 0x20`) is not rejection
//! sampling and is therefore slightly biased toward the low end of the
//! alphabet. This is a deliberate, preserved trade-off: rejection sampling
//! would change which passwords are generated from the same CSPRNG stream,
//! which is acceptable for compatibility but not required by anything else
//! in this format, so the simpler biased mapping is kept rather than
//! "fixed."

use crate::error::CryptoError;
use rand::rngs::OsRng;
use rand::RngCore;

/// Maximum password length this generator will produce, in characters.
pub const MAX_LENGTH: usize = 10_000;

/// Low end of the generated alphabet (space).
const ALPHABET_LOW: u8 = 0x20;

/// Width of the generated alphabet. `0x7E - 0x20 = 0x5E`; the alphabet
/// therefore covers `0x20..=0x7D` (space through `}`), not including `~`.
const ALPHABET_WIDTH: u8 = 0x7E - 0x20;

/// A generated record: the full block-aligned buffer (password bytes
/// followed by NUL padding) plus the block length.
#[derive(Debug)]
pub struct GeneratedRecord {
    /// `block_len` bytes: the first `length` bytes are the printable-ASCII
    /// password, the rest are NUL.
    pub buffer: Vec<u8>,
    /// Length of `buffer`, always a multiple of 16 and `>= length + 1`.
    pub block_len: usize,
}

/// Generate a printable-ASCII password record of `length` characters.
///
/// # Errors
///
/// Returns `CryptoError::PasswordGeneration` if `length` is 0, exceeds
/// [`MAX_LENGTH`], or the CSPRNG fails.
pub fn generate_record(length: usize) -> Result<GeneratedRecord, CryptoError> {
    if length == 0 || length > MAX_LENGTH {
        return Err(CryptoError::PasswordGeneration(format!(
            "password length {length} out of range (1..={MAX_LENGTH})"
        )));
    }

    // block_len = ceil((length + 1) / 16) * 16
    let block_len = length
        .checked_add(1)
        .and_then(|n| n.checked_add(15))
        .map(|n| (n / 16).saturating_mul(16))
        .ok_or_else(|| CryptoError::PasswordGeneration("block length overflow".into()))?;

    let mut buffer = vec![0u8; block_len];
    OsRng
        .try_fill_bytes(&mut buffer)
        .map_err(|e| CryptoError::PasswordGeneration(format!("CSPRNG fill failed: {e}")))?;

    for byte in &mut buffer[..length] {
        *byte = (*byte % ALPHABET_WIDTH).wrapping_add(ALPHABET_LOW);
    }
    for byte in &mut buffer[length..] {
        *byte = 0;
    }

    Ok(GeneratedRecord { buffer, block_len })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_len_for_length_one_is_16() {
        let record = generate_record(1).expect("generate should succeed");
        assert_eq!(record.block_len, 16);
        assert_eq!(record.buffer.len(), 16);
    }

    #[test]
    fn block_len_for_length_15_is_16() {
        let record = generate_record(15).expect("generate should succeed");
        assert_eq!(record.block_len, 16);
    }

    #[test]
    fn block_len_for_length_16_is_32() {
        // The mandatory NUL terminator forces the next block.
        let record = generate_record(16).expect("generate should succeed");
        assert_eq!(record.block_len, 32);
    }

    #[test]
    fn generated_bytes_are_in_printable_alphabet() {
        let record = generate_record(500).expect("generate should succeed");
        for &b in &record.buffer[..500] {
            assert!((0x20..=0x7D).contains(&b), "byte {b:#x} out of alphabet");
        }
    }

    #[test]
    fn generated_bytes_never_include_tilde() {
        // Run enough iterations that a bug including 0x7E would show up.
        for _ in 0..200 {
            let record = generate_record(64).expect("generate should succeed");
            assert!(!record.buffer[..64].contains(&0x7E));
        }
    }

    #[test]
    fn padding_region_is_all_nul() {
        let record = generate_record(10).expect("generate should succeed");
        assert!(record.buffer[10..].iter().all(|&b| b == 0));
    }

    #[test]
    fn two_generations_are_different() {
        let a = generate_record(32).expect("generate should succeed");
        let b = generate_record(32).expect("generate should succeed");
        assert_ne!(a.buffer, b.buffer);
    }

    #[test]
    fn rejects_zero_length() {
        let err = generate_record(0).expect_err("zero length should be rejected");
        assert!(format!("{err}").contains("out of range"));
    }

    #[test]
    fn rejects_length_over_max() {
        let err = generate_record(MAX_LENGTH + 1).expect_err("over-max length should be rejected");
        assert!(format!("{err}").contains("out of range"));
    }

    #[test]
    fn accepts_max_length() {
        let record = generate_record(MAX_LENGTH).expect("generate should succeed");
        assert_eq!(record.block_len % 16, 0);
        assert!(record.block_len >= MAX_LENGTH + 1);
    }
}
