#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Property-based tests for scrypt key derivation.
//!
//! The vault format's fixed cost parameters (`N = 2^18, r = 8`) make each
//! derivation expensive, so these proptests run a deliberately small number
//! of cases rather than proptest's default of 256.

use proptest::prelude::*;
use proptest::test_runner::Config;
use vault_crypto::kdf::derive;

proptest! {
    #![proptest_config(Config::with_cases(8))]

    /// Derived key is always exactly 32 bytes regardless of password/salt content.
    #[test]
    fn derive_always_32_bytes(
        password in proptest::collection::vec(any::<u8>(), 0..64),
        salt in proptest::collection::vec(any::<u8>(), 32..32),
    ) {
        let key = derive(&password, &salt)
            .expect("derive should succeed with valid inputs");
        prop_assert_eq!(key.len(), 32);
    }

    /// Derivation is a pure function of (password, salt): repeating it is stable.
    #[test]
    fn derive_is_deterministic(
        password in proptest::collection::vec(any::<u8>(), 0..32),
        salt in proptest::collection::vec(any::<u8>(), 32..32),
    ) {
        let a = derive(&password, &salt).expect("derive should succeed");
        let b = derive(&password, &salt).expect("derive should succeed");
        prop_assert_eq!(a.expose(), b.expose());
    }
}
