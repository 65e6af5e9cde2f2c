//! `vault-crypto` — pure cryptographic primitives for the password vault engine.
//!
//! Zero network, zero async dependencies. Exposes scrypt key derivation,
//! AES-256-CBC block encryption with explicit IV re-seeding, a CSPRNG-backed
//! printable-ASCII record generator, and zeroizing secret-memory wrappers.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod memory;

pub mod kdf;
pub mod password;
pub mod rng;
pub mod symmetric;

pub use error::CryptoError;
pub use kdf::{derive, KdfParams};
pub use memory::{disable_core_dumps, LockedRegion, SecretBuffer, SecretBytes};
pub use password::generate_record;
pub use rng::randomize;
pub use symmetric::{decrypt_group, encrypt_group};
