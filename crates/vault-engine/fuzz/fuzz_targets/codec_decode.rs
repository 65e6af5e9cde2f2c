//! Fuzz target for the vault file codec.
//!
//! Feeds arbitrary bytes as a vault file body to `codec::decode` with a
//! fixed key/IV — must never panic, regardless of input. This is the
//! untrusted-input boundary of the format: every length, overflow, and
//! truncation case is expected to surface as a `VaultError`, never a panic.
//!
//! # Usage
//!
//! ```sh
//! cd crates/vault-engine
//! cargo +nightly fuzz run codec_decode -- -max_len=65536
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use vault_engine::codec;

const KEY: [u8; 32] = [0x7A; 32];
const IV: [u8; 16] = [0x3C; 16];

fuzz_target!(|data: &[u8]| {
    let _ = codec::decode(data, &KEY, &IV);
});
