//! Integration tests for AES-256-CBC block-group encrypt/decrypt at the
//! buffer sizes the vault codec actually produces.

use vault_crypto::symmetric::{decrypt_group, encrypt_group, BLOCK_LEN, KEY_LEN};

/// Integration key and IV.
const INT_KEY: [u8; KEY_LEN] = [0xDD; KEY_LEN];
const INT_IV: [u8; BLOCK_LEN] = [0x33; BLOCK_LEN];

#[test]
fn roundtrip_single_block_db_header() {
    let plaintext = vec![0x42u8; BLOCK_LEN];
    let ciphertext = encrypt_group(&INT_KEY, &INT_IV, &plaintext).expect("encrypt");
    assert_eq!(ciphertext.len(), BLOCK_LEN);
    let decrypted = decrypt_group(&INT_KEY, &INT_IV, &ciphertext).expect("decrypt");
    assert_eq!(decrypted, plaintext);
}

#[test]
fn roundtrip_four_block_record_header() {
    let plaintext = vec![0x55u8; 64];
    let ciphertext = encrypt_group(&INT_KEY, &INT_IV, &plaintext).expect("encrypt");
    assert_eq!(ciphertext.len(), 64);
    let decrypted = decrypt_group(&INT_KEY, &INT_IV, &ciphertext).expect("decrypt");
    assert_eq!(decrypted, plaintext);
}

#[test]
fn roundtrip_large_payload() {
    let plaintext = vec![0x77u8; 65_536];
    let ciphertext = encrypt_group(&INT_KEY, &INT_IV, &plaintext).expect("encrypt");
    let decrypted = decrypt_group(&INT_KEY, &INT_IV, &ciphertext).expect("decrypt");
    assert_eq!(decrypted, plaintext);
}

#[test]
fn independent_groups_with_same_key_and_iv_produce_identical_ciphertext_for_identical_plaintext() {
    let plaintext = vec![0x11u8; 128];
    let a = encrypt_group(&INT_KEY, &INT_IV, &plaintext).expect("encrypt");
    let b = encrypt_group(&INT_KEY, &INT_IV, &plaintext).expect("encrypt");
    assert_eq!(a, b, "each call must be an independent chain seeded from the same IV");
}
