//! Demonstrates deriving a schedule and round-tripping two blocks.

use camellia_core::{decrypt_blocks, derive_schedule, encrypt_blocks};

fn main() {
    let key = [0u8; 16];
    let schedule = derive_schedule(&key).expect("16 bytes is a valid key length");

    let mut plaintext = [0u8; 32];
    plaintext[..16].copy_from_slice(b"first block here");
    plaintext[16..].copy_from_slice(b"second blockhere");

    let mut ciphertext = [0u8; 32];
    encrypt_blocks(&schedule, &plaintext, &mut ciphertext, 2);

    let mut recovered = [0u8; 32];
    decrypt_blocks(&schedule, &ciphertext, &mut recovered, 2);
    assert_eq!(recovered, plaintext);

    println!("example succeeded; decryption recovered the plaintext");
}
