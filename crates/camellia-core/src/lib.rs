//! Camellia block cipher primitive.
//!
//! This crate implements the cipher core and nothing above it:
//! - Key-schedule derivation for 128-, 192-, and 256-bit keys.
//! - Raw encryption and decryption of contiguous 16-byte blocks.
//! - Guaranteed zero-overwrite of expanded key material on clear or drop.
//!
//! Cipher modes, padding, and algorithm lookup are the caller's concern; the
//! transforms here process independent blocks only. The round function uses
//! fixed table lookups with no data-dependent branches, but the crate makes
//! no further side-channel hardening claims.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod key;
mod round;
mod sbox;

pub use crate::block::{Block, BLOCK_SIZE};
pub use crate::cipher::{decrypt_blocks, derive_schedule, encrypt_blocks, Camellia};
pub use crate::key::{CipherError, KeySchedule, KEY_LENGTHS};
