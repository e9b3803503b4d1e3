//! Block representation helpers.

/// Camellia block of 16 bytes.
pub type Block = [u8; 16];

/// Number of bytes in one block.
pub const BLOCK_SIZE: usize = 16;

/// Loads a block as two big-endian 64-bit words, high half first.
#[inline]
pub fn load_be_pair(bytes: &[u8]) -> (u64, u64) {
    let hi = u64::from_be_bytes(bytes[0..8].try_into().expect("slice length is eight"));
    let lo = u64::from_be_bytes(bytes[8..16].try_into().expect("slice length is eight"));
    (hi, lo)
}

/// Stores two 64-bit words into a block as big-endian bytes, first word first.
#[inline]
pub fn store_be_pair(hi: u64, lo: u64, out: &mut [u8]) {
    out[0..8].copy_from_slice(&hi.to_be_bytes());
    out[8..16].copy_from_slice(&lo.to_be_bytes());
}
