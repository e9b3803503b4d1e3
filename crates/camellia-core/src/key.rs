//! Key schedule storage and the cipher error taxonomy.

use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Key lengths in bytes accepted by schedule derivation.
pub const KEY_LENGTHS: [usize; 3] = [16, 24, 32];

/// Errors reported by the cipher core.
///
/// Both conditions abort the requested operation before any output bytes are
/// written; neither is recoverable by retrying with the same arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CipherError {
    /// Schedule derivation was given a key outside the accepted lengths.
    InvalidKeyLength,
    /// A transform was attempted before a key schedule was established.
    KeyNotSet,
}

impl fmt::Display for CipherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherError::InvalidKeyLength => {
                write!(f, "key must be 16, 24, or 32 bytes")
            }
            CipherError::KeyNotSet => write!(f, "no key schedule has been set"),
        }
    }
}

impl std::error::Error for CipherError {}

/// Expanded subkey sequence derived once from a raw key.
///
/// Holds 26 subkey words for 16-byte keys and 34 for 24- and 32-byte keys.
/// The storage is overwritten with zeros when the schedule is cleared or
/// dropped, so expanded key material does not linger in freed memory.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeySchedule {
    subkeys: Vec<u64>,
    key_len: usize,
}

impl KeySchedule {
    pub(crate) fn from_parts(subkeys: Vec<u64>, key_len: usize) -> Self {
        Self { subkeys, key_len }
    }

    /// The ordered subkey words consumed by the block transforms.
    #[inline]
    pub fn subkeys(&self) -> &[u64] {
        &self.subkeys
    }

    /// Round count for this schedule, a pure function of the key length:
    /// 9 for 16-byte keys, 12 otherwise.
    #[inline]
    pub fn rounds(&self) -> usize {
        if self.key_len == 16 {
            9
        } else {
            12
        }
    }

    /// Length in bytes of the key this schedule was derived from.
    #[inline]
    pub fn key_length(&self) -> usize {
        self.key_len
    }

    /// Zero-overwrites the subkey storage in place. Idempotent; a cleared
    /// schedule holds no subkeys.
    pub fn clear(&mut self) {
        self.subkeys.zeroize();
        self.key_len = 0;
    }

    /// True once [`KeySchedule::clear`] has run.
    #[inline]
    pub fn is_cleared(&self) -> bool {
        self.subkeys.is_empty()
    }
}

impl fmt::Debug for KeySchedule {
    // Subkeys are secret; never print them.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeySchedule")
            .field("subkeys", &self.subkeys.len())
            .field("key_len", &self.key_len)
            .finish()
    }
}
