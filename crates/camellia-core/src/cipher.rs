//! Key-schedule derivation and the raw block transform driver.

use crate::block::{load_be_pair, store_be_pair, BLOCK_SIZE};
use crate::key::{CipherError, KeySchedule, KEY_LENGTHS};
use crate::round::{f, fl, fl_inv};

const SIGMA1: u64 = 0xa09e_667f_3bcc_908b;
const SIGMA2: u64 = 0xb67a_e858_4caa_73b2;
const SIGMA3: u64 = 0xc6ef_372f_e94f_82be;
const SIGMA4: u64 = 0x54ff_53a5_f1d3_6f1c;
const SIGMA5: u64 = 0x10e5_27fa_de68_2d1d;
const SIGMA6: u64 = 0xb056_88c2_b3e6_c1fd;

// High and low words of the 128-bit value (h || l) rotated left by `shift`.
// Shifts of 64 or more fold back into the 0..64 range, which swaps the roles
// of the two cross terms; all shifts used by the schedule land in 1..=63
// after the fold.
#[inline]
fn left_rot_hi(h: u64, l: u64, shift: u32) -> u64 {
    let s = if shift >= 64 { shift - 64 } else { shift };
    (h << s) | (l >> (64 - s))
}

#[inline]
fn left_rot_lo(h: u64, l: u64, shift: u32) -> u64 {
    let s = if shift >= 64 { shift - 64 } else { shift };
    (h >> (64 - s)) | (l << s)
}

/// Derives the subkey sequence for a 16-, 24-, or 32-byte key.
///
/// Any other length is rejected with [`CipherError::InvalidKeyLength`] and no
/// schedule is produced.
pub fn derive_schedule(key: &[u8]) -> Result<KeySchedule, CipherError> {
    if !KEY_LENGTHS.contains(&key.len()) {
        return Err(CipherError::InvalidKeyLength);
    }

    let word = |i: usize| {
        u64::from_be_bytes(key[8 * i..8 * i + 8].try_into().expect("slice length is eight"))
    };

    let kl_h = word(0);
    let kl_l = word(1);

    // 24-byte keys extend KR with the complement of its high word so the
    // 32-byte subkey layout below applies unchanged.
    let kr_h = if key.len() >= 24 { word(2) } else { 0 };
    let kr_l = match key.len() {
        32 => word(3),
        24 => !kr_h,
        _ => 0,
    };

    let mut d1 = kl_h ^ kr_h;
    let mut d2 = kl_l ^ kr_l;
    d2 ^= f(d1, SIGMA1);
    d1 ^= f(d2, SIGMA2);
    d1 ^= kl_h;
    d2 ^= kl_l;
    d2 ^= f(d1, SIGMA3);
    d1 ^= f(d2, SIGMA4);

    let ka_h = d1;
    let ka_l = d2;

    d1 = ka_h ^ kr_h;
    d2 = ka_l ^ kr_l;
    d2 ^= f(d1, SIGMA5);
    d1 ^= f(d2, SIGMA6);

    let kb_h = d1;
    let kb_l = d2;

    let subkeys = if key.len() == 16 {
        let mut sk = vec![0u64; 26];

        sk[0] = kl_h;
        sk[1] = kl_l;
        sk[2] = ka_h;
        sk[3] = ka_l;
        sk[4] = left_rot_hi(kl_h, kl_l, 15);
        sk[5] = left_rot_lo(kl_h, kl_l, 15);
        sk[6] = left_rot_hi(ka_h, ka_l, 15);
        sk[7] = left_rot_lo(ka_h, ka_l, 15);
        sk[8] = left_rot_hi(ka_h, ka_l, 30);
        sk[9] = left_rot_lo(ka_h, ka_l, 30);
        sk[10] = left_rot_hi(kl_h, kl_l, 45);
        sk[11] = left_rot_lo(kl_h, kl_l, 45);
        sk[12] = left_rot_hi(ka_h, ka_l, 45);
        sk[13] = left_rot_lo(kl_h, kl_l, 60);
        sk[14] = left_rot_hi(ka_h, ka_l, 60);
        sk[15] = left_rot_lo(ka_h, ka_l, 60);
        sk[16] = left_rot_lo(kl_h, kl_l, 77);
        sk[17] = left_rot_hi(kl_h, kl_l, 77);
        sk[18] = left_rot_lo(kl_h, kl_l, 94);
        sk[19] = left_rot_hi(kl_h, kl_l, 94);
        sk[20] = left_rot_lo(ka_h, ka_l, 94);
        sk[21] = left_rot_hi(ka_h, ka_l, 94);
        sk[22] = left_rot_lo(kl_h, kl_l, 111);
        sk[23] = left_rot_hi(kl_h, kl_l, 111);
        sk[24] = left_rot_lo(ka_h, ka_l, 111);
        sk[25] = left_rot_hi(ka_h, ka_l, 111);

        sk
    } else {
        let mut sk = vec![0u64; 34];

        sk[0] = kl_h;
        sk[1] = kl_l;
        sk[2] = kb_h;
        sk[3] = kb_l;
        sk[4] = left_rot_hi(kr_h, kr_l, 15);
        sk[5] = left_rot_lo(kr_h, kr_l, 15);
        sk[6] = left_rot_hi(ka_h, ka_l, 15);
        sk[7] = left_rot_lo(ka_h, ka_l, 15);
        sk[8] = left_rot_hi(kr_h, kr_l, 30);
        sk[9] = left_rot_lo(kr_h, kr_l, 30);
        sk[10] = left_rot_hi(kb_h, kb_l, 30);
        sk[11] = left_rot_lo(kb_h, kb_l, 30);
        sk[12] = left_rot_hi(kl_h, kl_l, 45);
        sk[13] = left_rot_lo(kl_h, kl_l, 45);
        sk[14] = left_rot_hi(ka_h, ka_l, 45);
        sk[15] = left_rot_lo(ka_h, ka_l, 45);
        sk[16] = left_rot_hi(kl_h, kl_l, 60);
        sk[17] = left_rot_lo(kl_h, kl_l, 60);
        sk[18] = left_rot_hi(kr_h, kr_l, 60);
        sk[19] = left_rot_lo(kr_h, kr_l, 60);
        sk[20] = left_rot_hi(kb_h, kb_l, 60);
        sk[21] = left_rot_lo(kb_h, kb_l, 60);
        sk[22] = left_rot_lo(kl_h, kl_l, 77);
        sk[23] = left_rot_hi(kl_h, kl_l, 77);
        sk[24] = left_rot_lo(ka_h, ka_l, 77);
        sk[25] = left_rot_hi(ka_h, ka_l, 77);
        sk[26] = left_rot_lo(kr_h, kr_l, 94);
        sk[27] = left_rot_hi(kr_h, kr_l, 94);
        sk[28] = left_rot_lo(ka_h, ka_l, 94);
        sk[29] = left_rot_hi(ka_h, ka_l, 94);
        sk[30] = left_rot_lo(kl_h, kl_l, 111);
        sk[31] = left_rot_hi(kl_h, kl_l, 111);
        sk[32] = left_rot_lo(kb_h, kb_l, 111);
        sk[33] = left_rot_hi(kb_h, kb_l, 111);

        sk
    };

    Ok(KeySchedule::from_parts(subkeys, key.len()))
}

/// Walks the subkey sequence forward (encrypt) or backward (decrypt).
struct SubkeyCursor<'a> {
    keys: &'a [u64],
    pos: usize,
    forward: bool,
}

impl<'a> SubkeyCursor<'a> {
    fn forward(keys: &'a [u64]) -> Self {
        Self {
            keys,
            pos: 0,
            forward: true,
        }
    }

    fn backward(keys: &'a [u64]) -> Self {
        Self {
            keys,
            pos: keys.len(),
            forward: false,
        }
    }

    #[inline]
    fn next(&mut self) -> u64 {
        if self.forward {
            let k = self.keys[self.pos];
            self.pos += 1;
            k
        } else {
            self.pos -= 1;
            self.keys[self.pos]
        }
    }
}

/// Encrypts `blocks` contiguous 16-byte blocks from `input` into `output`.
///
/// Blocks are independent; any chaining mode is the caller's concern. Both
/// slices must hold exactly `16 * blocks` bytes.
pub fn encrypt_blocks(schedule: &KeySchedule, input: &[u8], output: &mut [u8], blocks: usize) {
    assert_eq!(input.len(), BLOCK_SIZE * blocks);
    assert_eq!(output.len(), BLOCK_SIZE * blocks);

    let rounds = schedule.rounds();
    for i in 0..blocks {
        let (mut d1, mut d2) = load_be_pair(&input[BLOCK_SIZE * i..]);
        let mut k = SubkeyCursor::forward(schedule.subkeys());

        d1 ^= k.next();
        d2 ^= k.next();

        d2 ^= f(d1, k.next());
        d1 ^= f(d2, k.next());

        for r in 1..rounds - 1 {
            if r % 3 == 0 {
                d1 = fl(d1, k.next());
                d2 = fl_inv(d2, k.next());
            }

            d2 ^= f(d1, k.next());
            d1 ^= f(d2, k.next());
        }

        d2 ^= f(d1, k.next());
        d1 ^= f(d2, k.next());

        d2 ^= k.next();
        d1 ^= k.next();

        // The published transform stores the halves swapped.
        store_be_pair(d2, d1, &mut output[BLOCK_SIZE * i..]);
    }
}

/// Decrypts `blocks` contiguous 16-byte blocks from `input` into `output`.
///
/// Runs the identical subkey sequence in reverse, with the whitening halves
/// mirrored to undo [`encrypt_blocks`] exactly.
pub fn decrypt_blocks(schedule: &KeySchedule, input: &[u8], output: &mut [u8], blocks: usize) {
    assert_eq!(input.len(), BLOCK_SIZE * blocks);
    assert_eq!(output.len(), BLOCK_SIZE * blocks);

    let rounds = schedule.rounds();
    for i in 0..blocks {
        let (mut d1, mut d2) = load_be_pair(&input[BLOCK_SIZE * i..]);
        let mut k = SubkeyCursor::backward(schedule.subkeys());

        d2 ^= k.next();
        d1 ^= k.next();

        d2 ^= f(d1, k.next());
        d1 ^= f(d2, k.next());

        for r in 1..rounds - 1 {
            if r % 3 == 0 {
                d1 = fl(d1, k.next());
                d2 = fl_inv(d2, k.next());
            }

            d2 ^= f(d1, k.next());
            d1 ^= f(d2, k.next());
        }

        d2 ^= f(d1, k.next());
        d1 ^= f(d2, k.next());

        d1 ^= k.next();
        d2 ^= k.next();

        store_be_pair(d2, d1, &mut output[BLOCK_SIZE * i..]);
    }
}

/// A Camellia cipher instance owning one key schedule.
///
/// Transforms take `&self`, so a scheduled instance may be shared across
/// threads; rekeying or clearing requires exclusive access.
#[derive(Default)]
pub struct Camellia {
    schedule: Option<KeySchedule>,
}

impl Camellia {
    /// Creates an instance with no key set. Transforms fail with
    /// [`CipherError::KeyNotSet`] until [`Camellia::set_key`] succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an instance with the schedule already derived.
    pub fn with_key(key: &[u8]) -> Result<Self, CipherError> {
        Ok(Self {
            schedule: Some(derive_schedule(key)?),
        })
    }

    /// True for the key lengths schedule derivation accepts.
    pub fn valid_key_length(len: usize) -> bool {
        KEY_LENGTHS.contains(&len)
    }

    /// Derives and installs a new schedule, replacing any previous one.
    ///
    /// On an invalid length the previous schedule is cleared rather than
    /// left in place.
    pub fn set_key(&mut self, key: &[u8]) -> Result<(), CipherError> {
        self.clear();
        self.schedule = Some(derive_schedule(key)?);
        Ok(())
    }

    /// Identity of the active variant, or `None` before a key is set.
    pub fn name(&self) -> Option<&'static str> {
        self.schedule.as_ref().map(|s| match s.key_length() {
            16 => "Camellia-128",
            24 => "Camellia-192",
            _ => "Camellia-256",
        })
    }

    /// Encrypts `blocks` raw blocks; see [`encrypt_blocks`].
    pub fn encrypt_blocks(
        &self,
        input: &[u8],
        output: &mut [u8],
        blocks: usize,
    ) -> Result<(), CipherError> {
        let schedule = self.schedule.as_ref().ok_or(CipherError::KeyNotSet)?;
        encrypt_blocks(schedule, input, output, blocks);
        Ok(())
    }

    /// Decrypts `blocks` raw blocks; see [`decrypt_blocks`].
    pub fn decrypt_blocks(
        &self,
        input: &[u8],
        output: &mut [u8],
        blocks: usize,
    ) -> Result<(), CipherError> {
        let schedule = self.schedule.as_ref().ok_or(CipherError::KeyNotSet)?;
        decrypt_blocks(schedule, input, output, blocks);
        Ok(())
    }

    /// Zero-overwrites and discards the key schedule. Idempotent.
    pub fn clear(&mut self) {
        if let Some(schedule) = self.schedule.as_mut() {
            schedule.clear();
        }
        self.schedule = None;
    }
}
