//! Camellia round transformations: the F function and the FL/FLINV layer.

use crate::sbox::{SBOX1, SBOX2, SBOX3, SBOX4};

// Byte-lane masks for the diffusion step. Every byte of each mask is 0x00 or
// 0x01, so multiplying by a substituted byte broadcasts it into the selected
// lanes without carrying across lane boundaries.
const M1: u64 = 0x0101_0100_0100_0001;
const M2: u64 = 0x0001_0101_0101_0000;
const M3: u64 = 0x0100_0101_0001_0100;
const M4: u64 = 0x0101_0001_0000_0101;
const M5: u64 = 0x0001_0101_0001_0101;
const M6: u64 = 0x0100_0101_0100_0101;
const M7: u64 = 0x0101_0001_0101_0001;
const M8: u64 = 0x0101_0100_0101_0100;

/// Round function: keyed substitution through the four tables followed by the
/// linear diffusion fold.
#[inline]
pub fn f(v: u64, k: u64) -> u64 {
    let x = (v ^ k).to_be_bytes();

    let z1 = M1 * u64::from(SBOX1[x[0] as usize]);
    let z2 = M2 * u64::from(SBOX2[x[1] as usize]);
    let z3 = M3 * u64::from(SBOX3[x[2] as usize]);
    let z4 = M4 * u64::from(SBOX4[x[3] as usize]);
    let z5 = M5 * u64::from(SBOX2[x[4] as usize]);
    let z6 = M6 * u64::from(SBOX3[x[5] as usize]);
    let z7 = M7 * u64::from(SBOX4[x[6] as usize]);
    let z8 = M8 * u64::from(SBOX1[x[7] as usize]);

    z1 ^ z2 ^ z3 ^ z4 ^ z5 ^ z6 ^ z7 ^ z8
}

/// Keyed linear layer applied to the left half at every third round.
#[inline]
pub fn fl(v: u64, k: u64) -> u64 {
    let mut x1 = (v >> 32) as u32;
    let mut x2 = v as u32;

    let k1 = (k >> 32) as u32;
    let k2 = k as u32;

    x2 ^= (x1 & k1).rotate_left(1);
    x1 ^= x2 | k2;

    (u64::from(x1) << 32) | u64::from(x2)
}

/// Inverse of [`fl`] for the same subkey. The two steps must be undone in
/// reverse order.
#[inline]
pub fn fl_inv(v: u64, k: u64) -> u64 {
    let mut x1 = (v >> 32) as u32;
    let mut x2 = v as u32;

    let k1 = (k >> 32) as u32;
    let k2 = k as u32;

    x1 ^= x2 | k2;
    x2 ^= (x1 & k1).rotate_left(1);

    (u64::from(x1) << 32) | u64::from(x2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn f_spot_values() {
        assert_eq!(f(0x0123456789abcdef, 0xfedcba9876543210), 0x00000000ec4f3dec);
        assert_eq!(f(0, 0xa09e667f3bcc908b), 0x353c1b3186b3a785);
    }

    #[test]
    fn fl_spot_value() {
        assert_eq!(fl(0x0123456789abcdef, 0xfedcba9876543210), 0xfedcba9889abcdef);
    }

    #[test]
    fn fl_inv_undoes_fl() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let v: u64 = rng.gen();
            let k: u64 = rng.gen();
            assert_eq!(fl_inv(fl(v, k), k), v);
            assert_eq!(fl(fl_inv(v, k), k), v);
        }
    }

    #[test]
    fn fl_zero_key_swaps_nothing_into_low_half() {
        // With k1 = 0 the AND masks everything off; with k2 = 0 the OR is the
        // low half itself.
        let v = 0x00000000_ffffffff;
        assert_eq!(fl(v, 0), 0xffffffff_ffffffff);
        assert_eq!(fl_inv(fl(v, 0), 0), v);
    }
}
