//! SHA-2 compression functions.
//!
//! The donor C++ header this crate traces back to defines `Ch`/`Maj` as
//! `((x^y) ^ (~x^z))` and `((x^y)^(x^z)^(y^z))`, which do not match the
//! FIPS-180-4 definitions, and reuses the 32-bit rotation amounts for the
//! 64-bit variant while only running 64 of its required 80 rounds. None of
//! those three defects are reproduced here: `Ch`/`Maj` follow FIPS-180-4
//! directly, the 64-bit variant uses its own rotation amounts, and its main
//! loop runs the full 80 rounds.

use crate::bytes::{load_u32_be, load_u64_be, rotate_right32, rotate_right64};

use super::constants::{K_256, K_512};

#[inline(always)]
fn ch32(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (!x & z)
}

#[inline(always)]
fn maj32(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (x & z) ^ (y & z)
}

#[inline(always)]
fn big_sigma0_32(x: u32) -> u32 {
    rotate_right32(x, 2) ^ rotate_right32(x, 13) ^ rotate_right32(x, 22)
}

#[inline(always)]
fn big_sigma1_32(x: u32) -> u32 {
    rotate_right32(x, 6) ^ rotate_right32(x, 11) ^ rotate_right32(x, 25)
}

#[inline(always)]
fn small_sigma0_32(x: u32) -> u32 {
    rotate_right32(x, 7) ^ rotate_right32(x, 18) ^ (x >> 3)
}

#[inline(always)]
fn small_sigma1_32(x: u32) -> u32 {
    rotate_right32(x, 17) ^ rotate_right32(x, 19) ^ (x >> 10)
}

/// Compress one 64-byte block into the 8-word state, used by SHA-224/256.
pub fn compress256(state: &mut [u32; 8], block: &[u8]) {
    let mut w = [0u32; 64];
    for (t, slot) in w.iter_mut().take(16).enumerate() {
        *slot = load_u32_be(&block[4 * t..4 * t + 4]);
    }
    for t in 16..64 {
        w[t] = small_sigma1_32(w[t - 2])
            .wrapping_add(w[t - 7])
            .wrapping_add(small_sigma0_32(w[t - 15]))
            .wrapping_add(w[t - 16]);
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for t in 0..64 {
        let t1 = h
            .wrapping_add(big_sigma1_32(e))
            .wrapping_add(ch32(e, f, g))
            .wrapping_add(K_256[t])
            .wrapping_add(w[t]);
        let t2 = big_sigma0_32(a).wrapping_add(maj32(a, b, c));
        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
    state[4] = state[4].wrapping_add(e);
    state[5] = state[5].wrapping_add(f);
    state[6] = state[6].wrapping_add(g);
    state[7] = state[7].wrapping_add(h);
}

#[inline(always)]
fn ch64(x: u64, y: u64, z: u64) -> u64 {
    (x & y) ^ (!x & z)
}

#[inline(always)]
fn maj64(x: u64, y: u64, z: u64) -> u64 {
    (x & y) ^ (x & z) ^ (y & z)
}

#[inline(always)]
fn big_sigma0_64(x: u64) -> u64 {
    rotate_right64(x, 28) ^ rotate_right64(x, 34) ^ rotate_right64(x, 39)
}

#[inline(always)]
fn big_sigma1_64(x: u64) -> u64 {
    rotate_right64(x, 14) ^ rotate_right64(x, 18) ^ rotate_right64(x, 41)
}

#[inline(always)]
fn small_sigma0_64(x: u64) -> u64 {
    rotate_right64(x, 1) ^ rotate_right64(x, 8) ^ (x >> 7)
}

#[inline(always)]
fn small_sigma1_64(x: u64) -> u64 {
    rotate_right64(x, 19) ^ rotate_right64(x, 61) ^ (x >> 6)
}

/// Compress one 128-byte block into the 8-word state, used by SHA-384/512.
pub fn compress512(state: &mut [u64; 8], block: &[u8]) {
    let mut w = [0u64; 80];
    for (t, slot) in w.iter_mut().take(16).enumerate() {
        *slot = load_u64_be(&block[8 * t..8 * t + 8]);
    }
    for t in 16..80 {
        w[t] = small_sigma1_64(w[t - 2])
            .wrapping_add(w[t - 7])
            .wrapping_add(small_sigma0_64(w[t - 15]))
            .wrapping_add(w[t - 16]);
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for t in 0..80 {
        let t1 = h
            .wrapping_add(big_sigma1_64(e))
            .wrapping_add(ch64(e, f, g))
            .wrapping_add(K_512[t])
            .wrapping_add(w[t]);
        let t2 = big_sigma0_64(a).wrapping_add(maj64(a, b, c));
        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
    state[4] = state[4].wrapping_add(e);
    state[5] = state[5].wrapping_add(f);
    state[6] = state[6].wrapping_add(g);
    state[7] = state[7].wrapping_add(h);
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::constants::IV_256;

    #[test]
    fn compress256_of_the_padded_empty_message_matches_known_digest() {
        let mut block = [0u8; 64];
        block[0] = 0x80;
        let mut state = IV_256;
        compress256(&mut state, &block);
        let mut digest = [0u8; 32];
        for (i, word) in state.iter().enumerate() {
            digest[4 * i..4 * i + 4].copy_from_slice(&word.to_be_bytes());
        }
        assert_eq!(
            hex::encode(digest),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
