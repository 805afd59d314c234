//! The AES single-block engine: T-table encryption and state-array
//! decryption, built on top of the key schedule.

use crate::bytes::{load_u32_be, secure_zero, store_u32_be};

use super::constants::{
    AES_BLOCK_SIZE, GF_MUL_11, GF_MUL_13, GF_MUL_14, GF_MUL_9, INV_S_BOX, NB, S_BOX, T0_ENC,
    T1_ENC, T2_ENC, T3_ENC,
};
use super::key::AesKey;
use super::key_schedule::ExpandedKey;

/// A single-key AES block cipher, holding the expanded round-key schedule.
///
/// Construction expands the key once; `encrypt_block`/`decrypt_block` can
/// then be called any number of times. The expanded key is zeroed when this
/// value is dropped.
pub struct AesBlockCipher {
    expanded: ExpandedKey,
}

impl AesBlockCipher {
    pub fn new(key: &AesKey) -> Self {
        AesBlockCipher {
            expanded: ExpandedKey::expand(key.as_bytes(), key.variant()),
        }
    }

    /// Encrypt one 16-byte block using the T-table fast path.
    pub fn encrypt_block(&self, plain: &[u8; AES_BLOCK_SIZE]) -> [u8; AES_BLOCK_SIZE] {
        let rk = self.expanded.words();
        let nr = self.expanded.variant().nr();

        let mut s0 = load_u32_be(&plain[0..4]) ^ rk[0];
        let mut s1 = load_u32_be(&plain[4..8]) ^ rk[1];
        let mut s2 = load_u32_be(&plain[8..12]) ^ rk[2];
        let mut s3 = load_u32_be(&plain[12..16]) ^ rk[3];

        for round in 1..nr {
            let t0 = T0_ENC[byte3(s0)] ^ T1_ENC[byte2(s1)] ^ T2_ENC[byte1(s2)] ^ T3_ENC[byte0(s3)]
                ^ rk[NB * round];
            let t1 = T0_ENC[byte3(s1)] ^ T1_ENC[byte2(s2)] ^ T2_ENC[byte1(s3)] ^ T3_ENC[byte0(s0)]
                ^ rk[NB * round + 1];
            let t2 = T0_ENC[byte3(s2)] ^ T1_ENC[byte2(s3)] ^ T2_ENC[byte1(s0)] ^ T3_ENC[byte0(s1)]
                ^ rk[NB * round + 2];
            let t3 = T0_ENC[byte3(s3)] ^ T1_ENC[byte2(s0)] ^ T2_ENC[byte1(s1)] ^ T3_ENC[byte0(s2)]
                ^ rk[NB * round + 3];
            s0 = t0;
            s1 = t1;
            s2 = t2;
            s3 = t3;
        }

        // Final round: SubBytes + ShiftRows (no MixColumns), then AddRoundKey.
        let final_rk = &rk[NB * nr..NB * nr + 4];
        let f0 = final_word(s0, s1, s2, s3) ^ final_rk[0];
        let f1 = final_word(s1, s2, s3, s0) ^ final_rk[1];
        let f2 = final_word(s2, s3, s0, s1) ^ final_rk[2];
        let f3 = final_word(s3, s0, s1, s2) ^ final_rk[3];

        let mut out = [0u8; AES_BLOCK_SIZE];
        store_u32_be(f0, &mut out[0..4]);
        store_u32_be(f1, &mut out[4..8]);
        store_u32_be(f2, &mut out[8..12]);
        store_u32_be(f3, &mut out[12..16]);
        out
    }

    /// Decrypt one 16-byte block using the state-array path.
    pub fn decrypt_block(&self, cipher: &[u8; AES_BLOCK_SIZE]) -> [u8; AES_BLOCK_SIZE] {
        let rk = self.expanded.words();
        let nr = self.expanded.variant().nr();

        // Column-major 4x4 state: state[row][col].
        let mut state = [[0u8; 4]; 4];
        for col in 0..4 {
            for row in 0..4 {
                state[row][col] = cipher[4 * col + row];
            }
        }

        add_round_key(&mut state, rk, nr);

        for round in (1..nr).rev() {
            inv_shift_rows(&mut state);
            inv_sub_bytes(&mut state);
            add_round_key(&mut state, rk, round);
            inv_mix_columns(&mut state);
        }

        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
        add_round_key(&mut state, rk, 0);

        let mut out = [0u8; AES_BLOCK_SIZE];
        for col in 0..4 {
            for row in 0..4 {
                out[4 * col + row] = state[row][col];
            }
        }

        for row in state.iter_mut() {
            secure_zero(row);
        }

        out
    }
}

#[inline(always)]
fn byte3(w: u32) -> usize {
    ((w >> 24) & 0xff) as usize
}
#[inline(always)]
fn byte2(w: u32) -> usize {
    ((w >> 16) & 0xff) as usize
}
#[inline(always)]
fn byte1(w: u32) -> usize {
    ((w >> 8) & 0xff) as usize
}
#[inline(always)]
fn byte0(w: u32) -> usize {
    (w & 0xff) as usize
}

/// Build one word of the final round (SubBytes + ShiftRows, no
/// MixColumns) from the already-rotated state words, substituted through
/// the S-box.
fn final_word(s0: u32, s1: u32, s2: u32, s3: u32) -> u32 {
    let b0 = S_BOX[byte3(s0)] as u32;
    let b1 = S_BOX[byte2(s1)] as u32;
    let b2 = S_BOX[byte1(s2)] as u32;
    let b3 = S_BOX[byte0(s3)] as u32;
    (b0 << 24) | (b1 << 16) | (b2 << 8) | b3
}

fn add_round_key(state: &mut [[u8; 4]; 4], rk: &[u32], round: usize) {
    for col in 0..4 {
        let word = rk[NB * round + col].to_be_bytes();
        for row in 0..4 {
            state[row][col] ^= word[row];
        }
    }
}

fn inv_sub_bytes(state: &mut [[u8; 4]; 4]) {
    for row in state.iter_mut() {
        for b in row.iter_mut() {
            *b = INV_S_BOX[*b as usize];
        }
    }
}

fn inv_shift_rows(state: &mut [[u8; 4]; 4]) {
    for (row_idx, row) in state.iter_mut().enumerate() {
        row.rotate_right(row_idx);
    }
}

fn inv_mix_columns(state: &mut [[u8; 4]; 4]) {
    for col in 0..4 {
        let a = state[0][col];
        let b = state[1][col];
        let c = state[2][col];
        let d = state[3][col];

        state[0][col] = GF_MUL_14[a as usize]
            ^ GF_MUL_11[b as usize]
            ^ GF_MUL_13[c as usize]
            ^ GF_MUL_9[d as usize];
        state[1][col] = GF_MUL_9[a as usize]
            ^ GF_MUL_14[b as usize]
            ^ GF_MUL_11[c as usize]
            ^ GF_MUL_13[d as usize];
        state[2][col] = GF_MUL_13[a as usize]
            ^ GF_MUL_9[b as usize]
            ^ GF_MUL_14[c as usize]
            ^ GF_MUL_11[d as usize];
        state[3][col] = GF_MUL_11[a as usize]
            ^ GF_MUL_13[b as usize]
            ^ GF_MUL_9[c as usize]
            ^ GF_MUL_14[d as usize];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher_from_hex_key(hex_key: &str) -> AesBlockCipher {
        let key_bytes = hex::decode(hex_key).unwrap();
        let key = AesKey::new(&key_bytes).unwrap();
        AesBlockCipher::new(&key)
    }

    fn block_from_hex(hex: &str) -> [u8; AES_BLOCK_SIZE] {
        let v = hex::decode(hex).unwrap();
        let mut b = [0u8; AES_BLOCK_SIZE];
        b.copy_from_slice(&v);
        b
    }

    #[test]
    fn s1_aes128_single_block() {
        let cipher = cipher_from_hex_key("2b7e151628aed2a6abf7158809cf4f3c");
        let plain = block_from_hex("3243f6a8885a308d313198a2e0370734");
        let expected = block_from_hex("3925841d02dc09fbdc118597196a0b32");
        assert_eq!(cipher.encrypt_block(&plain), expected);
        assert_eq!(cipher.decrypt_block(&expected), plain);
    }

    #[test]
    fn s2_aes192_single_block() {
        let cipher = cipher_from_hex_key("000102030405060708090a0b0c0d0e0f1011121314151617");
        let plain = block_from_hex("00112233445566778899aabbccddeeff");
        let expected = block_from_hex("dda97ca4864cdfe06eaf70a0ec0d7191");
        assert_eq!(cipher.encrypt_block(&plain), expected);
        assert_eq!(cipher.decrypt_block(&expected), plain);
    }

    #[test]
    fn s3_aes256_single_block() {
        let cipher =
            cipher_from_hex_key("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f");
        let plain = block_from_hex("00112233445566778899aabbccddeeff");
        let expected = block_from_hex("8ea2b7ca516745bfeafc49904b496089");
        assert_eq!(cipher.encrypt_block(&plain), expected);
        assert_eq!(cipher.decrypt_block(&expected), plain);
    }

    #[test]
    fn encrypt_then_decrypt_round_trips_for_every_variant() {
        for key_len in [16usize, 24, 32] {
            let key_bytes: Vec<u8> = (0..key_len as u8).collect();
            let key = AesKey::new(&key_bytes).unwrap();
            let cipher = AesBlockCipher::new(&key);
            let plain: [u8; 16] = [
                0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15,
            ];
            let ct = cipher.encrypt_block(&plain);
            assert_eq!(cipher.decrypt_block(&ct), plain);
        }
    }
}
