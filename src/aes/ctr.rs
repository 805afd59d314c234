//! AES in CTR (counter) mode: turns the block engine into a stream cipher
//! over buffers of arbitrary length.
//!
//! Blocks are independent given `(key, iv)`, so encryption fans out across
//! `rayon`'s global thread pool: each worker holds only a shared reference
//! to the expanded key and writes to its own disjoint 16-byte slice of the
//! output buffer. `rayon` degrades to the calling thread when only one core
//! is available, so there is no separately maintained sequential path.

use rayon::prelude::*;

use crate::bytes::ceil_div_blocks;
use crate::error::Error;

use super::block::AesBlockCipher;
use super::constants::AES_BLOCK_SIZE;
use super::key::AesKey;

/// Validate and convert a caller-supplied IV slice into the fixed-size
/// counter block the driver operates on.
///
/// Callers that already hold a `[u8; 16]` can skip this and call
/// [`aes_ctr_encrypt`]/[`aes_ctr_decrypt`] directly; this exists for the
/// common case where the IV arrives as a `&[u8]` (decoded from hex, read
/// off the wire, sliced from a larger buffer) whose length is not yet
/// known to be correct.
pub fn iv_from_slice(bytes: &[u8]) -> Result<[u8; AES_BLOCK_SIZE], Error> {
    bytes
        .try_into()
        .map_err(|_| Error::InvalidBufferLength {
            expected: AES_BLOCK_SIZE,
            got: bytes.len(),
        })
}

/// Encrypt `input` with AES-CTR under `key` and an IV given as a slice of
/// any length, rejecting anything but 16 bytes.
pub fn aes_ctr_encrypt_slice(key: &AesKey, iv: &[u8], input: &[u8]) -> Result<Vec<u8>, Error> {
    let iv = iv_from_slice(iv)?;
    Ok(aes_ctr_encrypt(key, &iv, input))
}

/// Decrypt `input` with AES-CTR under `key` and an IV given as a slice of
/// any length, rejecting anything but 16 bytes.
pub fn aes_ctr_decrypt_slice(key: &AesKey, iv: &[u8], input: &[u8]) -> Result<Vec<u8>, Error> {
    let iv = iv_from_slice(iv)?;
    Ok(aes_ctr_decrypt(key, &iv, input))
}

/// Encrypt `input` with AES-CTR under `key` and `iv`. `iv` is the 16-byte
/// counter block: an 8-byte nonce/IV high half followed by an 8-byte
/// big-endian counter low half, incremented once per block.
#[tracing::instrument(skip(key, input), fields(bytes = input.len()))]
pub fn aes_ctr_encrypt(key: &AesKey, iv: &[u8; AES_BLOCK_SIZE], input: &[u8]) -> Vec<u8> {
    if input.is_empty() {
        return Vec::new();
    }

    let cipher = AesBlockCipher::new(key);
    let block_count = ceil_div_blocks(input.len(), AES_BLOCK_SIZE);
    tracing::trace!(block_count, "aes-ctr dispatch");

    let mut output = vec![0u8; input.len()];
    output
        .par_chunks_mut(AES_BLOCK_SIZE)
        .zip(input.par_chunks(AES_BLOCK_SIZE))
        .enumerate()
        .for_each(|(block_index, (out_chunk, in_chunk))| {
            let counter = counter_block(iv, block_index as u64);
            let keystream = cipher.encrypt_block(&counter);
            for (o, (i, k)) in out_chunk
                .iter_mut()
                .zip(in_chunk.iter().zip(keystream.iter()))
            {
                *o = i ^ k;
            }
        });

    output
}

/// CTR decryption is the same operation as encryption.
pub fn aes_ctr_decrypt(key: &AesKey, iv: &[u8; AES_BLOCK_SIZE], input: &[u8]) -> Vec<u8> {
    aes_ctr_encrypt(key, iv, input)
}

/// Build the counter block for `block_index`: `iv`'s low 8 bytes reinterpreted
/// as a big-endian `u64`, wrapping-incremented by `block_index`.
fn counter_block(iv: &[u8; AES_BLOCK_SIZE], block_index: u64) -> [u8; AES_BLOCK_SIZE] {
    let mut counter = *iv;
    let low = u64::from_be_bytes(counter[8..16].try_into().unwrap());
    counter[8..16].copy_from_slice(&low.wrapping_add(block_index).to_be_bytes());
    counter
}
