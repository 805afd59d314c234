//! Byte-level utilities shared by the AES and SHA-2 engines.
//!
//! Both algorithm families operate on big-endian words internally. This
//! module centralizes the big-endian pack/unpack helpers so that no other
//! module in the crate needs to reason about host byte order, plus the
//! rotation and secure-zeroization primitives the round functions and key
//! lifetimes depend on.

use zeroize::Zeroize;

/// Rotate a 32-bit word left by `n` bits.
#[inline(always)]
pub fn rotate_left32(x: u32, n: u32) -> u32 {
    x.rotate_left(n)
}

/// Rotate a 32-bit word right by `n` bits.
#[inline(always)]
pub fn rotate_right32(x: u32, n: u32) -> u32 {
    x.rotate_right(n)
}

/// Rotate a 64-bit word left by `n` bits.
#[inline(always)]
pub fn rotate_left64(x: u64, n: u32) -> u64 {
    x.rotate_left(n)
}

/// Rotate a 64-bit word right by `n` bits.
#[inline(always)]
pub fn rotate_right64(x: u64, n: u32) -> u64 {
    x.rotate_right(n)
}

/// Reverse the byte order of a 32-bit word.
#[inline(always)]
pub fn bswap32(x: u32) -> u32 {
    x.swap_bytes()
}

/// Reverse the byte order of a 64-bit word.
#[inline(always)]
pub fn bswap64(x: u64) -> u64 {
    x.swap_bytes()
}

/// Load a big-endian `u32` from the first 4 bytes of `bytes`.
#[inline(always)]
pub fn load_u32_be(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Store `word` into `out[0..4]` as big-endian bytes.
#[inline(always)]
pub fn store_u32_be(word: u32, out: &mut [u8]) {
    out[0..4].copy_from_slice(&word.to_be_bytes());
}

/// Load a big-endian `u64` from the first 8 bytes of `bytes`.
#[inline(always)]
pub fn load_u64_be(bytes: &[u8]) -> u64 {
    u64::from_be_bytes([
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
    ])
}

/// Store `word` into `out[0..8]` as big-endian bytes.
#[inline(always)]
pub fn store_u64_be(word: u64, out: &mut [u8]) {
    out[0..8].copy_from_slice(&word.to_be_bytes());
}

/// Overwrite `buf` with zero bytes in a way the compiler cannot optimize
/// away, using the `zeroize` crate rather than a plain loop so the write
/// survives across inlining and LTO.
#[inline(always)]
pub fn secure_zero(buf: &mut [u8]) {
    buf.zeroize();
}

/// Returns `ceil(size / block_size)`.
///
/// This is the single block-count formula used everywhere in this crate;
/// the donor C++ codebase this library traces back to had two mutually
/// inconsistent `calculateBlockCount` helpers, neither of which is
/// reproduced here.
#[inline(always)]
pub fn ceil_div_blocks(size: usize, block_size: usize) -> usize {
    if size == 0 {
        0
    } else {
        (size + block_size - 1) / block_size
    }
}
