//! The SHA-2 streaming digest driver: block accumulation, bit-length
//! tracking, FIPS 180-4 padding, and truncated digest extraction.
//!
//! Unlike the donor C++ header this traces back to — which has no
//! across-call partial-block state and pushes the whole-block/tail split
//! onto its caller — this driver keeps an internal carry buffer so
//! `update()` accepts chunks of arbitrary size.

use zeroize::Zeroize;

use super::compress::{compress256, compress512};
use super::constants::{IV_224, IV_256, IV_384, IV_512};

/// Which of the four standard SHA-2 digest sizes this instance computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sha2Variant {
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl Sha2Variant {
    /// Input block size in bytes: 64 for the 32-bit compression function,
    /// 128 for the 64-bit one.
    pub fn block_size(self) -> usize {
        match self {
            Sha2Variant::Sha224 | Sha2Variant::Sha256 => 64,
            Sha2Variant::Sha384 | Sha2Variant::Sha512 => 128,
        }
    }

    /// Output digest length in bytes.
    pub fn digest_size(self) -> usize {
        match self {
            Sha2Variant::Sha224 => 28,
            Sha2Variant::Sha256 => 32,
            Sha2Variant::Sha384 => 48,
            Sha2Variant::Sha512 => 64,
        }
    }

    /// Bytes reserved for the big-endian message-length field in the final
    /// padded block(s): 8 for the 32-bit variant, 16 for the 64-bit one.
    fn length_field_bytes(self) -> usize {
        match self {
            Sha2Variant::Sha224 | Sha2Variant::Sha256 => 8,
            Sha2Variant::Sha384 | Sha2Variant::Sha512 => 16,
        }
    }
}

enum State {
    Bits32([u32; 8]),
    Bits64([u64; 8]),
}

impl State {
    fn initial(variant: Sha2Variant) -> Self {
        match variant {
            Sha2Variant::Sha224 => State::Bits32(IV_224),
            Sha2Variant::Sha256 => State::Bits32(IV_256),
            Sha2Variant::Sha384 => State::Bits64(IV_384),
            Sha2Variant::Sha512 => State::Bits64(IV_512),
        }
    }

    fn absorb_block(&mut self, block: &[u8]) {
        match self {
            State::Bits32(state) => compress256(state, block),
            State::Bits64(state) => compress512(state, block),
        }
    }

    fn extract(&self, out: &mut [u8]) {
        match self {
            State::Bits32(state) => {
                for (i, word) in state.iter().enumerate() {
                    let bytes = word.to_be_bytes();
                    let start = 4 * i;
                    let end = (start + 4).min(out.len());
                    if start >= out.len() {
                        break;
                    }
                    out[start..end].copy_from_slice(&bytes[..end - start]);
                }
            }
            State::Bits64(state) => {
                for (i, word) in state.iter().enumerate() {
                    let bytes = word.to_be_bytes();
                    let start = 8 * i;
                    let end = (start + 8).min(out.len());
                    if start >= out.len() {
                        break;
                    }
                    out[start..end].copy_from_slice(&bytes[..end - start]);
                }
            }
        }
    }
}

impl Zeroize for State {
    fn zeroize(&mut self) {
        match self {
            State::Bits32(state) => state.zeroize(),
            State::Bits64(state) => state.zeroize(),
        }
    }
}

/// A streaming SHA-2 digest. Absorbs input in arbitrary-size chunks via
/// `update`, then `finalize` pads, absorbs the tail, and consumes `self`
/// to produce the digest bytes.
pub struct Sha2Digest {
    variant: Sha2Variant,
    state: State,
    carry: Vec<u8>,
    /// Total message bytes absorbed so far, excluding padding.
    total_bytes: u64,
}

impl Sha2Digest {
    pub fn new(variant: Sha2Variant) -> Self {
        Sha2Digest {
            variant,
            state: State::initial(variant),
            carry: Vec::with_capacity(variant.block_size()),
            total_bytes: 0,
        }
    }

    pub fn variant(&self) -> Sha2Variant {
        self.variant
    }

    /// Absorb exactly one full block, bypassing the carry buffer.
    pub fn update_block(&mut self, block: &[u8]) {
        debug_assert_eq!(block.len(), self.variant.block_size());
        self.state.absorb_block(block);
        self.total_bytes += self.variant.block_size() as u64;
    }

    /// Absorb a byte slice of arbitrary length, draining full blocks from
    /// the internal carry buffer as they accumulate.
    pub fn update(&mut self, bytes: &[u8]) {
        let block_size = self.variant.block_size();
        let mut input = bytes;

        if !self.carry.is_empty() {
            let needed = block_size - self.carry.len();
            let take = needed.min(input.len());
            self.carry.extend_from_slice(&input[..take]);
            input = &input[take..];
            if self.carry.len() == block_size {
                let block = std::mem::take(&mut self.carry);
                self.state.absorb_block(&block);
                self.total_bytes += block_size as u64;
            } else {
                return;
            }
        }

        while input.len() >= block_size {
            self.state.absorb_block(&input[..block_size]);
            self.total_bytes += block_size as u64;
            input = &input[block_size..];
        }

        self.carry.extend_from_slice(input);
    }

    /// Construct, update with `message` in full, and finalize.
    pub fn hash(variant: Sha2Variant, message: &[u8]) -> Vec<u8> {
        let mut digest = Sha2Digest::new(variant);
        digest.update(message);
        digest.finalize()
    }

    /// Pad and absorb the carried tail, producing the final digest bytes.
    /// Consumes `self` so a finalized digest cannot be mistakenly reused.
    #[tracing::instrument(skip(self), fields(variant = ?self.variant))]
    pub fn finalize(mut self) -> Vec<u8> {
        let block_size = self.variant.block_size();
        let length_field_bytes = self.variant.length_field_bytes();
        let total_bits = (self.total_bytes + self.carry.len() as u64).wrapping_mul(8);
        tracing::trace!(total_bits, "sha2 finalize");

        let mut tail = std::mem::take(&mut self.carry);
        tail.push(0x80);

        if tail.len() > block_size - length_field_bytes {
            tail.resize(block_size, 0);
            self.state.absorb_block(&tail);
            tail.clear();
        }
        tail.resize(block_size - length_field_bytes, 0);

        // The length field is `length_field_bytes` wide but the bit counter
        // is tracked as a 64-bit integer (§3): the top half of a 16-byte
        // field for the 64-bit variant is always zero.
        tail.extend(std::iter::repeat(0u8).take(length_field_bytes - 8));
        tail.extend_from_slice(&total_bits.to_be_bytes());

        self.state.absorb_block(&tail);
        tail.zeroize();

        let mut out = vec![0u8; self.variant.digest_size()];
        self.state.extract(&mut out);
        out
    }

    /// Restore the initial IV, zero the bit counter, and clear the carry
    /// buffer, as if freshly constructed.
    pub fn reset(&mut self) {
        self.state.zeroize();
        self.state = State::initial(self.variant);
        self.carry.zeroize();
        self.carry.clear();
        self.total_bytes = 0;
    }
}

impl Drop for Sha2Digest {
    fn drop(&mut self) {
        self.state.zeroize();
        self.carry.zeroize();
    }
}

/// Convenience one-shot SHA-224.
pub fn sha224(message: &[u8]) -> Vec<u8> {
    Sha2Digest::hash(Sha2Variant::Sha224, message)
}

/// Convenience one-shot SHA-256.
pub fn sha256(message: &[u8]) -> Vec<u8> {
    Sha2Digest::hash(Sha2Variant::Sha256, message)
}

/// Convenience one-shot SHA-384.
pub fn sha384(message: &[u8]) -> Vec<u8> {
    Sha2Digest::hash(Sha2Variant::Sha384, message)
}

/// Convenience one-shot SHA-512.
pub fn sha512(message: &[u8]) -> Vec<u8> {
    Sha2Digest::hash(Sha2Variant::Sha512, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s5_sha256_empty_message() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn s6_sha256_one_byte() {
        let input = hex::decode("d3").unwrap();
        assert_eq!(
            hex::encode(sha256(&input)),
            "28969cdfa74a12c82f3bad960b0b000aca2ac329deea5c2328ebc6f2ba9802c1"
        );
    }

    #[test]
    fn s7_sha256_32_byte_input() {
        let input =
            hex::decode("1b77c8dcfd2fc4b54617054fa6b14d6e9d09ce9185a34a7fd2b27923998aab99")
                .unwrap();
        assert_eq!(
            hex::encode(sha256(&input)),
            "2b54a41a75bdcfd662b3cef4c65e48868eeb1eb5d82f10560f90b5d1c87c96ba"
        );
    }

    #[test]
    fn digest_sizes_match_variant() {
        assert_eq!(sha224(b"abc").len(), 28);
        assert_eq!(sha256(b"abc").len(), 32);
        assert_eq!(sha384(b"abc").len(), 48);
        assert_eq!(sha512(b"abc").len(), 64);
    }

    #[test]
    fn sha384_and_sha512_known_vectors_for_abc() {
        assert_eq!(
            hex::encode(sha384(b"abc")),
            "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5be\
             d8086072ba1e7cc2358baeca134c825a7"
        );
        assert_eq!(
            hex::encode(sha512(b"abc")),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39\
             a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[test]
    fn chunked_updates_match_one_shot_hash() {
        let message = b"the quick brown fox jumps over the lazy dog, repeatedly, to pad past one block";
        let one_shot = sha256(message);

        let mut streamed = Sha2Digest::new(Sha2Variant::Sha256);
        for chunk in message.chunks(7) {
            streamed.update(chunk);
        }
        assert_eq!(streamed.finalize(), one_shot);
    }

    #[test]
    fn reset_matches_a_fresh_instance() {
        let mut digest = Sha2Digest::new(Sha2Variant::Sha512);
        digest.update(b"some data that will be discarded");
        digest.reset();
        digest.update(b"abc");
        assert_eq!(digest.finalize(), sha512(b"abc"));
    }

    #[test]
    fn boundary_lengths_around_the_padding_block_split() {
        // block_size=64, length_field_bytes=8 for SHA-256: the boundary
        // where the tail needs a second block is at 64 - 8 - 1 = 55 bytes.
        for len in [54usize, 55, 56, 63, 64, 65] {
            let message: Vec<u8> = (0..len as u32).map(|i| (i % 256) as u8).collect();
            let one_shot = sha256(&message);

            let mut streamed = Sha2Digest::new(Sha2Variant::Sha256);
            streamed.update(&message);
            assert_eq!(streamed.finalize(), one_shot, "mismatch at len={len}");
        }
    }

    #[test]
    fn boundary_lengths_for_the_64_bit_variant() {
        // block_size=128, length_field_bytes=16: boundary at 128-16-1=111.
        for len in [110usize, 111, 112, 127, 128, 129] {
            let message: Vec<u8> = (0..len as u32).map(|i| (i % 256) as u8).collect();
            let one_shot = sha512(&message);

            let mut streamed = Sha2Digest::new(Sha2Variant::Sha512);
            streamed.update(&message);
            assert_eq!(streamed.finalize(), one_shot, "mismatch at len={len}");
        }
    }
}
