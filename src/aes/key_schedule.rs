//! AES key expansion: turns the original cipher key into the full set of
//! round-key words consumed by the block engine.

use zeroize::Zeroize;

use super::constants::{NB, RCON, S_BOX};
use super::key::AesVariant;

/// Round keys as `4 * (Nr + 1)` big-endian 32-bit words. AES-256 needs the
/// most space (`4 * 15 = 60` words); smaller variants use a prefix.
pub const MAX_ROUND_KEY_WORDS: usize = 4 * 15;

/// The expanded key schedule for one AES key.
///
/// Zeroed on drop, mirroring the donor C++ block engine's destructor
/// behavior for its `_expandedKey` member.
pub struct ExpandedKey {
    words: [u32; MAX_ROUND_KEY_WORDS],
    variant: AesVariant,
}

impl ExpandedKey {
    #[tracing::instrument(skip(key), fields(key_len = key.len(), rounds = variant.nr()))]
    pub fn expand(key: &[u8], variant: AesVariant) -> Self {
        tracing::debug!("expanding AES key schedule");
        let nk = variant.nk();
        let nr = variant.nr();
        let mut words = [0u32; MAX_ROUND_KEY_WORDS];

        for i in 0..nk {
            words[i] = crate::bytes::load_u32_be(&key[4 * i..4 * i + 4]);
        }

        let total_words = NB * (nr + 1);
        for i in nk..total_words {
            let mut tmp = words[i - 1];
            if i % nk == 0 {
                tmp = sub_word(rot_word(tmp)) ^ ((RCON[i / nk] as u32) << 24);
            } else if nk > 6 && i % nk == 4 {
                tmp = sub_word(tmp);
            }
            words[i] = words[i - nk] ^ tmp;
        }

        ExpandedKey { words, variant }
    }

    pub fn variant(&self) -> AesVariant {
        self.variant
    }

    /// The round-key words actually in use, `4 * (Nr + 1)` of them.
    pub fn words(&self) -> &[u32] {
        &self.words[..NB * (self.variant.nr() + 1)]
    }
}

impl Drop for ExpandedKey {
    fn drop(&mut self) {
        self.words.zeroize();
    }
}

fn sub_word(word: u32) -> u32 {
    let bytes = word.to_be_bytes();
    let subbed = [
        S_BOX[bytes[0] as usize],
        S_BOX[bytes[1] as usize],
        S_BOX[bytes[2] as usize],
        S_BOX[bytes[3] as usize],
    ];
    u32::from_be_bytes(subbed)
}

fn rot_word(word: u32) -> u32 {
    word.rotate_left(8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aes128_first_round_key_is_the_key_itself() {
        let key = [
            0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf,
            0x4f, 0x3c,
        ];
        let expanded = ExpandedKey::expand(&key, AesVariant::Aes128);
        assert_eq!(expanded.words()[0], 0x2b7e1516);
        assert_eq!(expanded.words()[3], 0x09cf4f3c);
    }

    #[test]
    fn aes128_second_round_key_matches_fips197_appendix_a() {
        let key = [
            0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf,
            0x4f, 0x3c,
        ];
        let expanded = ExpandedKey::expand(&key, AesVariant::Aes128);
        // FIPS-197 Appendix A.1, w[4..8]
        assert_eq!(expanded.words()[4], 0xa0fafe17);
        assert_eq!(expanded.words()[5], 0x88542cb1);
        assert_eq!(expanded.words()[6], 0x23a33939);
        assert_eq!(expanded.words()[7], 0x2a6c7605);
    }

    #[test]
    fn expands_to_the_correct_word_count_per_variant() {
        let k192 = [0u8; 24];
        let expanded = ExpandedKey::expand(&k192, AesVariant::Aes192);
        assert_eq!(expanded.words().len(), 4 * 13);

        let k256 = [0u8; 32];
        let expanded = ExpandedKey::expand(&k256, AesVariant::Aes256);
        assert_eq!(expanded.words().len(), 4 * 15);
    }
}
