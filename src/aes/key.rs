//! The AES key type and key-length variant dispatch.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::error::Error;

use super::constants::{AES_128_KEY_SIZE, AES_192_KEY_SIZE, AES_256_KEY_SIZE};

/// Which of the three standard AES key sizes a key uses, carrying the
/// derived round count alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AesVariant {
    Aes128,
    Aes192,
    Aes256,
}

impl AesVariant {
    /// Resolve the variant from a raw key length in bytes.
    pub fn from_key_len(key_len: usize) -> Result<Self, Error> {
        match key_len {
            AES_128_KEY_SIZE => Ok(AesVariant::Aes128),
            AES_192_KEY_SIZE => Ok(AesVariant::Aes192),
            AES_256_KEY_SIZE => Ok(AesVariant::Aes256),
            got => Err(Error::InvalidKeyLength { got }),
        }
    }

    /// Number of 32-bit words in the original key (`Nk`).
    pub fn nk(self) -> usize {
        match self {
            AesVariant::Aes128 => 4,
            AesVariant::Aes192 => 6,
            AesVariant::Aes256 => 8,
        }
    }

    /// Number of rounds (`Nr`).
    pub fn nr(self) -> usize {
        match self {
            AesVariant::Aes128 => 10,
            AesVariant::Aes192 => 12,
            AesVariant::Aes256 => 14,
        }
    }

    /// Key length in bytes.
    pub fn key_len(self) -> usize {
        self.nk() * 4
    }
}

/// Owned AES key material.
///
/// The backing buffer is overwritten with zeros when the key is dropped.
/// Equality is constant-time and, unlike the donor implementation's
/// `Key::operator==`, returns `true` for bitwise-equal keys.
pub struct AesKey {
    bytes: Vec<u8>,
    variant: AesVariant,
}

impl AesKey {
    /// Construct a key from raw bytes. `bytes.len()` must be 16, 24, or 32.
    pub fn new(bytes: &[u8]) -> Result<Self, Error> {
        let variant = AesVariant::from_key_len(bytes.len())?;
        Ok(AesKey {
            bytes: bytes.to_vec(),
            variant,
        })
    }

    pub fn variant(&self) -> AesVariant {
        self.variant
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Drop for AesKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl PartialEq for AesKey {
    fn eq(&self, other: &Self) -> bool {
        self.variant == other.variant && bool::from(self.bytes.ct_eq(&other.bytes))
    }
}

impl Eq for AesKey {}

impl fmt::Debug for AesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesKey")
            .field("variant", &self.variant)
            .field("bytes", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_keys_compare_equal() {
        let a = AesKey::new(&[0x42; 16]).unwrap();
        let b = AesKey::new(&[0x42; 16]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_keys_compare_unequal() {
        let a = AesKey::new(&[0x01; 16]).unwrap();
        let b = AesKey::new(&[0x02; 16]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn invalid_length_is_rejected() {
        let err = AesKey::new(&[0u8; 20]).unwrap_err();
        assert_eq!(err, Error::InvalidKeyLength { got: 20 });
    }
}
