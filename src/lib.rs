//! A small software library for AES (with CTR mode) and the SHA-2 digest
//! family.
//!
//! This crate provides bit-exact, table-driven implementations of:
//!
//! - AES-128/192/256 block encryption and decryption, plus a parallel
//!   CTR mode driver built on top of the single-block engine.
//! - SHA-224, SHA-256, SHA-384, and SHA-512 streaming digests.
//!
//! It does not implement authenticated encryption, key agreement, or any
//! asymmetric primitives, and performs no random-number generation.
//! Secret material (raw keys, expanded key schedules, and intermediate
//! digest state) is overwritten with zeros via the `zeroize` crate at the
//! end of its owning value's lifetime.

pub mod aes;
pub mod error;
pub mod sha2;

pub(crate) mod bytes;

pub use error::Error;
