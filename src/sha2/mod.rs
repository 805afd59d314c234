//! The SHA-2 family: SHA-224, SHA-256, SHA-384, and SHA-512.
//!
//! Composed the same way the AES side is: fixed constants (`constants`),
//! a compression function per word width (`compress`), and a streaming
//! driver (`digest`) that handles block accumulation, padding, and
//! truncated digest extraction.

mod compress;
mod constants;
mod digest;

pub use digest::{sha224, sha256, sha384, sha512, Sha2Digest, Sha2Variant};
