//! The crate's error taxonomy.
//!
//! Kept intentionally small: the algorithmic core is infallible once its
//! inputs are validated, so the only errors that exist are boundary
//! validation failures (wrong key length, wrong fixed-size buffer length).

use thiserror::Error;

/// Errors returned by this crate's public boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// An AES key was constructed from a byte slice whose length is not
    /// one of the three standard AES key sizes.
    #[error("invalid AES key length: expected 16, 24, or 32 bytes, got {got}")]
    InvalidKeyLength { got: usize },

    /// A fixed-size buffer contract (e.g. a 16-byte CTR IV) was violated.
    #[error("invalid buffer length: expected {expected} bytes, got {got}")]
    InvalidBufferLength { expected: usize, got: usize },
}
