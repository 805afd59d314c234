//! The AES block cipher: key handling, key schedule, the single-block
//! encrypt/decrypt engine, and the CTR mode driver built on top of it.

mod block;
mod constants;
mod ctr;
mod key;
mod key_schedule;

pub use block::AesBlockCipher;
pub use constants::AES_BLOCK_SIZE;
pub use ctr::{
    aes_ctr_decrypt, aes_ctr_decrypt_slice, aes_ctr_encrypt, aes_ctr_encrypt_slice, iv_from_slice,
};
pub use key::{AesKey, AesVariant};
