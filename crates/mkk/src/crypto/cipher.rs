//! Single-block AES-256 encryption.
//!
//! Exactly one 16-byte block is encrypted under a 32-byte key using the
//! cipher's native block operation. There is no chaining mode and no IV.

use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::Aes256;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of one cipher block.
pub const BLOCK_LEN: usize = 16;

/// Encrypts one block under a 256-bit key.
///
/// Any certified block cipher with a 256-bit key and 16-byte block fits here.
#[cfg_attr(test, mockall::automock)]
pub trait BlockEncryptor {
    fn encrypt_block(&self, key: &[u8; KEY_LEN], block: &[u8; BLOCK_LEN]) -> [u8; BLOCK_LEN];
}

/// [`BlockEncryptor`] backed by the RustCrypto `aes` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aes256Encryptor;

impl BlockEncryptor for Aes256Encryptor {
    fn encrypt_block(&self, key: &[u8; KEY_LEN], block: &[u8; BLOCK_LEN]) -> [u8; BLOCK_LEN] {
        let cipher = Aes256::new(GenericArray::from_slice(&key[..]));
        let mut buf = GenericArray::clone_from_slice(&block[..]);
        cipher.encrypt_block(&mut buf);

        let mut out = [0u8; BLOCK_LEN];
        out.copy_from_slice(&buf);
        out
    }
}
