//! Padding and single-block encryption primitives.
//!
//! This module is intentionally free of CLI and configuration concerns.
//! It provides the two low-level steps the deriver composes:
//!
//! ```text
//! block = AES-256[k = pad(key, 32)](pad(label, 16))
//! ```

pub mod cipher;
pub mod pad;

pub use cipher::{Aes256Encryptor, BlockEncryptor, BLOCK_LEN, KEY_LEN};
pub use pad::{pad_array, PadError};
