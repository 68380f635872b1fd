//! Multi-byte-rate padding.
//!
//! Stretches a byte string to an exact length: zero-fill, then XOR a start
//! marker into the first padding byte and an end marker into the last byte.
//!
//! ```text
//! "MY_FLAG" → 4d 59 5f 46 4c 41 47 80 00 00 00 00 00 00 00 01
//! ```
//!
//! When exactly one byte of padding is needed both markers land on the same
//! byte, which ends up as `0x81`. This is not hash-style bit padding.

use thiserror::Error;

/// XORed into the byte immediately after the input.
pub const START_MARKER: u8 = 0x80;

/// XORed into the last byte of the padded output.
pub const END_MARKER: u8 = 0x01;

/// Errors produced by the padder.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PadError {
    /// The input is longer than the target length. Inputs are never truncated.
    #[error("input of {len} bytes exceeds target length {target_len}")]
    InputTooLong { len: usize, target_len: usize },
}

/// Pad `input` to exactly `target_len` bytes.
///
/// An input already of `target_len` bytes is returned as a fresh copy.
///
/// # Errors
///
/// Returns [`PadError::InputTooLong`] if `input` is longer than `target_len`.
pub fn pad(input: &[u8], target_len: usize) -> Result<Vec<u8>, PadError> {
    let len = input.len();
    if len > target_len {
        return Err(PadError::InputTooLong { len, target_len });
    }

    let mut out = input.to_vec();
    if len == target_len {
        return Ok(out);
    }

    out.resize(target_len, 0x00);
    // Both edits are applied even when they hit the same byte.
    out[len] ^= START_MARKER;
    out[target_len - 1] ^= END_MARKER;
    Ok(out)
}

/// Fixed-size form of [`pad`], for feeding cipher keys and blocks.
///
/// # Errors
///
/// Returns [`PadError::InputTooLong`] if `input` is longer than `N` bytes.
pub fn pad_array<const N: usize>(input: &[u8]) -> Result<[u8; N], PadError> {
    let padded = pad(input, N)?;
    let mut out = [0u8; N];
    out.copy_from_slice(&padded);
    Ok(out)
}
