//! Common error types shared across crates.

use thiserror::Error;

/// Which of the two derivation inputs an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// The cipher key string.
    Key,
    /// The label (plaintext) string.
    Label,
}

impl std::fmt::Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Key => f.write_str("key"),
            Input::Label => f.write_str("label"),
        }
    }
}

/// Top-level derivation error type.
///
/// Variants map to process exit codes:
/// - [`DeriveError::InputTooLong`] → 2 (usage error)
/// - [`DeriveError::InvalidEncoding`] → 65 (data error)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeriveError {
    /// The encoded input does not fit its padded capacity.
    #[error("{input} too long: {len} bytes exceeds capacity of {capacity} bytes")]
    InputTooLong {
        input: Input,
        len: usize,
        capacity: usize,
    },

    /// The input text cannot be represented in the selected byte encoding.
    #[error("invalid encoding for {input}: {reason}")]
    InvalidEncoding { input: Input, reason: String },
}

impl DeriveError {
    /// Returns the process exit code that should be used for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            DeriveError::InputTooLong { .. } => 2,
            DeriveError::InvalidEncoding { .. } => 65,
        }
    }
}
