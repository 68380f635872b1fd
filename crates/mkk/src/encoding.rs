//! Text to byte conversion for derivation inputs.
//!
//! The chosen encoding changes the derived constant, so it is always explicit.
//! UTF-8 is the default.

use std::ffi::OsString;
use std::str::FromStr;

use common::{DeriveError, Input};

/// Byte encoding applied to the key and label before padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Utf8,
    /// ISO-8859-1: one byte per char, chars above `U+00FF` are rejected.
    Latin1,
}

impl Encoding {
    /// Encode `text` into the bytes fed to the padder.
    ///
    /// # Errors
    ///
    /// Returns [`DeriveError::InvalidEncoding`] if `text` contains a char the
    /// encoding cannot represent.
    pub fn encode(self, text: &str, input: Input) -> Result<Vec<u8>, DeriveError> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Latin1 => text
                .chars()
                .map(|c| {
                    u8::try_from(u32::from(c)).map_err(|_| DeriveError::InvalidEncoding {
                        input,
                        reason: format!("{c:?} is outside latin-1"),
                    })
                })
                .collect(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Latin1 => "latin-1",
        }
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Encoding::Latin1),
            other => Err(format!("unknown encoding {other:?} (expected utf-8 or latin-1)")),
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert a raw command-line argument into text.
///
/// # Errors
///
/// Returns [`DeriveError::InvalidEncoding`] if the argument is not valid Unicode.
pub fn arg_to_string(arg: OsString, input: Input) -> Result<String, DeriveError> {
    arg.into_string()
        .map_err(|raw| DeriveError::InvalidEncoding {
            input,
            reason: format!("argument {raw:?} is not valid unicode"),
        })
}
