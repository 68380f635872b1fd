//! Result types produced by a derivation.
//!
//! These types are serialised as JSON when the tool runs with `--format json`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of hex digits in the canonical form of a constant.
pub const HEX_DIGITS: usize = 16;

// ---------------------------------------------------------------------------
// Derived constant
// ---------------------------------------------------------------------------

/// A 64-bit constant together with its canonical `0x` + 16 lowercase hex digit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedConstant {
    /// Numeric value.
    pub value: u64,
    /// Canonical zero-padded text, e.g. `0x0071567c2b89d052`.
    pub hex: String,
}

impl DerivedConstant {
    /// Build a constant from its numeric value.
    pub fn new(value: u64) -> Self {
        Self {
            value,
            hex: format!("0x{value:016x}"),
        }
    }
}

impl std::fmt::Display for DerivedConstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hex)
    }
}

/// Error returned when a hex constant supplied by the user cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid constant {0:?}: expected up to {HEX_DIGITS} hex digits, optionally prefixed with 0x")]
pub struct ParseConstantError(pub String);

impl FromStr for DerivedConstant {
    type Err = ParseConstantError;

    /// Accepts `0x9c67acc03e931a10`, `9C67ACC03E931A10` and shorter forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.is_empty()
            || digits.len() > HEX_DIGITS
            || !digits.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(ParseConstantError(s.to_owned()));
        }
        u64::from_str_radix(digits, 16)
            .map(Self::new)
            .map_err(|_| ParseConstantError(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Derivation record
// ---------------------------------------------------------------------------

/// One completed derivation: the inputs echoed verbatim plus the constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derivation {
    /// Key string as supplied.
    pub key: String,
    /// Label string as supplied.
    pub label: String,
    /// The derived constant.
    #[serde(flatten)]
    pub constant: DerivedConstant,
}
