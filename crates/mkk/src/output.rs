//! Presentation of a finished derivation.

use std::str::FromStr;

use anyhow::{Context, Result};
use common::Derivation;

/// How a derivation is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// C declaration line, ready to paste into a header.
    #[default]
    Declaration,
    /// The `0x`-prefixed constant only.
    Hex,
    /// One JSON object per derivation.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "declaration" | "decl" | "c" => Ok(OutputFormat::Declaration),
            "hex" => Ok(OutputFormat::Hex),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown output format {other:?} (expected declaration, hex or json)"
            )),
        }
    }
}

/// Render `d` as a single line (without trailing newline).
///
/// # Errors
///
/// Returns an error only if JSON serialisation fails.
pub fn render(d: &Derivation, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Declaration => Ok(format!(
            "flag_t {label} = UINT64_C({hex});  // AES-256[k=pad('{key}')](pad('{label}')) ",
            label = d.label,
            hex = d.constant.hex,
            key = d.key,
        )),
        OutputFormat::Hex => Ok(d.constant.hex.clone()),
        OutputFormat::Json => {
            serde_json::to_string(d).context("failed to serialise derivation as JSON")
        }
    }
}
