//! `mkk` — generate a flag constant with some rigidity.
//!
//! ```text
//! $ mkk secret MY_FLAG
//! flag_t MY_FLAG = UINT64_C(0x9c67acc03e931a10);  // AES-256[k=pad('secret')](pad('MY_FLAG')) 
//! ```
//!
//! Startup sequence:
//! 1. Parse the command line.
//! 2. Load [`Config`] defaults from `MKK_*` environment variables.
//! 3. Initialise structured JSON logging on stderr.
//! 4. Derive the constant, optionally check it, and print one line.
//!
//! Exit status: 0 on success, 2 when KEY or LABEL is too long, 65 when either
//! cannot be encoded, 1 for anything else (including an `--expect` mismatch).

mod config;
mod crypto;
mod derive;
mod encoding;
mod output;
mod telemetry;

use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use common::{DeriveError, Derivation, DerivedConstant, Input};
use tracing::info;

use config::Config;
use derive::ConstantDeriver;
use encoding::Encoding;
use output::OutputFormat;

fn parse_output_format(s: &str) -> Result<OutputFormat, String> {
    s.parse()
}

fn parse_encoding(s: &str) -> Result<Encoding, String> {
    s.parse()
}

#[derive(Parser)]
#[command(name = "mkk")]
#[command(about = "Generate a flag constant: AES-256[k=pad(KEY)](pad(LABEL)), first 64 bits")]
#[command(version)]
struct Cli {
    /// Key string, at most 32 bytes once encoded
    key: OsString,

    /// Label string, at most 16 bytes once encoded; also the declared name
    label: OsString,

    /// Output format: declaration, hex or json [env: MKK_FORMAT]
    #[arg(long, value_parser = parse_output_format)]
    format: Option<OutputFormat>,

    /// Text encoding for KEY and LABEL: utf-8 or latin-1 [env: MKK_ENCODING]
    #[arg(long, value_parser = parse_encoding)]
    encoding: Option<Encoding>,

    /// Log level (RUST_LOG takes precedence) [env: MKK_LOG_LEVEL]
    #[arg(long)]
    log_level: Option<String>,

    /// Fail unless the derived constant equals this value
    #[arg(long, value_name = "HEX")]
    expect: Option<DerivedConstant>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Exit status for a failed run: the [`DeriveError`] code, else 1.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<DeriveError>()
        .map_or(1, DeriveError::exit_code)
}

fn run(cli: Cli) -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env()?;
    let log_level = cli.log_level.clone().unwrap_or_else(|| cfg.log_level.clone());

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&log_level)?;

    // -----------------------------------------------------------------------
    // 3. Derivation + output
    // -----------------------------------------------------------------------
    let line = execute(cli, &cfg)?;
    println!("{line}");
    Ok(())
}

/// Derive, check and render one constant. Nothing is printed here, so a
/// failed `--expect` leaves stdout empty.
fn execute(cli: Cli, cfg: &Config) -> Result<String> {
    let format = match cli.format {
        Some(f) => f,
        None => cfg.output_format()?,
    };
    let encoding = match cli.encoding {
        Some(e) => e,
        None => cfg.text_encoding()?,
    };

    let key = encoding::arg_to_string(cli.key, Input::Key)?;
    let label = encoding::arg_to_string(cli.label, Input::Label)?;

    let constant = ConstantDeriver::new(encoding).derive(&key, &label)?;
    info!(label = %label, constant = %constant, encoding = %encoding, "constant derived");

    if let Some(expected) = cli.expect {
        if expected != constant {
            anyhow::bail!("constant mismatch for {label}: expected {expected}, derived {constant}");
        }
        info!(label = %label, "constant matches expected value");
    }

    let derivation = Derivation {
        key,
        label,
        constant,
    };
    output::render(&derivation, format)
}
