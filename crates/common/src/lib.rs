//! Common types and errors shared across `mkk` crates.

pub mod error;
pub mod protocol;

pub use error::{DeriveError, Input};
pub use protocol::{Derivation, DerivedConstant};
