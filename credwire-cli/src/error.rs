//! Error types for credwire-cli.
//!
//! Defines [`CliError`], the unified error enum for all CLI operations.
//! Uses `thiserror` for derive-based error definitions. The top-level `main`
//! wraps this in `anyhow::Result` for convenience.

use thiserror::Error;

/// Unified error type for all credwire-cli operations.
///
/// # Variants
///
/// * `Codec` - A validation failure from the credwire codec.
/// * `Io` - An I/O error reading or writing a blob file.
/// * `InvalidHex` - A hex-string argument could not be parsed into its field.
#[derive(Debug, Error)]
pub enum CliError {
    /// A codec validation failure (schema mismatch, bad length, etc.).
    #[error("codec error: {0}")]
    Codec(#[from] credwire::Error),

    /// An I/O error while reading or writing a blob file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A command-line hex string does not parse into its target field.
    #[error("invalid hex for {field}: {detail}")]
    InvalidHex {
        /// The argument/field the hex string was destined for.
        field: String,
        /// Human-readable description of the parse failure.
        detail: String,
    },
}
