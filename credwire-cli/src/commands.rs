//! Subcommand implementations.
//!
//! Each subcommand is a plain function over parsed arguments, returning the
//! text to print (or nothing, for `build`). File I/O lives here, at the edge;
//! the codec itself never touches the filesystem.

use std::fs;
use std::path::Path;

use credwire::thread::{self, ThreadNetworkInfo};

use crate::error::CliError;
use crate::render;

/// The `layout` subcommand: print the Thread credential schema.
pub fn layout() -> String {
    render::layout_table(thread::schema())
}

/// The `show` subcommand: read a credential blob and render its fields
/// followed by a hex dump.
///
/// # Errors
///
/// Returns [`CliError::Io`] if the file cannot be read, or [`CliError::Codec`]
/// if the blob does not decode (wrong length, invalid name bytes).
pub fn show(path: &Path) -> Result<String, CliError> {
    let buf = fs::read(path)?;
    tracing::debug!(path = %path.display(), bytes = buf.len(), "Read credential blob");

    let record = credwire::decode(thread::schema(), &buf)?;

    let mut out = render::field_table(thread::schema(), &record);
    out.push('\n');
    out.push_str(&render::hex_dump(&buf));
    Ok(out)
}

/// Arguments of the `build` subcommand, with byte-array fields still in their
/// command-line hex-string form.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Active operational dataset timestamp.
    pub active_timestamp: u64,
    /// Master key as 32 hex digits.
    pub master_key: String,
    /// PSKc as 32 hex digits.
    pub pskc: String,
    /// Extended PAN ID as 16 hex digits.
    pub extended_pan_id: String,
    /// Mesh-local prefix as 16 hex digits.
    pub mesh_prefix: String,
    /// 16-bit PAN identifier.
    pub pan_id: u16,
    /// Network name.
    pub network_name: String,
    /// Radio channel.
    pub channel: u8,
}

impl BuildRequest {
    /// Parse the hex-string fields and assemble the typed credential set.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidHex`] if a hex string does not parse or has
    /// the wrong length for its field.
    pub fn to_info(&self) -> Result<ThreadNetworkInfo, CliError> {
        Ok(ThreadNetworkInfo {
            active_timestamp: self.active_timestamp,
            master_key: parse_hex_array("master-key", &self.master_key)?,
            pskc: parse_hex_array("pskc", &self.pskc)?,
            extended_pan_id: parse_hex_array("extended-pan-id", &self.extended_pan_id)?,
            mesh_prefix: parse_hex_array("mesh-prefix", &self.mesh_prefix)?,
            pan_id: self.pan_id,
            network_name: self.network_name.clone(),
            channel: self.channel,
        })
    }
}

/// The `build` subcommand: encode a credential blob and write it to `output`.
///
/// # Errors
///
/// Returns [`CliError::InvalidHex`] for malformed hex arguments,
/// [`CliError::Codec`] if the credentials fail encode validation (e.g. an
/// oversized network name), or [`CliError::Io`] if the file cannot be written.
pub fn build(request: &BuildRequest, output: &Path) -> Result<(), CliError> {
    let info = request.to_info()?;
    let buf = info.encode()?;
    fs::write(output, &buf)?;
    tracing::info!(path = %output.display(), bytes = buf.len(), "Wrote credential blob");
    Ok(())
}

/// Parse a hex string into a fixed-size byte array, naming the field in any
/// error.
fn parse_hex_array<const N: usize>(field: &str, text: &str) -> Result<[u8; N], CliError> {
    let bytes = hex::decode(text).map_err(|e| CliError::InvalidHex {
        field: field.to_string(),
        detail: e.to_string(),
    })?;
    bytes.as_slice().try_into().map_err(|_| CliError::InvalidHex {
        field: field.to_string(),
        detail: format!(
            "expected {} hex digits ({N} bytes), got {} bytes",
            N * 2,
            bytes.len()
        ),
    })
}
