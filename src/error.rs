//! Error types for credwire.
//!
//! This module defines the unified error enum used throughout the crate. All fallible
//! operations return `Result<T, Error>`. Every variant is a local, deterministic
//! validation failure -- nothing here is transient, so callers never retry.

/// Unified error type for all credwire operations.
///
/// Variants fall into three groups by the operation that raises them:
///
/// - Schema construction: `DuplicateField`, `ZeroLengthField`
/// - Encode validation: `SchemaMismatch`, `ValueOutOfRange`, `StringTooLong`
/// - Decode validation: `BufferLengthMismatch`, `InvalidStringData`
///   (`SchemaMismatch` can also surface when converting a decoded record
///   into a typed view)
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The record does not fit the schema: a field is missing, an extra field is
    /// present, or a value has the wrong kind or the wrong fixed length.
    #[error("schema mismatch on field {field}: {detail}")]
    SchemaMismatch {
        /// Name of the offending field.
        field: String,
        /// Human-readable description of the mismatch.
        detail: String,
    },

    /// An unsigned integer value does not fit the field's declared width.
    #[error("value {value} does not fit field {field} ({width} bytes unsigned)")]
    ValueOutOfRange {
        /// Name of the offending field.
        field: String,
        /// The value that was supplied.
        value: u64,
        /// Declared field width in bytes.
        width: usize,
    },

    /// An encoded string exceeds its field's fixed length. Strings are never
    /// silently truncated.
    #[error("string for field {field} is {len} bytes, exceeds {max} byte field")]
    StringTooLong {
        /// Name of the offending field.
        field: String,
        /// Encoded byte length of the supplied string.
        len: usize,
        /// Fixed byte length of the field.
        max: usize,
    },

    /// The decode buffer is not exactly the schema's total length.
    #[error("buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferLengthMismatch {
        /// The schema's total length in bytes.
        expected: usize,
        /// The supplied buffer's length in bytes.
        actual: usize,
    },

    /// Two fields in a schema under construction share a name.
    #[error("duplicate field name: {name}")]
    DuplicateField {
        /// The repeated field name.
        name: String,
    },

    /// A byte-array or string field in a schema under construction has length zero.
    #[error("zero-length field: {name}")]
    ZeroLengthField {
        /// Name of the zero-length field.
        name: String,
    },

    /// A padded-string field's content (after stripping trailing zero padding) is
    /// not valid in the field's declared encoding.
    #[error("invalid string data in field {field}: {detail}")]
    InvalidStringData {
        /// Name of the offending field.
        field: String,
        /// Human-readable description of the encoding violation.
        detail: String,
    },
}
