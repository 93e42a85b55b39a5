//! Binary codec for fixed-layout records.
//!
//! This module converts between a [`Record`] and the exact byte layout declared by
//! a [`RecordSchema`]. It is pure data transformation -- no file I/O, no logging,
//! no shared state. The layout it reproduces is externally mandated (a device's
//! on-flash or over-the-air format), so every byte position matters: fields are
//! written at their precomputed offsets with no implicit alignment padding, and
//! any deviation is a compatibility bug rather than a design choice.
//!
//! Both operations are all-or-nothing. [`encode`] validates every field before
//! writing a single byte, so an error never leaves a partially written buffer
//! observable. [`decode`] either returns a fully populated record or an error,
//! never a partial one.

use bytes::Bytes;

use crate::error::Error;
use crate::schema::{Endianness, FieldKind, FieldSpec, RecordSchema, StringEncoding};
use crate::value::{Record, Value};

/// Encode a record into the schema's exact byte layout.
///
/// The record must supply a value of the matching kind for every schema field,
/// and must not carry fields the schema does not declare. The returned buffer is
/// exactly [`RecordSchema::total_length`] bytes.
///
/// Padded strings are right-padded with zero bytes. A string whose own content
/// ends in a zero byte is indistinguishable from padding on decode; the codec
/// does not reject such content, matching the fixed-width padded-string
/// convention.
///
/// # Errors
///
/// Returns [`Error::SchemaMismatch`] if a field is missing, undeclared, of the
/// wrong kind, a byte array of the wrong length, or a non-ASCII string in an
/// ASCII field; [`Error::ValueOutOfRange`] if an integer does not fit its
/// declared width; [`Error::StringTooLong`] if an encoded string exceeds its
/// field length (strings are never silently truncated).
pub fn encode(schema: &RecordSchema, record: &Record) -> Result<Vec<u8>, Error> {
    // Reject fields the schema does not declare.
    for (name, _) in record.iter() {
        if !schema.contains(name) {
            return Err(Error::SchemaMismatch {
                field: name.to_string(),
                detail: "not declared in schema".to_string(),
            });
        }
    }

    // Validate every field before writing anything, collecting values in
    // schema order so the write pass below cannot fail.
    let mut values = Vec::with_capacity(schema.field_count());
    for field in schema.fields() {
        let value = record
            .get(field.name())
            .ok_or_else(|| Error::SchemaMismatch {
                field: field.name().to_string(),
                detail: "missing from record".to_string(),
            })?;
        validate_field(field, value)?;
        values.push(value);
    }

    let mut buf = vec![0u8; schema.total_length()];
    for (field, value) in schema.fields().iter().zip(values) {
        write_field(&mut buf, field, value);
    }
    Ok(buf)
}

/// Decode a buffer into a record, one entry per schema field in schema order.
///
/// The buffer must be exactly [`RecordSchema::total_length`] bytes; decoding
/// never reads past the schema's declared length. Padded-string fields have
/// their trailing zero-byte run stripped greedily before the content is
/// validated against the field's encoding.
///
/// # Errors
///
/// Returns [`Error::BufferLengthMismatch`] if the buffer is not exactly the
/// schema's total length, or [`Error::InvalidStringData`] if a padded-string
/// field's content is not valid in its declared encoding.
pub fn decode(schema: &RecordSchema, buffer: &[u8]) -> Result<Record, Error> {
    if buffer.len() != schema.total_length() {
        return Err(Error::BufferLengthMismatch {
            expected: schema.total_length(),
            actual: buffer.len(),
        });
    }

    let mut record = Record::new();
    for field in schema.fields() {
        let raw = &buffer[field.offset()..field.offset() + field.width()];
        let value = read_field(field, raw)?;
        record.set(field.name(), value);
    }
    Ok(record)
}

/// Check that one value fits its field: matching kind, integer within width,
/// byte array of exact length, string encodable within the field.
fn validate_field(field: &FieldSpec, value: &Value) -> Result<(), Error> {
    match (field.kind(), value) {
        (FieldKind::UnsignedInt { width, .. }, Value::Uint(v)) => {
            if *v > width.max_value() {
                return Err(Error::ValueOutOfRange {
                    field: field.name().to_string(),
                    value: *v,
                    width: width.bytes(),
                });
            }
            Ok(())
        }
        (FieldKind::FixedBytes { len }, Value::Bytes(b)) => {
            if b.len() != len {
                return Err(Error::SchemaMismatch {
                    field: field.name().to_string(),
                    detail: format!("expected exactly {len} bytes, got {}", b.len()),
                });
            }
            Ok(())
        }
        (FieldKind::PaddedString { len, encoding }, Value::Str(s)) => {
            if encoding == StringEncoding::Ascii && !s.is_ascii() {
                return Err(Error::SchemaMismatch {
                    field: field.name().to_string(),
                    detail: "string contains non-ASCII characters".to_string(),
                });
            }
            if s.len() > len {
                return Err(Error::StringTooLong {
                    field: field.name().to_string(),
                    len: s.len(),
                    max: len,
                });
            }
            Ok(())
        }
        (kind, value) => Err(Error::SchemaMismatch {
            field: field.name().to_string(),
            detail: format!(
                "expected {}, got {}",
                kind_name(kind),
                value.kind_name()
            ),
        }),
    }
}

/// Write one validated value at its field's offset. Infallible: every case here
/// was checked by [`validate_field`].
fn write_field(buf: &mut [u8], field: &FieldSpec, value: &Value) {
    let offset = field.offset();
    match (field.kind(), value) {
        (FieldKind::UnsignedInt { width, endianness }, Value::Uint(v)) => {
            let w = width.bytes();
            match endianness {
                // Low `w` bytes of the little-endian representation.
                Endianness::Little => {
                    buf[offset..offset + w].copy_from_slice(&v.to_le_bytes()[..w]);
                }
                // High `w` bytes of the big-endian representation.
                Endianness::Big => {
                    buf[offset..offset + w].copy_from_slice(&v.to_be_bytes()[8 - w..]);
                }
            }
        }
        (FieldKind::FixedBytes { .. }, Value::Bytes(b)) => {
            buf[offset..offset + b.len()].copy_from_slice(b);
        }
        (FieldKind::PaddedString { .. }, Value::Str(s)) => {
            // Content first; the rest of the field is already zero padding.
            buf[offset..offset + s.len()].copy_from_slice(s.as_bytes());
        }
        // validate_field rejected every kind/value mismatch.
        _ => unreachable!("field validated before write"),
    }
}

/// Read one field from its raw byte slice (already bounds-checked by the caller).
fn read_field(field: &FieldSpec, raw: &[u8]) -> Result<Value, Error> {
    match field.kind() {
        FieldKind::UnsignedInt { endianness, .. } => {
            let mut v: u64 = 0;
            match endianness {
                Endianness::Little => {
                    for (i, byte) in raw.iter().enumerate() {
                        v |= (*byte as u64) << (8 * i);
                    }
                }
                Endianness::Big => {
                    for byte in raw {
                        v = (v << 8) | *byte as u64;
                    }
                }
            }
            Ok(Value::Uint(v))
        }
        FieldKind::FixedBytes { .. } => Ok(Value::Bytes(Bytes::copy_from_slice(raw))),
        FieldKind::PaddedString { encoding, .. } => {
            // Strip the trailing zero run greedily; interior zeros are content.
            let content_len = raw.iter().rposition(|&b| b != 0).map_or(0, |p| p + 1);
            let content = &raw[..content_len];
            if encoding == StringEncoding::Ascii && !content.is_ascii() {
                return Err(Error::InvalidStringData {
                    field: field.name().to_string(),
                    detail: "content is not ASCII".to_string(),
                });
            }
            let text = std::str::from_utf8(content).map_err(|e| Error::InvalidStringData {
                field: field.name().to_string(),
                detail: format!("invalid UTF-8: {e}"),
            })?;
            Ok(Value::Str(text.to_string()))
        }
    }
}

/// Short label for a field kind, used in mismatch error details.
fn kind_name(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::UnsignedInt { .. } => "unsigned integer",
        FieldKind::FixedBytes { .. } => "byte array",
        FieldKind::PaddedString { .. } => "string",
    }
}
