//! Field kinds and record schemas.
//!
//! A [`RecordSchema`] is the ordered, immutable layout description for one kind of
//! fixed-length record: a sequence of named fields, each with a [`FieldKind`] that
//! fully determines its byte width. Offsets are precomputed once at construction by
//! prefix-summing field widths in declaration order -- the layout is exactly the
//! concatenation of each field's byte representation, with no implicit alignment
//! padding between fields.
//!
//! Schemas are built through [`SchemaBuilder`] and never mutated afterwards, so a
//! schema constructed once at startup can be shared read-only across threads.

use std::collections::HashMap;

use crate::error::Error;

/// Byte order of an unsigned integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
}

/// Width of an unsigned integer field. Widths outside {1, 2, 4, 8} are
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    /// 1 byte (`u8` range).
    W8,
    /// 2 bytes (`u16` range).
    W16,
    /// 4 bytes (`u32` range).
    W32,
    /// 8 bytes (`u64` range).
    W64,
}

impl IntWidth {
    /// Width in bytes.
    pub fn bytes(self) -> usize {
        match self {
            IntWidth::W8 => 1,
            IntWidth::W16 => 2,
            IntWidth::W32 => 4,
            IntWidth::W64 => 8,
        }
    }

    /// Largest value representable at this width.
    pub fn max_value(self) -> u64 {
        match self {
            IntWidth::W8 => u8::MAX as u64,
            IntWidth::W16 => u16::MAX as u64,
            IntWidth::W32 => u32::MAX as u64,
            IntWidth::W64 => u64::MAX,
        }
    }
}

/// Text encoding of a padded-string field.
///
/// `Ascii` is a strict subset of `Utf8`: it rejects any byte >= 0x80 on both
/// encode and decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringEncoding {
    /// UTF-8 encoded text.
    Utf8,
    /// ASCII-only text.
    Ascii,
}

/// The kind of one record field. The kind fully determines the field's byte width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Fixed-width unsigned integer in the given byte order.
    UnsignedInt {
        /// Width in bytes.
        width: IntWidth,
        /// Byte order on the wire.
        endianness: Endianness,
    },
    /// Opaque byte array of exactly `len` bytes, written verbatim.
    FixedBytes {
        /// Field length in bytes.
        len: usize,
    },
    /// Text of at most `len` encoded bytes, right-padded with zero bytes to
    /// exactly `len` bytes.
    PaddedString {
        /// Field length in bytes.
        len: usize,
        /// Text encoding of the content.
        encoding: StringEncoding,
    },
}

impl FieldKind {
    /// Byte width this field occupies in the record.
    pub fn width(&self) -> usize {
        match *self {
            FieldKind::UnsignedInt { width, .. } => width.bytes(),
            FieldKind::FixedBytes { len } => len,
            FieldKind::PaddedString { len, .. } => len,
        }
    }

    /// 1-byte unsigned integer. Byte order is irrelevant at this width; the
    /// convention is little-endian.
    pub fn uint8() -> Self {
        FieldKind::UnsignedInt {
            width: IntWidth::W8,
            endianness: Endianness::Little,
        }
    }

    /// 2-byte little-endian unsigned integer.
    pub fn uint16_le() -> Self {
        FieldKind::UnsignedInt {
            width: IntWidth::W16,
            endianness: Endianness::Little,
        }
    }

    /// 2-byte big-endian unsigned integer.
    pub fn uint16_be() -> Self {
        FieldKind::UnsignedInt {
            width: IntWidth::W16,
            endianness: Endianness::Big,
        }
    }

    /// 4-byte little-endian unsigned integer.
    pub fn uint32_le() -> Self {
        FieldKind::UnsignedInt {
            width: IntWidth::W32,
            endianness: Endianness::Little,
        }
    }

    /// 4-byte big-endian unsigned integer.
    pub fn uint32_be() -> Self {
        FieldKind::UnsignedInt {
            width: IntWidth::W32,
            endianness: Endianness::Big,
        }
    }

    /// 8-byte little-endian unsigned integer.
    pub fn uint64_le() -> Self {
        FieldKind::UnsignedInt {
            width: IntWidth::W64,
            endianness: Endianness::Little,
        }
    }

    /// 8-byte big-endian unsigned integer.
    pub fn uint64_be() -> Self {
        FieldKind::UnsignedInt {
            width: IntWidth::W64,
            endianness: Endianness::Big,
        }
    }

    /// Opaque byte array of exactly `len` bytes.
    pub fn fixed_bytes(len: usize) -> Self {
        FieldKind::FixedBytes { len }
    }

    /// Zero-padded UTF-8 string field of `len` bytes.
    pub fn padded_utf8(len: usize) -> Self {
        FieldKind::PaddedString {
            len,
            encoding: StringEncoding::Utf8,
        }
    }

    /// Zero-padded ASCII string field of `len` bytes.
    pub fn padded_ascii(len: usize) -> Self {
        FieldKind::PaddedString {
            len,
            encoding: StringEncoding::Ascii,
        }
    }
}

/// One field of a record schema: name, kind, and the byte offset derived from the
/// cumulative widths of all preceding fields.
///
/// Constructed only by [`SchemaBuilder::build`]; the offset is never supplied by
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    name: String,
    kind: FieldKind,
    offset: usize,
}

impl FieldSpec {
    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field kind.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Byte offset of this field from the start of the record.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Byte width of this field.
    pub fn width(&self) -> usize {
        self.kind.width()
    }
}

/// Ordered, immutable field layout for one kind of fixed-length record.
///
/// Field order defines both the byte layout and the iteration order of decoded
/// records. The total byte length is the sum of all field widths.
#[derive(Debug, Clone)]
pub struct RecordSchema {
    fields: Vec<FieldSpec>,
    by_name: HashMap<String, usize>,
    total_length: usize,
}

impl RecordSchema {
    /// Start building a schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder { fields: Vec::new() }
    }

    /// All fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }

    /// Whether the schema contains a field with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Total record length in bytes: the sum of all field widths.
    pub fn total_length(&self) -> usize {
        self.total_length
    }
}

/// Builder for [`RecordSchema`]. Collects `(name, kind)` pairs in declaration
/// order; [`build`](SchemaBuilder::build) validates them and precomputes offsets.
#[derive(Debug)]
pub struct SchemaBuilder {
    fields: Vec<(String, FieldKind)>,
}

impl SchemaBuilder {
    /// Append a field. Declaration order is byte-layout order.
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push((name.into(), kind));
        self
    }

    /// Validate the collected fields and construct the schema.
    ///
    /// Offsets are computed here, once, by prefix-summing field widths in
    /// declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateField`] if two fields share a name, or
    /// [`Error::ZeroLengthField`] if a byte-array or string field has length
    /// zero.
    pub fn build(self) -> Result<RecordSchema, Error> {
        let mut fields = Vec::with_capacity(self.fields.len());
        let mut by_name = HashMap::with_capacity(self.fields.len());
        let mut offset = 0;

        for (idx, (name, kind)) in self.fields.into_iter().enumerate() {
            if kind.width() == 0 {
                return Err(Error::ZeroLengthField { name });
            }
            if by_name.insert(name.clone(), idx).is_some() {
                return Err(Error::DuplicateField { name });
            }
            let width = kind.width();
            fields.push(FieldSpec { name, kind, offset });
            offset += width;
        }

        Ok(RecordSchema {
            fields,
            by_name,
            total_length: offset,
        })
    }
}
