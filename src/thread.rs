//! Thread network credential records.
//!
//! The fixed 76-byte layout in which a device stores its Thread operational
//! credentials, as dictated by the device's on-flash format:
//!
//! | field           | kind                | offset | size |
//! |-----------------|---------------------|--------|------|
//! | ActiveTimestamp | u64 little-endian   | 0      | 8    |
//! | MasterKey       | bytes               | 8      | 16   |
//! | PSKc            | bytes               | 24     | 16   |
//! | ExtendedPanId   | bytes               | 40     | 8    |
//! | MeshPrefix      | bytes               | 48     | 8    |
//! | PanId           | u16 little-endian   | 56     | 2    |
//! | NetworkName     | padded UTF-8 string | 58     | 17   |
//! | Channel         | u8                  | 75     | 1    |
//!
//! [`schema`] exposes the layout as a process-wide constant [`RecordSchema`] for
//! callers that work with generic [`Record`]s; [`ThreadNetworkInfo`] is a typed
//! view over the same layout for callers that want named, width-checked fields.

use std::sync::OnceLock;

use bytes::Bytes;

use crate::codec;
use crate::error::Error;
use crate::schema::{FieldKind, RecordSchema};
use crate::value::{Record, Value};

/// Length of the Thread master key field in bytes.
pub const MASTER_KEY_LEN: usize = 16;

/// Length of the PSKc (pre-shared key for the commissioner) field in bytes.
pub const PSKC_LEN: usize = 16;

/// Length of the extended PAN ID field in bytes.
pub const EXTENDED_PAN_ID_LEN: usize = 8;

/// Length of the mesh-local prefix field in bytes.
pub const MESH_PREFIX_LEN: usize = 8;

/// Length of the zero-padded network name field in bytes.
pub const NETWORK_NAME_LEN: usize = 17;

/// Total length of an encoded Thread credential record in bytes.
pub const RECORD_LEN: usize = 76;

/// The Thread credential record schema, constructed once per process and shared
/// read-only thereafter. Safe to use from any number of threads concurrently.
pub fn schema() -> &'static RecordSchema {
    static SCHEMA: OnceLock<RecordSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        RecordSchema::builder()
            .field("ActiveTimestamp", FieldKind::uint64_le())
            .field("MasterKey", FieldKind::fixed_bytes(MASTER_KEY_LEN))
            .field("PSKc", FieldKind::fixed_bytes(PSKC_LEN))
            .field("ExtendedPanId", FieldKind::fixed_bytes(EXTENDED_PAN_ID_LEN))
            .field("MeshPrefix", FieldKind::fixed_bytes(MESH_PREFIX_LEN))
            .field("PanId", FieldKind::uint16_le())
            .field("NetworkName", FieldKind::padded_utf8(NETWORK_NAME_LEN))
            .field("Channel", FieldKind::uint8())
            .build()
            .expect("thread credential field list is unique and nonzero-length")
    })
}

/// A Thread network credential set with typed, named fields.
///
/// The byte layout of the encoded form is exactly [`schema`]; this type exists so
/// provisioning code does not have to go through string field names and [`Value`]
/// wrappers for the common case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadNetworkInfo {
    /// Active operational dataset timestamp.
    pub active_timestamp: u64,
    /// Thread network master key.
    pub master_key: [u8; MASTER_KEY_LEN],
    /// Pre-shared key for the commissioner.
    pub pskc: [u8; PSKC_LEN],
    /// Extended PAN identifier.
    pub extended_pan_id: [u8; EXTENDED_PAN_ID_LEN],
    /// Mesh-local IPv6 prefix.
    pub mesh_prefix: [u8; MESH_PREFIX_LEN],
    /// 16-bit PAN identifier.
    pub pan_id: u16,
    /// Human-readable network name (at most [`NETWORK_NAME_LEN`] UTF-8 bytes).
    pub network_name: String,
    /// Radio channel number.
    pub channel: u8,
}

impl ThreadNetworkInfo {
    /// Encode into the 76-byte on-device layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StringTooLong`] if `network_name` exceeds
    /// [`NETWORK_NAME_LEN`] bytes of UTF-8. The remaining fields are
    /// width-checked by their types and cannot fail validation.
    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        codec::encode(schema(), &self.to_record())
    }

    /// Decode from the 76-byte on-device layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferLengthMismatch`] if `buffer` is not exactly
    /// [`RECORD_LEN`] bytes, or [`Error::InvalidStringData`] if the network
    /// name content is not valid UTF-8.
    pub fn decode(buffer: &[u8]) -> Result<Self, Error> {
        let record = codec::decode(schema(), buffer)?;
        Self::from_record(&record)
    }

    /// Convert to a generic [`Record`] keyed by the schema's field names.
    pub fn to_record(&self) -> Record {
        Record::new()
            .with("ActiveTimestamp", self.active_timestamp)
            .with("MasterKey", self.master_key)
            .with("PSKc", self.pskc)
            .with("ExtendedPanId", self.extended_pan_id)
            .with("MeshPrefix", self.mesh_prefix)
            .with("PanId", self.pan_id as u64)
            .with("NetworkName", self.network_name.as_str())
            .with("Channel", self.channel as u64)
    }

    /// Build from a generic [`Record`], validating each field's presence, kind,
    /// and width.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaMismatch`] if a field is missing, of the wrong
    /// kind, a byte array of the wrong length, or an integer outside its
    /// typed field's range.
    pub fn from_record(record: &Record) -> Result<Self, Error> {
        Ok(ThreadNetworkInfo {
            active_timestamp: get_uint(record, "ActiveTimestamp")?,
            master_key: get_array(record, "MasterKey")?,
            pskc: get_array(record, "PSKc")?,
            extended_pan_id: get_array(record, "ExtendedPanId")?,
            mesh_prefix: get_array(record, "MeshPrefix")?,
            pan_id: get_narrow_uint(record, "PanId")?,
            network_name: get_str(record, "NetworkName")?,
            channel: get_narrow_uint(record, "Channel")?,
        })
    }
}

/// Extract an unsigned integer field from a record.
fn get_uint(record: &Record, field: &str) -> Result<u64, Error> {
    match record.get(field) {
        Some(Value::Uint(v)) => Ok(*v),
        Some(other) => Err(Error::SchemaMismatch {
            field: field.to_string(),
            detail: format!("expected unsigned integer, got {}", other.kind_name()),
        }),
        None => Err(Error::SchemaMismatch {
            field: field.to_string(),
            detail: "missing from record".to_string(),
        }),
    }
}

/// Extract an unsigned integer field and narrow it to the target width.
fn get_narrow_uint<T: TryFrom<u64>>(record: &Record, field: &str) -> Result<T, Error> {
    let v = get_uint(record, field)?;
    T::try_from(v).map_err(|_| Error::SchemaMismatch {
        field: field.to_string(),
        detail: format!("value {v} exceeds the field's integer range"),
    })
}

/// Extract a byte-array field of exactly `N` bytes from a record.
fn get_array<const N: usize>(record: &Record, field: &str) -> Result<[u8; N], Error> {
    let bytes: &Bytes = match record.get(field) {
        Some(Value::Bytes(b)) => b,
        Some(other) => {
            return Err(Error::SchemaMismatch {
                field: field.to_string(),
                detail: format!("expected byte array, got {}", other.kind_name()),
            });
        }
        None => {
            return Err(Error::SchemaMismatch {
                field: field.to_string(),
                detail: "missing from record".to_string(),
            });
        }
    };
    bytes
        .as_ref()
        .try_into()
        .map_err(|_| Error::SchemaMismatch {
            field: field.to_string(),
            detail: format!("expected exactly {N} bytes, got {}", bytes.len()),
        })
}

/// Extract a string field from a record.
fn get_str(record: &Record, field: &str) -> Result<String, Error> {
    match record.get(field) {
        Some(Value::Str(s)) => Ok(s.clone()),
        Some(other) => Err(Error::SchemaMismatch {
            field: field.to_string(),
            detail: format!("expected string, got {}", other.kind_name()),
        }),
        None => Err(Error::SchemaMismatch {
            field: field.to_string(),
            detail: "missing from record".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: the credential set from the provisioning scenario -- timestamp 1,
    /// zeroed keys and prefixes, PAN ID 0x1234, name "Test", channel 15.
    fn sample_info() -> ThreadNetworkInfo {
        ThreadNetworkInfo {
            active_timestamp: 1,
            master_key: [0u8; MASTER_KEY_LEN],
            pskc: [0u8; PSKC_LEN],
            extended_pan_id: [0u8; EXTENDED_PAN_ID_LEN],
            mesh_prefix: [0u8; MESH_PREFIX_LEN],
            pan_id: 0x1234,
            network_name: "Test".to_string(),
            channel: 15,
        }
    }

    // Schema layout is pinned byte for byte.

    #[test]
    fn schema_total_length_is_76() {
        assert_eq!(schema().total_length(), RECORD_LEN);
    }

    #[test]
    fn schema_field_offsets() {
        let offsets: Vec<(&str, usize, usize)> = schema()
            .fields()
            .iter()
            .map(|f| (f.name(), f.offset(), f.width()))
            .collect();
        assert_eq!(
            offsets,
            vec![
                ("ActiveTimestamp", 0, 8),
                ("MasterKey", 8, 16),
                ("PSKc", 24, 16),
                ("ExtendedPanId", 40, 8),
                ("MeshPrefix", 48, 8),
                ("PanId", 56, 2),
                ("NetworkName", 58, 17),
                ("Channel", 75, 1),
            ]
        );
    }

    #[test]
    fn schema_is_a_process_wide_constant() {
        // Repeated calls return the same instance.
        assert!(std::ptr::eq(schema(), schema()));
    }

    // The concrete provisioning scenario: exact byte positions and values.

    #[test]
    fn sample_credentials_encode_to_known_bytes() {
        let buf = sample_info().encode().expect("encode should succeed");
        assert_eq!(buf.len(), RECORD_LEN);

        // Little-endian timestamp: low byte first.
        assert_eq!(buf[0], 0x01);
        assert_eq!(&buf[1..8], &[0u8; 7]);
        // Keys and prefixes are all zero in the sample.
        assert_eq!(&buf[8..56], &[0u8; 48]);
        // Little-endian PAN ID 0x1234.
        assert_eq!(&buf[56..58], &[0x34, 0x12]);
        // "Test" then zero padding to fill the 17-byte name field.
        assert_eq!(&buf[58..62], b"Test");
        assert_eq!(&buf[62..75], &[0u8; 13]);
        // Channel 15.
        assert_eq!(buf[75], 0x0F);
    }

    #[test]
    fn sample_credentials_round_trip() {
        let info = sample_info();
        let buf = info.encode().expect("encode should succeed");
        let decoded = ThreadNetworkInfo::decode(&buf).expect("decode should succeed");
        assert_eq!(decoded, info);
    }

    #[test]
    fn non_zero_keys_round_trip() {
        let mut info = sample_info();
        info.master_key = [0xAA; MASTER_KEY_LEN];
        info.pskc = [0x55; PSKC_LEN];
        info.extended_pan_id = [0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x02, 0x03, 0x04];
        info.mesh_prefix = [0xFD, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01];
        let buf = info.encode().expect("encode should succeed");
        assert_eq!(&buf[8..24], &[0xAA; 16]);
        let decoded = ThreadNetworkInfo::decode(&buf).expect("decode should succeed");
        assert_eq!(decoded, info);
    }

    // Name length boundary: 17 encoded bytes fit, 18 do not.

    #[test]
    fn network_name_of_exactly_17_bytes_fits() {
        let mut info = sample_info();
        info.network_name = "A".repeat(NETWORK_NAME_LEN);
        let buf = info.encode().expect("17-byte name should fit");
        assert_eq!(&buf[58..75], "A".repeat(17).as_bytes());
        let decoded = ThreadNetworkInfo::decode(&buf).expect("decode should succeed");
        assert_eq!(decoded.network_name, info.network_name);
    }

    #[test]
    fn network_name_of_18_bytes_fails() {
        let mut info = sample_info();
        info.network_name = "A".repeat(NETWORK_NAME_LEN + 1);
        let result = info.encode();
        assert!(
            matches!(result, Err(Error::StringTooLong { len: 18, max: 17, .. })),
            "expected StringTooLong, got: {result:?}"
        );
    }

    // Buffer length rejection through the typed API.

    #[test]
    fn decode_rejects_75_byte_buffer() {
        let result = ThreadNetworkInfo::decode(&[0u8; RECORD_LEN - 1]);
        assert!(
            matches!(
                result,
                Err(Error::BufferLengthMismatch {
                    expected: 76,
                    actual: 75,
                })
            ),
            "expected BufferLengthMismatch, got: {result:?}"
        );
    }

    // from_record validation.

    #[test]
    fn from_record_rejects_missing_field() {
        let full = sample_info().to_record();
        let record: Record = full
            .iter()
            .filter(|(name, _)| *name != "PanId")
            .map(|(n, v)| (n.to_string(), v.clone()))
            .collect();
        let result = ThreadNetworkInfo::from_record(&record);
        assert!(
            matches!(result, Err(Error::SchemaMismatch { ref field, .. }) if field == "PanId"),
            "expected SchemaMismatch on PanId, got: {result:?}"
        );
    }

    #[test]
    fn from_record_rejects_wrong_kind() {
        let record = sample_info().to_record().with("Channel", "fifteen");
        let result = ThreadNetworkInfo::from_record(&record);
        assert!(
            matches!(result, Err(Error::SchemaMismatch { ref field, .. }) if field == "Channel"),
            "expected SchemaMismatch on Channel, got: {result:?}"
        );
    }

    #[test]
    fn from_record_rejects_oversized_integer() {
        let record = sample_info().to_record().with("Channel", 300u64);
        let result = ThreadNetworkInfo::from_record(&record);
        assert!(
            matches!(result, Err(Error::SchemaMismatch { ref field, .. }) if field == "Channel"),
            "expected SchemaMismatch on Channel, got: {result:?}"
        );
    }

    #[test]
    fn from_record_rejects_wrong_array_length() {
        let record = sample_info().to_record().with("MasterKey", &[0u8; 15][..]);
        let result = ThreadNetworkInfo::from_record(&record);
        assert!(
            matches!(result, Err(Error::SchemaMismatch { ref field, .. }) if field == "MasterKey"),
            "expected SchemaMismatch on MasterKey, got: {result:?}"
        );
    }

    #[test]
    fn to_record_uses_schema_field_names() {
        let record = sample_info().to_record();
        for field in schema().fields() {
            assert!(
                record.get(field.name()).is_some(),
                "record is missing {}",
                field.name()
            );
        }
        assert_eq!(record.len(), schema().field_count());
    }
}
