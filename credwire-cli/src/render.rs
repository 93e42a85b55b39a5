//! Text rendering for schemas and decoded records.
//!
//! Pure string builders -- no I/O. The `show` and `layout` subcommands print
//! what these functions return.

use credwire::{Endianness, FieldKind, Record, RecordSchema, StringEncoding, Value};

/// Render a decoded record as one row per schema field:
/// name, offset, size, and formatted value.
pub fn field_table(schema: &RecordSchema, record: &Record) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<16} {:>6} {:>4}  {}\n",
        "FIELD", "OFFSET", "SIZE", "VALUE"
    ));
    for field in schema.fields() {
        let value = record
            .get(field.name())
            .map(render_value)
            .unwrap_or_else(|| "<missing>".to_string());
        out.push_str(&format!(
            "{:<16} {:>6} {:>4}  {}\n",
            field.name(),
            field.offset(),
            field.width(),
            value
        ));
    }
    out
}

/// Render a schema's layout as one row per field: name, offset, size, kind.
pub fn layout_table(schema: &RecordSchema) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<16} {:>6} {:>4}  {}\n",
        "FIELD", "OFFSET", "SIZE", "KIND"
    ));
    for field in schema.fields() {
        out.push_str(&format!(
            "{:<16} {:>6} {:>4}  {}\n",
            field.name(),
            field.offset(),
            field.width(),
            kind_label(field.kind())
        ));
    }
    out.push_str(&format!("total: {} bytes\n", schema.total_length()));
    out
}

/// Render a buffer as a conventional hex dump: offset, sixteen hex bytes, and
/// an ASCII gutter with non-printable bytes shown as `.`.
pub fn hex_dump(buf: &[u8]) -> String {
    let mut out = String::new();
    for (i, chunk) in buf.chunks(16).enumerate() {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
        let ascii: String = chunk
            .iter()
            .map(|&b| {
                if (0x20..0x7f).contains(&b) {
                    b as char
                } else {
                    '.'
                }
            })
            .collect();
        out.push_str(&format!(
            "{:08x}  {:<47}  |{}|\n",
            i * 16,
            hex.join(" "),
            ascii
        ));
    }
    out
}

/// Format a single value for the field table: integers in decimal with hex,
/// byte arrays as lowercase hex, strings quoted.
fn render_value(value: &Value) -> String {
    match value {
        Value::Uint(v) => format!("{v} (0x{v:x})"),
        Value::Bytes(b) => hex::encode(b),
        Value::Str(s) => format!("{s:?}"),
    }
}

/// Short human label for a field kind, e.g. `u16 le`, `bytes[16]`, `utf8[17]`.
fn kind_label(kind: FieldKind) -> String {
    match kind {
        FieldKind::UnsignedInt { width, endianness } => {
            let order = match endianness {
                Endianness::Little => "le",
                Endianness::Big => "be",
            };
            format!("u{} {order}", width.bytes() * 8)
        }
        FieldKind::FixedBytes { len } => format!("bytes[{len}]"),
        FieldKind::PaddedString { len, encoding } => {
            let enc = match encoding {
                StringEncoding::Utf8 => "utf8",
                StringEncoding::Ascii => "ascii",
            };
            format!("{enc}[{len}]")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credwire::thread;

    fn sample_record() -> Record {
        Record::new()
            .with("ActiveTimestamp", 1u64)
            .with("MasterKey", [0u8; 16])
            .with("PSKc", [0u8; 16])
            .with("ExtendedPanId", [0u8; 8])
            .with("MeshPrefix", [0u8; 8])
            .with("PanId", 0x1234u64)
            .with("NetworkName", "Test")
            .with("Channel", 15u64)
    }

    // field_table lists every field with its rendered value.

    #[test]
    fn field_table_contains_all_fields_and_values() {
        let table = field_table(thread::schema(), &sample_record());
        assert!(table.contains("ActiveTimestamp"), "got:\n{table}");
        assert!(table.contains("4660 (0x1234)"), "got:\n{table}");
        assert!(table.contains("\"Test\""), "got:\n{table}");
        assert!(table.contains("15 (0xf)"), "got:\n{table}");
        // 16 zero bytes render as 32 hex zeros.
        assert!(table.contains(&"0".repeat(32)), "got:\n{table}");
    }

    #[test]
    fn field_table_has_one_row_per_field_plus_header() {
        let table = field_table(thread::schema(), &sample_record());
        assert_eq!(table.lines().count(), thread::schema().field_count() + 1);
    }

    #[test]
    fn field_table_marks_missing_fields() {
        let table = field_table(thread::schema(), &Record::new());
        assert!(table.contains("<missing>"), "got:\n{table}");
    }

    // layout_table shows offsets, sizes, kinds, and the total.

    #[test]
    fn layout_table_shows_kinds_and_total() {
        let table = layout_table(thread::schema());
        assert!(table.contains("u64 le"), "got:\n{table}");
        assert!(table.contains("u16 le"), "got:\n{table}");
        assert!(table.contains("bytes[16]"), "got:\n{table}");
        assert!(table.contains("utf8[17]"), "got:\n{table}");
        assert!(table.contains("total: 76 bytes"), "got:\n{table}");
    }

    // hex_dump format: offset column, hex bytes, ASCII gutter.

    #[test]
    fn hex_dump_single_line() {
        let dump = hex_dump(b"Test");
        let line = dump.lines().next().expect("one line");
        assert!(line.starts_with("00000000  54 65 73 74"), "got: {line}");
        assert!(line.ends_with("|Test|"), "got: {line}");
        // offset(8) + gap(2) + hex column(47) + gap(2) + |Test|(6)
        assert_eq!(line.len(), 8 + 2 + 47 + 2 + 6);
    }

    #[test]
    fn hex_dump_non_printable_bytes_become_dots() {
        let dump = hex_dump(&[0x00, 0x41, 0xFF]);
        assert!(dump.contains("00 41 ff"), "got:\n{dump}");
        assert!(dump.contains("|.A.|"), "got:\n{dump}");
    }

    #[test]
    fn hex_dump_offsets_advance_by_16() {
        let dump = hex_dump(&[0u8; 20]);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("00000000"), "got: {}", lines[0]);
        assert!(lines[1].starts_with("00000010"), "got: {}", lines[1]);
    }

    // kind labels.

    #[test]
    fn kind_labels() {
        assert_eq!(kind_label(FieldKind::uint8()), "u8 le");
        assert_eq!(kind_label(FieldKind::uint16_be()), "u16 be");
        assert_eq!(kind_label(FieldKind::fixed_bytes(8)), "bytes[8]");
        assert_eq!(kind_label(FieldKind::padded_ascii(4)), "ascii[4]");
    }
}
