//! `ColumnValue`: the decoded, tagged-sum representation of one column in
//! one record.
//!
//! Grounded in the teacher's `sql_value.rs` (`SqlValue`), but kept at the
//! storage-class granularity spec.md §3 describes rather than the SQL-type
//! granularity the teacher's query engine needed — `Zero`/`One` stay
//! distinct from `Int` here, since this crate doesn't do the
//! serial-type-to-SQL-type casting the teacher's `serial_type.rs` does (no
//! query execution, no column type affinities to cast against).

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum ColumnValue {
    Null,
    Int(i64),
    Float(f64),
    /// Raw bytes, passed through as-is. The file's declared text encoding
    /// (`DbHeader::db_text_encoding`) is not applied here — no
    /// UTF-16-to-UTF-8 conversion is performed (§1 Non-goals).
    Text(Vec<u8>),
    Blob(Vec<u8>),
    Zero,
    One,
}

impl std::fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnValue::Null => write!(f, "NULL"),
            ColumnValue::Int(i) => write!(f, "{i}"),
            ColumnValue::Float(x) => write!(f, "{x}"),
            ColumnValue::Text(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes)),
            ColumnValue::Blob(bytes) => write!(f, "<BLOB {} bytes>", bytes.len()),
            ColumnValue::Zero => write!(f, "0"),
            ColumnValue::One => write!(f, "1"),
        }
    }
}

/// Returns the on-disk content size in bytes for a serial type, per
/// spec.md §3's table. Valid for every `n` in `[0, 2^64)`, matching the
/// testable property that this agrees with the spec for all
/// `n in [0, 2^16)` and beyond (the formula is uniform past 12).
pub fn content_size(serial_type: u64) -> usize {
    match serial_type {
        0 | 8 | 9 => 0,
        1 => 1,
        2 => 2,
        3 => 3,
        4 => 4,
        5 => 6,
        6 | 7 => 8,
        10 | 11 => 0,
        n if n % 2 == 0 => ((n - 12) / 2) as usize,
        n => ((n - 13) / 2) as usize,
    }
}

/// Decodes `data` (exactly `content_size(serial_type)` bytes) into a
/// `ColumnValue` according to its serial type.
pub fn decode(serial_type: u64, data: &[u8]) -> ColumnValue {
    match serial_type {
        0 => ColumnValue::Null,
        1 => ColumnValue::Int(sign_extend(data)),
        2 => ColumnValue::Int(sign_extend(data)),
        3 => ColumnValue::Int(sign_extend(data)),
        4 => ColumnValue::Int(sign_extend(data)),
        5 => ColumnValue::Int(sign_extend(data)),
        6 => ColumnValue::Int(sign_extend(data)),
        7 => {
            let mut b = [0_u8; 8];
            b.copy_from_slice(data);
            ColumnValue::Float(f64::from_be_bytes(b))
        }
        8 => ColumnValue::Zero,
        9 => ColumnValue::One,
        10 | 11 => ColumnValue::Null, // reserved; never in well-formed files.
        n if n % 2 == 0 => ColumnValue::Blob(data.to_vec()),
        _ => ColumnValue::Text(data.to_vec()),
    }
}

/// Sign-extends a big-endian two's-complement integer of 1, 2, 3, 4, 6, or
/// 8 bytes to `i64`, per spec.md §3/§4.4.
fn sign_extend(data: &[u8]) -> i64 {
    let negative = data[0] & 0x80 != 0;
    let mut bytes = [if negative { 0xff } else { 0x00 }; 8];
    bytes[8 - data.len()..].copy_from_slice(data);
    i64::from_be_bytes(bytes)
}
