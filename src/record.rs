//! Decodes a leaf-table cell into a rowid and its record's column values.
//!
//! A leaf-table cell is, in order: a varint payload length, a varint
//! rowid, and the record itself (a varint header length, a list of
//! varint serial types, then the column payloads back to back). Grounded
//! in the teacher's `record.rs` (`HeaderIterator`/`ValueIterator`) for the
//! two-pass header-then-values shape, and in
//! `original_source/src/cell.c`'s `parse_cell` for the bounds-checking and
//! dynamic-growth structure of the serial-type list (`capacity = 16`,
//! doubled on overflow).
//!
//! Overflow pages are never chased (§1 Non-goals) — a cell whose payload
//! claims more bytes than fit on this page is reported as [`Error::Truncated`]
//! rather than aborting the whole page decode, per spec.md §4.4/§7.

use crate::error::{Error, Result};
use crate::primitives::read_varint_checked;
use crate::value::{self, ColumnValue};

/// One decoded leaf-table cell: a rowid and its column values, in
/// declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub rowid: i64,
    pub values: Vec<ColumnValue>,
}

/// Decodes the leaf-table cell starting at `cell[0]`. `cell` is the slice
/// of the page from the cell's pointer to the end of the page (the cell's
/// own length is not known ahead of time; it's carried in the payload-length
/// varint).
pub fn decode_leaf_table_cell(cell: &[u8]) -> Result<Record> {
    let (payload_len, n1) = read_varint_checked(cell, cell.len())?;
    let rest = &cell[n1..];
    let (rowid, n2) = read_varint_checked(rest, rest.len())?;
    let rest = &rest[n2..];

    let rowid = rowid as i64;

    // No overflow-page chasing: if the declared payload doesn't fit in
    // what remains of the page, the cell is truncated rather than partially
    // decoded from a page that isn't there.
    if payload_len as usize > rest.len() {
        return Err(Error::Truncated(Some(rowid)));
    }
    let payload = &rest[..payload_len as usize];

    // decode_record reports its own truncations with rowid `None`, since
    // it doesn't know it; attach the rowid we already have here.
    let values = decode_record(payload).map_err(|e| match e {
        Error::Truncated(_) => Error::Truncated(Some(rowid)),
        other => other,
    })?;
    Ok(Record { rowid, values })
}

/// Decodes a record body (header-length varint, serial-type varints,
/// column payloads) into column values.
fn decode_record(payload: &[u8]) -> Result<Vec<ColumnValue>> {
    let (header_size, n) = read_varint_checked(payload, payload.len())?;
    if header_size as usize > payload.len() {
        return Err(Error::Truncated(None));
    }
    let header = &payload[n..header_size as usize];
    let body = &payload[header_size as usize..];

    let mut serial_types = Vec::with_capacity(16);
    let mut pos = 0;
    while pos < header.len() {
        let (serial_type, consumed) = read_varint_checked(&header[pos..], header.len() - pos)?;
        serial_types.push(serial_type);
        pos += consumed;
    }

    let mut values = Vec::with_capacity(serial_types.len());
    let mut offset = 0;
    for serial_type in serial_types {
        let size = value::content_size(serial_type);
        if offset + size > body.len() {
            return Err(Error::Truncated(None));
        }
        values.push(value::decode(serial_type, &body[offset..offset + size]));
        offset += size;
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn varint(v: u64) -> Vec<u8> {
        assert!(v < 128);
        vec![v as u8]
    }

    /// Builds a minimal leaf-table cell with columns (text="Foo", int=7).
    fn sample_cell() -> Vec<u8> {
        let body_header = {
            let mut h = Vec::new();
            h.extend(varint(19)); // serial type for 3-byte text
            h.extend(varint(1)); // serial type for 1-byte int
            h
        };
        let header_size = 1 + body_header.len(); // +1 for its own varint
        let mut record = Vec::new();
        record.extend(varint(header_size as u64));
        record.extend(&body_header);
        record.extend(b"Foo");
        record.push(7);

        let mut cell = Vec::new();
        cell.extend(varint(record.len() as u64)); // payload length
        cell.extend(varint(42)); // rowid
        cell.extend(&record);
        cell
    }

    #[test]
    fn decodes_text_and_int_columns() {
        let cell = sample_cell();
        let rec = decode_leaf_table_cell(&cell).unwrap();
        assert_eq!(rec.rowid, 42);
        assert_eq!(
            rec.values,
            vec![
                ColumnValue::Text(b"Foo".to_vec()),
                ColumnValue::Int(7),
            ]
        );
    }

    #[test]
    fn truncated_payload_is_a_soft_error() {
        let mut cell = sample_cell();
        cell.truncate(cell.len() - 2); // chop off the tail of the record
        assert_eq!(decode_leaf_table_cell(&cell), Err(Error::Truncated(Some(42))));
    }

    #[test]
    fn empty_record_decodes_to_no_columns() {
        let mut cell = Vec::new();
        cell.extend(varint(1)); // payload length: just the header-size varint
        cell.extend(varint(99)); // rowid
        cell.extend(varint(1)); // header size = 1 (no serial types)
        let rec = decode_leaf_table_cell(&cell).unwrap();
        assert_eq!(rec.rowid, 99);
        assert!(rec.values.is_empty());
    }

    #[test]
    fn constants_and_nulls_take_no_body_bytes() {
        let mut header = Vec::new();
        header.extend(varint(0)); // NULL
        header.extend(varint(8)); // constant 0
        header.extend(varint(9)); // constant 1
        let header_size = 1 + header.len();
        let mut record = Vec::new();
        record.extend(varint(header_size as u64));
        record.extend(&header);

        let mut cell = Vec::new();
        cell.extend(varint(record.len() as u64));
        cell.extend(varint(5));
        cell.extend(&record);

        let rec = decode_leaf_table_cell(&cell).unwrap();
        assert_eq!(
            rec.values,
            vec![ColumnValue::Null, ColumnValue::Zero, ColumnValue::One]
        );
    }
}
