//! Recovers the schema table (`sqlite_schema`) from page 1's leaf cells.
//!
//! Page 1 is always the root of the schema b-tree (§4.5); each of its
//! records is a 5-column row `(type, name, tbl_name, rootpage, sql)`.
//! Grounded in the teacher's `lib.rs` schema constants
//! (`SCHEMA_TABLE_TBL_NAME_COLIDX` etc.) for the column layout, and in
//! `original_source/src/schema.c`'s `parse_schema_cell` for skip-on-short-row
//! behavior and for accepting any integer-bearing serial type (including
//! the 0/1 constants) as `rootpage`.

use crate::record::Record;
use crate::value::ColumnValue;

const COL_TYPE: usize = 0;
const COL_NAME: usize = 1;
const COL_TBL_NAME: usize = 2;
const COL_ROOTPAGE: usize = 3;
const COL_SQL: usize = 4;
const SCHEMA_ROW_COLUMNS: usize = 5;

/// One row of the schema table: a table, index, view, or trigger
/// definition. Per spec.md §3, any of the text columns may independently
/// be null — that's a property of this particular row, not a malformed
/// one, so `kind`/`name`/`tbl_name` are optional rather than required.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SchemaEntry {
    pub kind: Option<String>,
    pub name: Option<String>,
    pub tbl_name: Option<String>,
    pub rootpage: i64,
    pub sql: Option<String>,
}

/// Builds a `SchemaEntry` from a decoded page-1 record. Rows with fewer
/// than the 5 expected columns are skipped (returns `None`) rather than
/// erroring the whole schema scan, matching `parse_schema_cell`'s
/// short-row handling in the original; a null text column within an
/// otherwise-complete row is kept, not skipped.
pub fn from_record(record: &Record) -> Option<SchemaEntry> {
    if record.values.len() < SCHEMA_ROW_COLUMNS {
        return None;
    }

    let kind = as_text(&record.values[COL_TYPE]);
    let name = as_text(&record.values[COL_NAME]);
    let tbl_name = as_text(&record.values[COL_TBL_NAME]);
    let rootpage = as_int(&record.values[COL_ROOTPAGE]).unwrap_or(0);
    let sql = as_text(&record.values[COL_SQL]);

    Some(SchemaEntry {
        kind,
        name,
        tbl_name,
        rootpage,
        sql,
    })
}

fn as_text(v: &ColumnValue) -> Option<String> {
    match v {
        ColumnValue::Text(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        _ => None,
    }
}

/// Accepts any integer-bearing serial type as a page number, including the
/// `Zero`/`One` constant encodings — a root page number of 0 or 1 is a
/// value the b-tree layout allows, not a malformed row.
fn as_int(v: &ColumnValue) -> Option<i64> {
    match v {
        ColumnValue::Int(i) => Some(*i),
        ColumnValue::Zero => Some(0),
        ColumnValue::One => Some(1),
        _ => None,
    }
}
