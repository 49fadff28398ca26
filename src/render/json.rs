//! JSON document rendering, shaped after `original_source/src/serializer.c`.
//!
//! `{"header": {...}, "schema": [...], "pages": [{"page_num", "header",
//! "cells": [...]}]}`. Blobs serialize as hex strings rather than raw byte
//! arrays or lossy UTF-8, since they aren't valid text in general.

use serde::Serialize;

use crate::database::Database;
use crate::dbheader::DbHeader;
use crate::error::Result;
use crate::record::Record;
use crate::schema::SchemaEntry;
use crate::value::ColumnValue;

#[derive(Serialize)]
struct Document<'a> {
    header: &'a DbHeader,
    schema: Vec<SchemaEntry>,
    pages: Vec<PageDoc>,
}

#[derive(Serialize)]
struct PageDoc {
    page_num: usize,
    header: crate::btree::header::BtreePageHeader,
    cells: Vec<CellDoc>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum CellDoc {
    Decoded { rowid: i64, values: Vec<JsonValue> },
    Truncated { rowid: Option<i64>, truncated: bool },
}

/// A `ColumnValue` re-shaped for `serde_json`: blobs as hex, everything
/// else as its natural JSON type.
#[derive(Serialize)]
#[serde(untagged)]
enum JsonValue {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    BlobHex(String),
}

impl From<&ColumnValue> for JsonValue {
    fn from(v: &ColumnValue) -> Self {
        match v {
            ColumnValue::Null => JsonValue::Null,
            ColumnValue::Int(i) => JsonValue::Int(*i),
            ColumnValue::Float(x) => JsonValue::Float(*x),
            ColumnValue::Text(bytes) => JsonValue::Text(String::from_utf8_lossy(bytes).into_owned()),
            ColumnValue::Blob(bytes) => JsonValue::BlobHex(hex::encode(bytes)),
            ColumnValue::Zero => JsonValue::Int(0),
            ColumnValue::One => JsonValue::Int(1),
        }
    }
}

impl From<&Record> for CellDoc {
    fn from(r: &Record) -> Self {
        CellDoc::Decoded {
            rowid: r.rowid,
            values: r.values.iter().map(JsonValue::from).collect(),
        }
    }
}

pub fn dump(db: &Database) -> Result<String> {
    let schema = db.schema()?;
    let mut pages = Vec::new();
    for result in db.pages() {
        let page = result?;
        let cells = page
            .cells
            .iter()
            .map(|c| match c {
                Ok(record) => CellDoc::from(record),
                Err(crate::error::Error::Truncated(rowid)) => CellDoc::Truncated {
                    rowid: *rowid,
                    truncated: true,
                },
                Err(_) => CellDoc::Truncated {
                    rowid: None,
                    truncated: true,
                },
            })
            .collect();
        pages.push(PageDoc {
            page_num: page.page_num,
            header: page.header,
            cells,
        });
    }

    let doc = Document {
        header: &db.header,
        schema,
        pages,
    };
    serde_json::to_string_pretty(&doc).map_err(|e| crate::error::Error::IoFailed(e.to_string()))
}
