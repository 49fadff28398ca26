//! Plain-text dump of a database: header fields, then one section per
//! page, grounded in the teacher's `formatting.rs` column-table style
//! (`{:15}`-padded cells, `|`-separated).

use std::fmt::Write as _;

use crate::database::Database;
use crate::error::Result;

pub fn dump(db: &Database) -> Result<String> {
    let mut out = String::new();
    write_header(&mut out, db);
    out.push('\n');
    write_schema(&mut out, db)?;
    out.push('\n');
    write_pages(&mut out, db)?;
    Ok(out)
}

fn write_header(out: &mut String, db: &Database) {
    let h = &db.header;
    let _ = writeln!(out, "magic: {}", hex::encode(h.magic));
    let _ = writeln!(out, "page_size: {}", h.page_size);
    let _ = writeln!(out, "file_format_write: {}", h.file_format_write);
    let _ = writeln!(out, "file_format_read: {}", h.file_format_read);
    let _ = writeln!(out, "reserved_space: {}", h.reserved_space);
    let _ = writeln!(out, "file_change_counter: {}", h.file_change_counter);
    let _ = writeln!(out, "header_db_size: {}", h.header_db_size);
    let _ = writeln!(out, "schema_cookie: {}", h.schema_cookie);
    let _ = writeln!(out, "schema_format_number: {}", h.schema_format_number);
    let _ = writeln!(out, "db_text_encoding: {}", h.db_text_encoding);
    let _ = writeln!(out, "user_version: {}", h.user_version);
    let _ = writeln!(out, "application_id: {}", h.application_id);
    let _ = writeln!(out, "sqlite_version_number: {}", h.sqlite_version_number);
}

fn write_schema(out: &mut String, db: &Database) -> Result<()> {
    let entries = db.schema()?;
    let _ = writeln!(out, "schema:");
    for e in entries {
        let _ = writeln!(
            out,
            "   | {:15} | {:15} | {:15} | {:6} |",
            e.kind.as_deref().unwrap_or("NULL"),
            e.name.as_deref().unwrap_or("NULL"),
            e.tbl_name.as_deref().unwrap_or("NULL"),
            e.rootpage
        );
    }
    Ok(())
}

fn write_pages(out: &mut String, db: &Database) -> Result<()> {
    for result in db.pages() {
        let page = result?;
        let _ = writeln!(
            out,
            "page {}: type={:?} cells={}",
            page.page_num, page.header.page_type, page.header.cell_count
        );
        for cell in &page.cells {
            match cell {
                Ok(record) => {
                    let mut row = format!("{:5} |", record.rowid);
                    for v in &record.values {
                        let _ = write!(row, " {:15} |", v);
                    }
                    let _ = writeln!(out, "   | {row}");
                }
                Err(crate::error::Error::Truncated(rowid)) => {
                    let _ = writeln!(
                        out,
                        "   | {:5} | Truncated",
                        rowid.map(|r| r.to_string()).unwrap_or_default()
                    );
                }
                Err(_) => {
                    let _ = writeln!(out, "   | Truncated");
                }
            }
        }
    }
    Ok(())
}
