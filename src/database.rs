//! The top-level facade: opens a file, decodes its header, and offers
//! page-at-a-time and schema-at-a-glance views over it.
//!
//! Grounded in the teacher's `StoredDb`/`Pager` pair, collapsed into one
//! type since this crate never has to cache or evict pages (§5: the whole
//! file is read into memory up front, once, by [`ByteView`]).

use crate::btree::header::{self, BtreePageHeader};
use crate::byteview::ByteView;
use crate::dbheader::{self, DbHeader};
use crate::error::{Error, Result};
use crate::record::{self, Record};
use crate::schema::{self, SchemaEntry};

/// An opened SQLite file: its header, plus every page's b-tree header,
/// decoded eagerly at open time (§4.6/§8: `open` fails if any page's
/// header is malformed, rather than deferring that failure to whichever
/// page happens to be requested first).
#[derive(Debug)]
pub struct Database {
    file: ByteView,
    pub header: DbHeader,
    pub page_headers: Vec<BtreePageHeader>,
}

/// One decoded b-tree page: its header and, for leaf-table pages, its
/// decoded cells. A cell that fails to decode (e.g. [`Error::Truncated`])
/// is reported alongside the successfully decoded ones rather than
/// aborting the whole page — per spec.md §4.7, a malformed cell is
/// localized damage.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub page_num: usize,
    pub header: BtreePageHeader,
    pub cells: Vec<std::result::Result<Record, Error>>,
}

impl Database {
    /// Opens `path`, reading the whole file into memory, decoding its
    /// 100-byte header, and then decoding every page's b-tree header. A
    /// malformed page header anywhere in the file fails `open` itself,
    /// rather than surfacing only when that page is later requested.
    pub fn open(path: &str) -> Result<Database> {
        let file = ByteView::open(path)?;
        let header = dbheader::decode(file.as_slice())?;
        log::debug!(
            "opened {path}: page_size={} pages={}",
            header.page_size,
            header.header_db_size
        );

        let page_count = compute_page_count(&header, file.len());
        let mut page_headers = Vec::with_capacity(page_count);
        for page_index in 0..page_count {
            page_headers.push(header::decode(
                file.as_slice(),
                page_index,
                header.page_size,
                header.reserved_space,
            )?);
        }

        Ok(Database {
            file,
            header,
            page_headers,
        })
    }

    /// The number of pages implied by the file's length and page size.
    /// Falls back to the file length when `header_db_size` is 0, which
    /// older SQLite versions leave unset (§4.2).
    pub fn page_count(&self) -> usize {
        self.page_headers.len()
    }

    /// Decodes the cells of page `page_num` (1-based, matching SQLite's
    /// own numbering) from its already-decoded header.
    pub fn page(&self, page_num: usize) -> Result<Page> {
        let page_index = page_num - 1;
        let hdr = self.page_headers[page_index].clone();

        let page_start = page_index * self.header.page_size as usize;
        let page_end = std::cmp::min(page_start + self.header.page_size as usize, self.file.len());
        let cells = if hdr.page_type.is_leaf_table() {
            hdr.cell_pointers
                .iter()
                .map(|&ptr| {
                    let cell_start = page_start + ptr as usize;
                    let cell = self.file.slice(cell_start, page_end.saturating_sub(cell_start))?;
                    record::decode_leaf_table_cell(cell)
                })
                .collect()
        } else {
            Vec::new()
        };

        Ok(Page {
            page_num,
            header: hdr,
            cells,
        })
    }

    /// Decodes every page's cells, in page-number order.
    pub fn pages(&self) -> Vec<Result<Page>> {
        (1..=self.page_count()).map(|n| self.page(n)).collect()
    }

    /// Scans page 1 and returns every well-formed schema row. Malformed
    /// or short rows are skipped (§4.5), and a cell that fails to decode
    /// at all is logged and skipped rather than aborting the scan.
    pub fn schema(&self) -> Result<Vec<SchemaEntry>> {
        let page1 = self.page(1)?;
        let mut entries = Vec::new();
        for cell in &page1.cells {
            match cell {
                Ok(record) => {
                    if let Some(entry) = schema::from_record(record) {
                        entries.push(entry);
                    }
                }
                Err(e) => log::warn!("skipping undecodable schema cell: {e}"),
            }
        }
        Ok(entries)
    }
}

fn compute_page_count(header: &DbHeader, file_len: usize) -> usize {
    if header.header_db_size != 0 {
        header.header_db_size as usize
    } else {
        file_len / header.page_size as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_db_bytes() -> Vec<u8> {
        let page_size = 512_usize;
        let mut b = vec![0_u8; page_size];
        b[0..16].copy_from_slice(b"SQLite format 3\0");
        b[16..18].copy_from_slice(&(page_size as u16).to_be_bytes());
        b[18] = 1;
        b[19] = 1;
        b[21] = 64;
        b[22] = 32;
        b[23] = 32;
        b[28..32].copy_from_slice(&1_u32.to_be_bytes());
        b[100] = 0x0d; // leaf table, page 1
        b[103..105].copy_from_slice(&0_u16.to_be_bytes()); // 0 cells
        b[105..107].copy_from_slice(&(page_size as u16).to_be_bytes());
        b
    }

    fn open_bytes(bytes: &[u8], name: &str) -> Database {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, bytes).unwrap();
        Database::open(path.to_str().unwrap()).unwrap()
    }

    #[test]
    fn opens_and_decodes_header_and_empty_schema() {
        let db = open_bytes(&minimal_db_bytes(), "sqlitedump_db_test_minimal.db");
        assert_eq!(db.page_count(), 1);
        assert_eq!(db.page_headers.len(), 1);
        assert_eq!(db.schema().unwrap(), Vec::new());
    }

    #[test]
    fn open_fails_when_a_page_header_is_malformed() {
        let mut bytes = minimal_db_bytes();
        let page_size = 512_usize;
        bytes.extend(vec![0_u8; page_size]); // page 2: all zero, type byte 0x00 is invalid
        bytes[28..32].copy_from_slice(&2_u32.to_be_bytes()); // header_db_size = 2
        let path = std::env::temp_dir().join("sqlitedump_db_test_malformed.db");
        std::fs::write(&path, &bytes).unwrap();
        let err = Database::open(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, Error::BadPageType(0)));
    }
}
