//! A read-only, whole-file byte view.
//!
//! The decoder never performs I/O itself beyond obtaining this view: every
//! downstream decoder is handed a `&[u8]` (or a sub-slice of one) and never
//! touches the filesystem. Grounded in the teacher's `vfs.rs` (open) and
//! `stored_db.rs` (`StoredDb::open`, which reads every page into memory up
//! front rather than paging on demand).

use std::io::Read;

use crate::error::{Error, Result};

/// Owns the full contents of a database file.
///
/// A `ByteView` is read once at `open` time and never mutated; all decoded
/// values that borrow from it must not outlive it.
#[derive(Debug)]
pub struct ByteView {
    bytes: Vec<u8>,
}

impl ByteView {
    pub fn open(path: &str) -> Result<Self> {
        let mut f = std::fs::File::open(path).map_err(|e| Error::IoFailed(e.to_string()))?;
        let mut bytes = Vec::new();
        f.read_to_end(&mut bytes)
            .map_err(|e| Error::IoFailed(e.to_string()))?;
        Ok(ByteView { bytes })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the `len`-byte slice starting at `offset`, or `ShortInput` if
    /// the view doesn't have that many bytes from `offset`.
    pub fn slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let end = offset.checked_add(len).ok_or(Error::ShortInput {
            needed: len,
            available: self.bytes.len().saturating_sub(offset),
        })?;
        self.bytes.get(offset..end).ok_or(Error::ShortInput {
            needed: len,
            available: self.bytes.len().saturating_sub(offset),
        })
    }
}
