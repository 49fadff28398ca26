//! Decodes a single b-tree page header and its cell-pointer array.
//!
//! A b-tree page is divided into regions in this order:
//! 1. The 100-byte database file header (page 1 only).
//! 2. The 8 or 12 byte b-tree page header.
//! 3. The cell pointer array.
//! 4. Unallocated space.
//! 5. The cell content area.
//! 6. The reserved region (usually empty).
//!
//! Grounded in the teacher's `btree/header.rs` (`check_header`) for the
//! header layout and in `btree/cell.rs`'s `Iterator::new` for the
//! cell-pointer array read, generalized here to return bounds-checked
//! results instead of panicking, per spec.md §4.3.

use super::PageType;
use crate::error::{Error, Result};
use crate::primitives::{read_be16, read_be32};

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BtreePageHeader {
    pub page_type: PageType,
    pub first_freeblock: u16,
    pub cell_count: u16,
    pub cell_content_start: u32,
    pub fragmented_free_bytes: u8,
    pub rightmost_pointer: Option<u32>,
    /// Offsets of each cell, relative to the start of the page (not to
    /// `base` — page 1's offsets are relative to file offset 0, even
    /// though its b-tree header starts at file offset 100).
    pub cell_pointers: Vec<u16>,
}

/// Returns the file offset at which page `page_index`'s (0-based) b-tree
/// header begins. Page 1 (index 0) is the only page whose header doesn't
/// start on a `page_size` boundary, because the 100-byte `DbHeader`
/// precedes it.
pub fn base_offset(page_index: usize, page_size: u32) -> usize {
    if page_index == 0 {
        100
    } else {
        page_index * page_size as usize
    }
}

/// Decodes the b-tree header and cell-pointer array for page `page_index`
/// (0-based) out of `file`, the whole-file byte view.
pub fn decode(
    file: &[u8],
    page_index: usize,
    page_size: u32,
    reserved_space: u8,
) -> Result<BtreePageHeader> {
    let page_start = page_index * page_size as usize;
    let base = base_offset(page_index, page_size);

    let type_byte = *file
        .get(base)
        .ok_or(Error::ShortInput {
            needed: base + 1,
            available: file.len(),
        })?;
    let page_type = PageType::from_byte(type_byte).ok_or(Error::BadPageType(type_byte))?;

    let first_freeblock = read_be16(&file[base + 1..])?;
    let cell_count = read_be16(&file[base + 3..])?;
    let cell_content_start = match read_be16(&file[base + 5..])? {
        0 => 65536,
        n => n as u32,
    };
    let fragmented_free_bytes = *file.get(base + 7).ok_or(Error::ShortInput {
        needed: base + 8,
        available: file.len(),
    })?;

    let header_len: usize = if page_type.is_interior() { 12 } else { 8 };
    let rightmost_pointer = if page_type.is_interior() {
        Some(read_be32(&file[base + 8..])?)
    } else {
        None
    };

    let cell_ptr_array_start = base + header_len;
    let mut cell_pointers = Vec::with_capacity(cell_count as usize);
    // On page 1, pointers are page-relative (from file offset 0), so the
    // lower bound must also account for the 100-byte DbHeader preceding
    // the b-tree header there (`base - page_start`).
    let lower_bound = (base - page_start) + header_len + 2 * cell_count as usize;
    let upper_bound = page_size as usize - reserved_space as usize;
    for j in 0..cell_count as usize {
        let off = cell_ptr_array_start + j * 2;
        let pointer = read_be16(&file[off..])?;
        if (pointer as usize) < lower_bound || (pointer as usize) >= upper_bound {
            return Err(Error::BoundsViolation(format!(
                "cell pointer {} on page {} is outside [{}, {})",
                pointer,
                page_index + 1,
                lower_bound,
                upper_bound
            )));
        }
        cell_pointers.push(pointer);
    }

    Ok(BtreePageHeader {
        page_type,
        first_freeblock,
        cell_count,
        cell_content_start,
        fragmented_free_bytes,
        rightmost_pointer,
        cell_pointers,
    })
}
