//! Fixed-width big-endian integer readers and the SQLite varint decoder.
//!
//! Grounded in `original_source/src/utils.c` (`read_be16`, `read_be32`,
//! `read_varint` with an explicit `max_len` bound) and in the teacher's use
//! of `byteorder::ReadBytesExt` for the fixed-width reads. The teacher's own
//! varint calls (via the `sqlite_varint` crate, see `record.rs`) do not take
//! a `max_len` and so can read past a slice's end; this is the bug
//! spec.md's Open Questions section calls out explicitly as something to
//! fix rather than carry forward, so this decoder is hand-rolled instead of
//! reusing that crate.

use byteorder::{BigEndian, ByteOrder};

use crate::error::{Error, Result};

pub fn read_be16(bytes: &[u8]) -> Result<u16> {
    if bytes.len() < 2 {
        return Err(Error::ShortInput {
            needed: 2,
            available: bytes.len(),
        });
    }
    Ok(BigEndian::read_u16(bytes))
}

pub fn read_be32(bytes: &[u8]) -> Result<u32> {
    if bytes.len() < 4 {
        return Err(Error::ShortInput {
            needed: 4,
            available: bytes.len(),
        });
    }
    Ok(BigEndian::read_u32(bytes))
}

/// Reads a SQLite varint: 1 to 9 bytes, high-bit continuation for the first
/// eight bytes, the ninth byte contributing all 8 bits.
///
/// Reads at most `min(max_len, 9)` bytes from `bytes`. If no terminating
/// byte (high bit clear) is found within that window and the window was
/// shorter than 9 bytes, returns `bytes_read = 0` to signal the caller that
/// the varint could not be decoded — it does not read past `max_len`.
pub fn read_varint(bytes: &[u8], max_len: usize) -> (u64, usize) {
    let limit = std::cmp::min(max_len, 9).min(bytes.len());
    let mut result: u64 = 0;

    for (i, &byte) in bytes.iter().take(limit).enumerate() {
        if i == 8 {
            // The ninth byte contributes all 8 bits, no continuation check.
            result = (result << 8) | byte as u64;
            return (result, 9);
        }
        result = (result << 7) | (byte & 0x7f) as u64;
        if byte & 0x80 == 0 {
            return (result, i + 1);
        }
    }

    if limit < 9 {
        return (0, 0);
    }
    (result, 9)
}

/// Like [`read_varint`], but returns an `Error::BadVarint` instead of a
/// sentinel `bytes_read == 0` on failure. Most call sites want this.
pub fn read_varint_checked(bytes: &[u8], max_len: usize) -> Result<(u64, usize)> {
    let (value, bytes_read) = read_varint(bytes, max_len);
    if bytes_read == 0 {
        return Err(Error::BadVarint);
    }
    Ok((value, bytes_read))
}
