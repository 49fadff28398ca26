//! Error types surfaced by the decoder. One enum for the whole decode
//! path: the decoder is a single architectural layer, not several.

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Could not open or read the database file: {0}")]
    IoFailed(String),
    #[error("The magic bytes at the start of the file are not \"SQLite format 3\\0\".")]
    BadMagic,
    #[error("Expected at least {needed} bytes but only {available} were available.")]
    ShortInput { needed: usize, available: usize },
    #[error("Varint terminator not found within the allowed range.")]
    BadVarint,
    #[error("Unrecognized b-tree page type byte: 0x{0:02x}.")]
    BadPageType(u8),
    #[error("A cell offset, header size, or column payload extends past the page: {0}")]
    BoundsViolation(String),
    /// A cell's payload doesn't fit in what remains of the page, or its
    /// record header/column payloads run past the end of that payload.
    /// Carries the rowid when it was decoded before the truncation was
    /// found, so callers (e.g. the JSON renderer) can still report which
    /// row was cut short.
    #[error("Record decoding reached the end of available bytes before all declared columns were read.")]
    Truncated(Option<i64>),
}

pub type Result<T> = std::result::Result<T, Error>;
