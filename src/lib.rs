//! A read-only decoder for the SQLite on-disk file format.
//!
//! Walks the database file header, b-tree page headers, and leaf-table
//! cells, surfacing them as plain Rust values. Does not execute queries,
//! traverse a b-tree across pages, chase overflow pages, or write.

pub mod btree;
pub mod byteview;
pub mod database;
pub mod dbheader;
pub mod error;
pub mod primitives;
pub mod record;
pub mod render;
pub mod schema;
pub mod value;
