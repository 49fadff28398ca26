//! Rendering back-ends for a decoded [`Database`](crate::database::Database).
//!
//! Two renderers, selected at the CLI boundary (§6): a plain-text dump
//! grounded in the teacher's `formatting.rs`, and a JSON document grounded
//! in `original_source/src/serializer.c`'s shape.

pub mod json;
pub mod text;
