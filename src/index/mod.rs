//! Index access layer for trackql
//!
//! The query core's view of the inverted index: a snapshot reader trait,
//! an in-memory index with a snapshot-publishing writer, bitset search
//! over translated queries, the explicit-ID restriction filter, and the
//! thread-scoped reader cache.
//!
//! # Design Principles
//!
//! - A reader is a snapshot: writers publish new snapshots, in-flight
//!   readers are never switched mid-read
//! - Document bitsets are roaring bitmaps shared by value
//! - Index-time and query-time analysis are the same pure functions

mod document;
mod id_filter;
mod memory;
mod reader;
mod search;
mod searcher_cache;

pub use document::{Document, FieldValue};
pub use id_filter::IdSetFilter;
pub use memory::{MemoryIndex, MemoryIndexWriter, MemorySnapshotSource};
pub use reader::IndexReader;
pub use search::Searcher;
pub use searcher_cache::{ReaderHandle, SearcherCache, SnapshotSource};
