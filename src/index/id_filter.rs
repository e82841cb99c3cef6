//! Explicit-ID restriction filter
//!
//! Builds a document bitset for a known set of entity ids, used to
//! intersect a text search with matches from a non-text source (comment
//! or change-history hits). The index holds exactly one document per
//! entity id; an id with no posting was deleted after the id set was
//! computed and is skipped silently.

use roaring::RoaringBitmap;

use crate::observability::Logger;
use crate::query::ID_FIELD;

use super::reader::IndexReader;

/// Builds restriction bitsets from entity id sets
pub struct IdSetFilter;

impl IdSetFilter {
    /// Sets one bit per id that resolves to exactly one document.
    ///
    /// Ids without a posting are skipped. An id with several postings
    /// breaks the one-document-per-entity invariant; it contributes no
    /// bit and is reported as a warning rather than failing the search.
    pub fn build_filter(
        reader: &dyn IndexReader,
        ids: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> RoaringBitmap {
        let mut bits = RoaringBitmap::new();
        for id in ids {
            let id = id.as_ref();
            let postings = reader.postings(ID_FIELD, id);
            match postings.len() {
                0 => {}
                1 => {
                    if let Some(doc) = postings.min() {
                        bits.insert(doc);
                    }
                }
                count => {
                    Logger::warn(
                        "AMBIGUOUS_ID_POSTINGS",
                        &[("entity_id", id), ("postings", &count.to_string())],
                    );
                }
            }
        }
        bits
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::index::{Document, MemoryIndexWriter, SnapshotSource};
    use crate::registry::FieldRegistry;

    fn reader_with_ids(ids: &[&str]) -> Arc<dyn IndexReader> {
        let mut writer = MemoryIndexWriter::new(Arc::new(FieldRegistry::new()));
        for id in ids {
            writer.add_document(&Document::new(*id)).unwrap();
        }
        writer.commit();
        writer.source().open_snapshot()
    }

    #[test]
    fn test_missing_ids_skip_silently() {
        let reader = reader_with_ids(&["100", "101"]);

        let bits = IdSetFilter::build_filter(reader.as_ref(), ["100", "101", "999"]);
        assert_eq!(bits.len(), 2);
    }

    #[test]
    fn test_empty_id_set_builds_empty_filter() {
        let reader = reader_with_ids(&["100"]);
        let ids: [&str; 0] = [];
        assert!(IdSetFilter::build_filter(reader.as_ref(), ids).is_empty());
    }

    #[test]
    fn test_duplicate_postings_contribute_no_bit() {
        // Two documents under one entity id: the invariant is broken and
        // the id must not select either document
        let reader = reader_with_ids(&["100", "100", "101"]);

        let bits = IdSetFilter::build_filter(reader.as_ref(), ["100", "101"]);
        assert_eq!(bits.len(), 1);
        assert!(bits.contains(2));
    }
}
