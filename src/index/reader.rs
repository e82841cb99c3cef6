//! Snapshot reader contract
//!
//! A reader is a stable view of the index at one point in time: once a
//! handle is obtained, nothing it returns changes, regardless of what
//! writers publish concurrently.

use roaring::RoaringBitmap;

use crate::translate::RangeBound;

/// Read access to one index snapshot
pub trait IndexReader: Send + Sync {
    /// Number of documents in the snapshot
    fn num_docs(&self) -> u64;

    /// Bitset of every document in the snapshot
    fn all_docs(&self) -> RoaringBitmap;

    /// Documents holding the exact term in the field; empty if the field
    /// or term is absent
    fn postings(&self, field: &str, term: &str) -> RoaringBitmap;

    /// Documents holding any term of the field within the bounds,
    /// compared lexicographically over the stored representation
    fn docs_in_term_range(
        &self,
        field: &str,
        lower: &RangeBound,
        upper: &RangeBound,
    ) -> RoaringBitmap;

    /// Documents where the terms appear adjacently, in order, in the field
    fn phrase_docs(&self, field: &str, terms: &[String]) -> RoaringBitmap;
}
