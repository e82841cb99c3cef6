//! Bitset evaluation of translated queries
//!
//! Evaluates an [`IndexQuery`] against one reader snapshot with plain
//! bitset algebra. `must` intersects, `should` unions when no `must` is
//! present (with a `must` it only affects scoring, which this layer does
//! not compute), `must_not` subtracts from everything, so a purely
//! negative boolean evaluates against the full document set.

use std::sync::Arc;

use roaring::RoaringBitmap;

use crate::translate::{BooleanQuery, IndexQuery};

use super::reader::IndexReader;

/// Executes translated queries against one snapshot
pub struct Searcher {
    reader: Arc<dyn IndexReader>,
}

impl Searcher {
    /// Creates a searcher over the given snapshot
    pub fn new(reader: Arc<dyn IndexReader>) -> Self {
        Self { reader }
    }

    /// The underlying snapshot
    pub fn reader(&self) -> &dyn IndexReader {
        self.reader.as_ref()
    }

    /// Returns the bitset of documents matching the query
    pub fn search(&self, query: &IndexQuery) -> RoaringBitmap {
        match query {
            IndexQuery::MatchAll => self.reader.all_docs(),
            IndexQuery::MatchNone => RoaringBitmap::new(),
            IndexQuery::Term { field, value } => self.reader.postings(field, value),
            IndexQuery::Phrase { field, terms } => self.reader.phrase_docs(field, terms),
            IndexQuery::Range {
                field,
                lower,
                upper,
            } => self.reader.docs_in_term_range(field, lower, upper),
            IndexQuery::Boolean(boolean) => self.search_boolean(boolean),
        }
    }

    fn search_boolean(&self, boolean: &BooleanQuery) -> RoaringBitmap {
        let mut matched = if !boolean.must.is_empty() {
            let mut matched = self.search(&boolean.must[0]);
            for query in &boolean.must[1..] {
                matched &= self.search(query);
            }
            matched
        } else if !boolean.should.is_empty() {
            let mut matched = RoaringBitmap::new();
            for query in &boolean.should {
                matched |= self.search(query);
            }
            matched
        } else {
            self.reader.all_docs()
        };

        for query in &boolean.must_not {
            matched -= self.search(query);
        }
        matched
    }
}
