//! In-memory inverted index
//!
//! Field/term postings with positions, ordered terms per field for range
//! scans, and a writer that publishes immutable snapshots on commit.
//! Values pass through the same analysis functions the translator uses,
//! routed by the registered indexers of each field.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::{Arc, RwLock};

use roaring::RoaringBitmap;

use crate::observability::Logger;
use crate::query::ID_FIELD;
use crate::registry::{FieldRegistry, IndexedKind, Indexer, RegistryResult};
use crate::translate::{
    analyzed_tokens, exact_tokens, keyword_term, sortable_date, sortable_number, sortable_term,
    RangeBound, NONEMPTY_FIELD,
};

use super::document::{Document, FieldValue};
use super::reader::IndexReader;
use super::searcher_cache::SnapshotSource;

/// Posting list of one term in one field
#[derive(Debug, Clone, Default)]
struct Postings {
    docs: RoaringBitmap,
    /// Token positions per document, for phrase matching
    positions: HashMap<u32, Vec<u32>>,
}

/// One immutable index snapshot
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex {
    /// field -> ordered term -> postings
    fields: HashMap<String, BTreeMap<String, Postings>>,
    docs: RoaringBitmap,
}

impl MemoryIndex {
    fn insert_term(&mut self, field: &str, term: String, doc: u32) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .entry(term)
            .or_default()
            .docs
            .insert(doc);
    }

    fn insert_positional(&mut self, field: &str, term: String, doc: u32, position: u32) {
        let postings = self
            .fields
            .entry(field.to_string())
            .or_default()
            .entry(term)
            .or_default();
        postings.docs.insert(doc);
        postings.positions.entry(doc).or_default().push(position);
    }
}

impl IndexReader for MemoryIndex {
    fn num_docs(&self) -> u64 {
        self.docs.len()
    }

    fn all_docs(&self) -> RoaringBitmap {
        self.docs.clone()
    }

    fn postings(&self, field: &str, term: &str) -> RoaringBitmap {
        self.fields
            .get(field)
            .and_then(|terms| terms.get(term))
            .map(|postings| postings.docs.clone())
            .unwrap_or_default()
    }

    fn docs_in_term_range(
        &self,
        field: &str,
        lower: &RangeBound,
        upper: &RangeBound,
    ) -> RoaringBitmap {
        let terms = match self.fields.get(field) {
            Some(terms) => terms,
            None => return RoaringBitmap::new(),
        };

        let lower_bound: Bound<&str> = match lower {
            RangeBound::Unbounded => Bound::Unbounded,
            RangeBound::Inclusive(term) => Bound::Included(term.as_str()),
            RangeBound::Exclusive(term) => Bound::Excluded(term.as_str()),
        };
        let upper_bound: Bound<&str> = match upper {
            RangeBound::Unbounded => Bound::Unbounded,
            RangeBound::Inclusive(term) => Bound::Included(term.as_str()),
            RangeBound::Exclusive(term) => Bound::Excluded(term.as_str()),
        };

        let mut matched = RoaringBitmap::new();
        for (_, postings) in terms.range::<str, _>((lower_bound, upper_bound)) {
            matched |= &postings.docs;
        }
        matched
    }

    fn phrase_docs(&self, field: &str, terms: &[String]) -> RoaringBitmap {
        if terms.is_empty() {
            return RoaringBitmap::new();
        }

        let field_terms = match self.fields.get(field) {
            Some(field_terms) => field_terms,
            None => return RoaringBitmap::new(),
        };
        let mut term_postings = Vec::with_capacity(terms.len());
        for term in terms {
            match field_terms.get(term) {
                Some(postings) => term_postings.push(postings),
                None => return RoaringBitmap::new(),
            }
        }

        // Candidates hold every term; positions decide adjacency
        let mut candidates = term_postings[0].docs.clone();
        for postings in &term_postings[1..] {
            candidates &= &postings.docs;
        }

        let mut matched = RoaringBitmap::new();
        for doc in candidates {
            let starts = match term_postings[0].positions.get(&doc) {
                Some(starts) => starts,
                None => continue,
            };
            let consecutive = starts.iter().any(|start| {
                term_postings.iter().enumerate().skip(1).all(|(i, postings)| {
                    postings
                        .positions
                        .get(&doc)
                        .map(|positions| positions.contains(&(start + i as u32)))
                        .unwrap_or(false)
                })
            });
            if consecutive {
                matched.insert(doc);
            }
        }
        matched
    }
}

/// Index writer building the next snapshot.
///
/// Mutations accumulate in a live index invisible to readers; `commit`
/// publishes an immutable copy that subsequent snapshot opens observe.
pub struct MemoryIndexWriter {
    registry: Arc<FieldRegistry>,
    live: MemoryIndex,
    next_doc: u32,
    published: Arc<RwLock<Arc<MemoryIndex>>>,
}

impl MemoryIndexWriter {
    /// Creates a writer routing values through the registry's indexers
    pub fn new(registry: Arc<FieldRegistry>) -> Self {
        Self {
            registry,
            live: MemoryIndex::default(),
            next_doc: 0,
            published: Arc::new(RwLock::new(Arc::new(MemoryIndex::default()))),
        }
    }

    /// Adds one document to the pending snapshot.
    ///
    /// Every field must be registered; the entity id lands verbatim in
    /// the reserved id field.
    pub fn add_document(&mut self, document: &Document) -> RegistryResult<()> {
        let doc = self.next_doc;
        self.next_doc += 1;

        self.live.docs.insert(doc);
        self.live
            .insert_term(ID_FIELD, document.id().to_string(), doc);

        for (field_id, value) in document.fields() {
            let capability = self.registry.lookup(field_id)?;
            for indexer in self.registry.resolve_indexers(&capability) {
                Self::apply_indexer(&mut self.live, doc, &indexer, value);
            }
        }
        Ok(())
    }

    fn apply_indexer(index: &mut MemoryIndex, doc: u32, indexer: &Indexer, value: &FieldValue) {
        match &indexer.kind {
            IndexedKind::Text { exact_field } => {
                let text = Self::value_text(value);
                for (position, token) in analyzed_tokens(&text).into_iter().enumerate() {
                    index.insert_positional(&indexer.index_field, token, doc, position as u32);
                }
                for (position, token) in exact_tokens(&text).into_iter().enumerate() {
                    index.insert_positional(exact_field, token, doc, position as u32);
                }
            }
            IndexedKind::Keyword => {
                index.insert_term(&indexer.index_field, keyword_term(&Self::value_text(value)), doc);
            }
            IndexedKind::Sortable => {
                let term = match value {
                    FieldValue::Number(n) => sortable_number(*n),
                    FieldValue::Date(d) => sortable_date(*d),
                    FieldValue::Text(s) => sortable_term(s),
                };
                index.insert_term(&indexer.index_field, term, doc);
            }
        }
        // Presence marker for emptiness tests and negative operators
        index.insert_term(NONEMPTY_FIELD, indexer.index_field.clone(), doc);
    }

    fn value_text(value: &FieldValue) -> String {
        match value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Date(d) => sortable_date(*d),
        }
    }

    /// Publishes the pending state as the new current snapshot
    pub fn commit(&mut self) {
        let snapshot = Arc::new(self.live.clone());
        let documents = snapshot.num_docs().to_string();
        *self.published.write().unwrap() = snapshot;
        Logger::info("INDEX_COMMIT", &[("documents", documents.as_str())]);
    }

    /// A snapshot source handing out the currently published snapshot
    pub fn source(&self) -> MemorySnapshotSource {
        MemorySnapshotSource {
            published: Arc::clone(&self.published),
        }
    }
}

/// Opens the writer's currently published snapshot
#[derive(Clone)]
pub struct MemorySnapshotSource {
    published: Arc<RwLock<Arc<MemoryIndex>>>,
}

impl SnapshotSource for MemorySnapshotSource {
    fn open_snapshot(&self) -> Arc<dyn IndexReader> {
        Arc::clone(&*self.published.read().unwrap()) as Arc<dyn IndexReader>
    }
}
