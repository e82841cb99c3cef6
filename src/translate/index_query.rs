//! Native index query tree
//!
//! The target representation translation produces: boolean combinations
//! of term, phrase and range queries against analyzer-bound index fields.
//! Execution lives with the index access layer; this type only describes.

use serde::{Deserialize, Serialize};

/// One end of a range query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeBound {
    /// No bound on this end
    Unbounded,
    /// Bound included in the match
    Inclusive(String),
    /// Bound excluded from the match
    Exclusive(String),
}

/// Boolean combination of sub-queries.
///
/// `must` intersects, `should` unions (when no `must` is present),
/// `must_not` always subtracts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BooleanQuery {
    /// Required sub-queries (intersection)
    pub must: Vec<IndexQuery>,
    /// Alternative sub-queries (union)
    pub should: Vec<IndexQuery>,
    /// Excluded sub-queries (subtraction)
    pub must_not: Vec<IndexQuery>,
}

impl BooleanQuery {
    /// Creates an empty boolean query
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when only exclusions are present
    pub fn is_purely_negative(&self) -> bool {
        self.must.is_empty() && self.should.is_empty() && !self.must_not.is_empty()
    }
}

/// A node in the native index query tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexQuery {
    /// Matches every document
    MatchAll,
    /// Matches no document
    MatchNone,
    /// Single term in one field
    Term {
        /// Index field searched
        field: String,
        /// Exact term value
        value: String,
    },
    /// Consecutive terms in one field
    Phrase {
        /// Index field searched
        field: String,
        /// Terms that must appear adjacently, in order
        terms: Vec<String>,
    },
    /// Term range over an order-preserving representation
    Range {
        /// Index field searched
        field: String,
        /// Lower end
        lower: RangeBound,
        /// Upper end
        upper: RangeBound,
    },
    /// Boolean combination
    Boolean(BooleanQuery),
}

impl IndexQuery {
    /// Creates a term query
    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        IndexQuery::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates a phrase query
    pub fn phrase(field: impl Into<String>, terms: Vec<String>) -> Self {
        IndexQuery::Phrase {
            field: field.into(),
            terms,
        }
    }

    /// Creates a range query
    pub fn range(field: impl Into<String>, lower: RangeBound, upper: RangeBound) -> Self {
        IndexQuery::Range {
            field: field.into(),
            lower,
            upper,
        }
    }

    /// Creates a must-of boolean query
    pub fn all_of(queries: Vec<IndexQuery>) -> Self {
        IndexQuery::Boolean(BooleanQuery {
            must: queries,
            ..BooleanQuery::new()
        })
    }

    /// Creates a should-of boolean query
    pub fn any_of(queries: Vec<IndexQuery>) -> Self {
        IndexQuery::Boolean(BooleanQuery {
            should: queries,
            ..BooleanQuery::new()
        })
    }

    /// Total number of leaf clauses, for budget enforcement
    pub fn clause_count(&self) -> usize {
        match self {
            IndexQuery::MatchAll
            | IndexQuery::MatchNone
            | IndexQuery::Term { .. }
            | IndexQuery::Phrase { .. }
            | IndexQuery::Range { .. } => 1,
            IndexQuery::Boolean(boolean) => boolean
                .must
                .iter()
                .chain(&boolean.should)
                .chain(&boolean.must_not)
                .map(IndexQuery::clause_count)
                .sum(),
        }
    }
}
