//! Index query translation subsystem for trackql
//!
//! Converts a sanitized clause tree into the index engine's native query
//! representation. Callers must sanitize first; translating an
//! un-sanitized tree is a caller error, not something this module detects.
//!
//! # Design Principles
//!
//! - Phrase-exactness dichotomy: a quote-delimited literal searches the
//!   not-stemmed exact sub-field; an unquoted literal searches the
//!   analyzed default sub-field. Selection depends on the quote flag
//!   alone, never on content.
//! - Relational and temporal operators bypass text analysis entirely and
//!   become range queries over raw order-preserving representations.
//! - Function operands are expanded into literals by the registered
//!   resolution collaborator before any index query is built; problems
//!   are collected into one message set so every issue reaches the user
//!   in a single pass.

mod analysis;
mod errors;
mod functions;
mod index_query;
mod messages;
mod translator;

pub use analysis::{
    analyzed_tokens, exact_tokens, keyword_term, parse_date, sortable_date, sortable_number,
    sortable_term, stem, tokenize,
};
pub use errors::{TranslateError, TranslateResult};
pub use functions::{FunctionExpansion, FunctionImpl, FunctionResolver, FunctionTable, NoFunctions};
pub use index_query::{BooleanQuery, IndexQuery, RangeBound};
pub use messages::MessageSet;
pub use translator::{QueryTranslator, TranslateConfig};

/// Marker field recording which document fields hold a value.
///
/// For every field an indexer writes, the writer also adds a term equal to
/// that field's name under this marker field; emptiness tests (`is` /
/// `is not` EMPTY, the presence guard of negative operators) query it.
pub const NONEMPTY_FIELD: &str = "_nonempty";
