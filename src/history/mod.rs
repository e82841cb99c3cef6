//! History predicate subsystem for trackql
//!
//! A parallel, smaller AST for point-in-time conditions over a field's
//! change timeline ("field had value X during interval"). Structurally it
//! resembles the clause tree; semantically it is independent: it asserts
//! conditions about a change history, not about current state, so it gets
//! its own types and its own visitor contract.

mod predicate;

pub use predicate::{
    AndHistoryPredicate, HistoryPredicate, HistoryPredicateVisitor, TerminalHistoryPredicate,
};
