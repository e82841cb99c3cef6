//! Clause permission sanitizer for trackql
//!
//! Rewrites a clause tree so it only references what the requesting
//! principal may query. Denial is silent narrowing: an unauthorized
//! sub-clause is dropped or neutralized, never reported, so a failing
//! query can never leak the existence of restricted data.
//!
//! # Invariants
//!
//! - Sanitization rebuilds; the input tree is never mutated
//! - Output composites always satisfy the arity invariants (>= 2 children
//!   for AND/OR, exactly 1 for NOT)
//! - Sanitizing an already-sanitized tree is the identity
//! - The only hard failure is an unregistered field (`UnknownField`),
//!   which aborts the whole query

mod errors;
mod oracle;
mod sanitizer;

pub use errors::{SanitizeError, SanitizeResult};
pub use oracle::{
    ClausePermissionHandler, PermissionOracle, Principal, SanitizedTerminal, VisibleFieldsOracle,
};
pub use sanitizer::ClauseSanitizer;
