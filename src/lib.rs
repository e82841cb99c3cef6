//! trackql - Permission-aware query core for issue trackers
//!
//! Turns a boolean clause tree into a permission-sanitized version of
//! itself and an executable query against an inverted-text index.

pub mod history;
pub mod index;
pub mod observability;
pub mod query;
pub mod registry;
pub mod sanitize;
pub mod translate;
