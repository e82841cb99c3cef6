//! Query AST subsystem for trackql
//!
//! The boolean query model: operands, operators, the clause tree, and the
//! visitor framework used by every downstream consumer (sanitizer,
//! translator, context narrowing).
//!
//! # Design Principles
//!
//! - Immutable: clause trees are built once per incoming query and never
//!   mutated; rewrites produce new trees
//! - Structural invariants enforced at construction, never at traversal
//!   (`And`/`Or` carry at least two children, `Not` exactly one)
//! - Double dispatch: the AST does not know what visitors do; visitors do
//!   not match on the tree shape themselves

mod builder;
mod clause;
mod collector;
mod errors;
mod operand;
mod operator;
mod visitor;

pub use builder::ClauseBuilder;
pub use clause::{AndClause, Clause, NotClause, OrClause, TerminalClause};
pub use collector::{collect_named_terminals, NamedTerminalCollector};
pub use errors::{StructureError, StructureResult};
pub use operand::{Literal, Operand};
pub use operator::Operator;
pub use visitor::{ClauseVisitor, ClauseWalker};

/// Reserved field id carrying the unique entity identifier.
///
/// Every document in the index holds exactly one value for this field.
pub const ID_FIELD: &str = "id";
