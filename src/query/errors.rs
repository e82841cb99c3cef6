//! # Query AST Errors
//!
//! Construction-time structural errors. These indicate programmer error
//! (a malformed tree being assembled), not user input problems.

use thiserror::Error;

/// Result type for AST construction
pub type StructureResult<T> = Result<T, StructureError>;

/// Structural invariant violations raised at construction time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    /// A composite clause was built with fewer children than it requires
    #[error("{kind} clause requires at least two children, got {got}")]
    TooFewChildren {
        /// Composite kind ("AND" or "OR")
        kind: &'static str,
        /// Number of children actually supplied
        got: usize,
    },
}
