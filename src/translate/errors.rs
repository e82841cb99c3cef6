//! # Translation Errors
//!
//! Structural problems (`UnknownField`, `TooManyClauses`) are programmer
//! or configuration failures and fail the whole request. User-input
//! problems arrive batched as a `MessageSet` so they can be attached to
//! the originating query field together.

use thiserror::Error;

use crate::registry::RegistryError;

use super::messages::MessageSet;

/// Result type for translation
pub type TranslateResult<T> = Result<T, TranslateError>;

/// Translation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// The clause references a field the registry has never seen
    #[error("cannot translate clause over unregistered field '{field_id}'")]
    UnknownField {
        /// The unknown field id
        field_id: String,
    },

    /// The query is structurally guaranteed to match nothing
    #[error("query cannot match any document: {reason}")]
    UnsatisfiableQuery {
        /// Why the query cannot match
        reason: String,
    },

    /// The translated query exceeds the boolean clause budget
    #[error("query expands to {got} index clauses, limit is {limit}")]
    TooManyClauses {
        /// Clauses the translation produced
        got: usize,
        /// Configured maximum
        limit: usize,
    },

    /// User-input problems, batched for one-pass reporting
    #[error("query validation failed: {0}")]
    Messages(MessageSet),
}

impl From<RegistryError> for TranslateError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::UnknownField { field_id }
            | RegistryError::DuplicateField { field_id } => {
                TranslateError::UnknownField { field_id }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TranslateError::TooManyClauses {
            got: 2048,
            limit: 1024,
        };
        assert_eq!(
            format!("{}", err),
            "query expands to 2048 index clauses, limit is 1024"
        );
    }

    #[test]
    fn test_messages_error_carries_set() {
        let mut set = MessageSet::new();
        set.add_error("bad argument");
        let err = TranslateError::Messages(set.clone());
        assert_eq!(err, TranslateError::Messages(set));
    }
}
