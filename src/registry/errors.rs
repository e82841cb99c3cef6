//! # Registry Errors
//!
//! `DuplicateField` is fatal at system/plugin-load time; `UnknownField`
//! surfaces later, when a query references a field the registry never saw,
//! and aborts that whole query (it usually means index corruption or a
//! removed plugin, not a benign gap).

use thiserror::Error;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Field registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A field id was registered twice
    #[error("field '{field_id}' is already registered")]
    DuplicateField {
        /// The conflicting field id
        field_id: String,
    },

    /// A field id has no registered capability
    #[error("field '{field_id}' is not registered")]
    UnknownField {
        /// The unknown field id
        field_id: String,
    },
}

impl RegistryError {
    /// Create a duplicate-field error
    pub fn duplicate_field(field_id: impl Into<String>) -> Self {
        RegistryError::DuplicateField {
            field_id: field_id.into(),
        }
    }

    /// Create an unknown-field error
    pub fn unknown_field(field_id: impl Into<String>) -> Self {
        RegistryError::UnknownField {
            field_id: field_id.into(),
        }
    }
}
