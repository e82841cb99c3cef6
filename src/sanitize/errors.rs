//! # Sanitizer Errors
//!
//! Permission denial is never an error here. The only failure is a field
//! with no registered capability: that indicates index corruption or a
//! plugin removal, so the whole query aborts instead of being partially
//! dropped.

use thiserror::Error;

use crate::registry::RegistryError;

/// Result type for sanitization
pub type SanitizeResult<T> = Result<T, SanitizeError>;

/// Sanitizer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanitizeError {
    /// The clause references a field the registry has never seen
    #[error("cannot sanitize clause over unregistered field '{field_id}'")]
    UnknownField {
        /// The unknown field id
        field_id: String,
    },
}

impl From<RegistryError> for SanitizeError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::UnknownField { field_id }
            | RegistryError::DuplicateField { field_id } => {
                SanitizeError::UnknownField { field_id }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_conversion() {
        let err: SanitizeError = RegistryError::unknown_field("ghost").into();
        assert_eq!(
            err,
            SanitizeError::UnknownField {
                field_id: "ghost".to_string()
            }
        );
    }
}
