//! Field capability descriptors
//!
//! An `Indexer` names one write-time strategy: which document field it
//! populates and how that field is searched. Text fields expose two
//! analyzer-bound sub-fields (the analyzed default and a not-stemmed exact
//! variant); keyword fields hold whole lowercased values; sortable fields
//! hold raw order-preserving representations for range queries.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Whether a field is part of the core system or plugin-defined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldGroup {
    /// Core field, fixed indexers
    System,
    /// Plugin-defined field, indexers resolved dynamically
    Custom,
}

/// How an indexed field variant is analyzed and searched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexedKind {
    /// Analyzed text with a parallel not-stemmed exact sub-field
    Text {
        /// The exact (not-stemmed) sub-field name
        exact_field: String,
    },
    /// Whole-value term, lowercased, no analysis
    Keyword,
    /// Raw order-preserving representation, range-comparable
    Sortable,
}

/// One write-time indexing strategy for a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indexer {
    /// Indexer id, unique per field
    pub id: String,
    /// Document field this indexer populates
    pub index_field: String,
    /// Analysis and search behavior of that field
    pub kind: IndexedKind,
}

impl Indexer {
    /// Creates a text indexer; the exact sub-field is derived as
    /// `<field>.exact`
    pub fn text(id: impl Into<String>, index_field: impl Into<String>) -> Self {
        let index_field = index_field.into();
        let exact_field = format!("{}.exact", index_field);
        Self {
            id: id.into(),
            index_field,
            kind: IndexedKind::Text { exact_field },
        }
    }

    /// Creates a keyword indexer
    pub fn keyword(id: impl Into<String>, index_field: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            index_field: index_field.into(),
            kind: IndexedKind::Keyword,
        }
    }

    /// Creates a sortable indexer
    pub fn sortable(id: impl Into<String>, index_field: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            index_field: index_field.into(),
            kind: IndexedKind::Sortable,
        }
    }
}

/// Accessor closure asking a live custom-field definition for its current
/// indexer set. Stored instead of a back-reference to the definition
/// itself, so the registry holds no aliased mutable state.
pub type IndexerResolver = Arc<dyn Fn() -> Vec<Indexer> + Send + Sync>;

/// How a capability obtains its indexers
#[derive(Clone)]
pub(crate) enum IndexerSource {
    /// Fixed at registration time (system fields)
    Fixed(Vec<Indexer>),
    /// Re-queried from the live definition on every resolution, with a
    /// static fallback when the definition answers empty
    Dynamic {
        resolver: IndexerResolver,
        fallback: Vec<Indexer>,
    },
}

impl fmt::Debug for IndexerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexerSource::Fixed(indexers) => {
                f.debug_tuple("Fixed").field(indexers).finish()
            }
            IndexerSource::Dynamic { fallback, .. } => f
                .debug_struct("Dynamic")
                .field("fallback", fallback)
                .finish_non_exhaustive(),
        }
    }
}

/// Capability descriptor for one field
#[derive(Debug, Clone)]
pub struct FieldCapability {
    field_id: String,
    display_name_key: String,
    group: FieldGroup,
    pub(crate) source: IndexerSource,
}

impl FieldCapability {
    /// Creates a system-field capability with a fixed indexer set
    pub fn system(
        field_id: impl Into<String>,
        display_name_key: impl Into<String>,
        indexers: Vec<Indexer>,
    ) -> Self {
        Self {
            field_id: field_id.into(),
            display_name_key: display_name_key.into(),
            group: FieldGroup::System,
            source: IndexerSource::Fixed(indexers),
        }
    }

    /// Creates a custom-field capability with a live resolver and a static
    /// fallback set
    pub fn custom(
        field_id: impl Into<String>,
        display_name_key: impl Into<String>,
        resolver: IndexerResolver,
        fallback: Vec<Indexer>,
    ) -> Self {
        Self {
            field_id: field_id.into(),
            display_name_key: display_name_key.into(),
            group: FieldGroup::Custom,
            source: IndexerSource::Dynamic { resolver, fallback },
        }
    }

    /// The field id
    pub fn field_id(&self) -> &str {
        &self.field_id
    }

    /// The i18n key of the field's display name
    pub fn display_name_key(&self) -> &str {
        &self.display_name_key
    }

    /// System or custom
    pub fn group(&self) -> FieldGroup {
        self.group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_indexer_derives_exact_subfield() {
        let indexer = Indexer::text("summary_indexer", "summary");
        assert_eq!(indexer.index_field, "summary");
        assert_eq!(
            indexer.kind,
            IndexedKind::Text {
                exact_field: "summary.exact".to_string()
            }
        );
    }

    #[test]
    fn test_system_capability() {
        let cap = FieldCapability::system(
            "status",
            "navigator.filter.status",
            vec![Indexer::keyword("status_indexer", "status")],
        );
        assert_eq!(cap.field_id(), "status");
        assert_eq!(cap.group(), FieldGroup::System);
    }

    #[test]
    fn test_custom_capability_holds_resolver() {
        let resolver: IndexerResolver =
            Arc::new(|| vec![Indexer::keyword("cf_indexer", "customfield_10001")]);
        let cap = FieldCapability::custom(
            "customfield_10001",
            "customfield.10001.name",
            resolver,
            vec![],
        );
        assert_eq!(cap.group(), FieldGroup::Custom);
        match &cap.source {
            IndexerSource::Dynamic { resolver, fallback } => {
                assert_eq!(resolver().len(), 1);
                assert!(fallback.is_empty());
            }
            other => panic!("expected dynamic source, got {:?}", other),
        }
    }
}
