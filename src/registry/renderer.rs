//! Renderer override table
//!
//! Some fields render their search input with a non-default widget set.
//! This is a plain priority-ordered override map, not a hierarchy: two
//! independent namespaces (system field id, custom field type key) are
//! queried in that order, and absence in both means "use default
//! rendering", never an error.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Client-side rendering strategies a field can opt into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RendererKind {
    /// Plain text input
    Text,
    /// Fixed select list
    SelectList,
    /// Autocomplete-backed picker
    AutoComplete,
    /// Date range picker
    DateRange,
}

/// Two-namespace override map for renderer kinds
#[derive(Debug, Default)]
pub struct RendererOverrides {
    system_fields: HashMap<String, HashSet<RendererKind>>,
    custom_types: HashMap<String, HashSet<RendererKind>>,
}

impl RendererOverrides {
    /// Creates an empty override table
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides rendering for a system field id
    pub fn override_system_field(
        &mut self,
        field_id: impl Into<String>,
        kinds: impl IntoIterator<Item = RendererKind>,
    ) {
        self.system_fields
            .insert(field_id.into().to_lowercase(), kinds.into_iter().collect());
    }

    /// Overrides rendering for a custom field type key
    pub fn override_custom_type(
        &mut self,
        type_key: impl Into<String>,
        kinds: impl IntoIterator<Item = RendererKind>,
    ) {
        self.custom_types
            .insert(type_key.into(), kinds.into_iter().collect());
    }

    /// Looks up the override set for a field.
    ///
    /// The system-field table is consulted first, then the custom-type
    /// table; the first hit wins. `None` means default rendering.
    pub fn lookup(
        &self,
        system_field_id: Option<&str>,
        custom_type_key: Option<&str>,
    ) -> Option<&HashSet<RendererKind>> {
        if let Some(field_id) = system_field_id {
            if let Some(kinds) = self.system_fields.get(&field_id.to_lowercase()) {
                return Some(kinds);
            }
        }
        custom_type_key.and_then(|key| self.custom_types.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_entry_means_default_rendering() {
        let overrides = RendererOverrides::new();
        assert!(overrides.lookup(Some("status"), None).is_none());
    }

    #[test]
    fn test_system_field_override() {
        let mut overrides = RendererOverrides::new();
        overrides.override_system_field("status", [RendererKind::SelectList]);

        let kinds = overrides.lookup(Some("Status"), None).unwrap();
        assert!(kinds.contains(&RendererKind::SelectList));
    }

    #[test]
    fn test_custom_type_override() {
        let mut overrides = RendererOverrides::new();
        overrides.override_custom_type(
            "labels-type",
            [RendererKind::AutoComplete, RendererKind::Text],
        );

        let kinds = overrides.lookup(None, Some("labels-type")).unwrap();
        assert_eq!(kinds.len(), 2);
    }

    #[test]
    fn test_system_table_wins_over_custom_table() {
        let mut overrides = RendererOverrides::new();
        overrides.override_system_field("duedate", [RendererKind::DateRange]);
        overrides.override_custom_type("date-type", [RendererKind::Text]);

        let kinds = overrides
            .lookup(Some("duedate"), Some("date-type"))
            .unwrap();
        assert!(kinds.contains(&RendererKind::DateRange));
        assert!(!kinds.contains(&RendererKind::Text));
    }
}
