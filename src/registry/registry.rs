//! Field registry
//!
//! Registration happens at system/plugin-load time and entries live for
//! the process lifetime; only custom-field indexer resolution is refreshed
//! per access. Duplicate detection is read-then-write, so registration
//! takes the single writer lock; lookups take the read lock only.
//!
//! Field ids are case-insensitive, matching the query grammar.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::observability::Logger;

use super::capability::{
    FieldCapability, FieldGroup, Indexer, IndexerResolver, IndexerSource,
};
use super::errors::{RegistryError, RegistryResult};

/// Process-lifetime map from field id to capability
pub struct FieldRegistry {
    fields: RwLock<HashMap<String, Arc<FieldCapability>>>,
}

impl FieldRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            fields: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a system field with a fixed indexer set.
    ///
    /// Fails with `DuplicateField` if the id (case-insensitive) is taken.
    pub fn register_system_field(
        &self,
        field_id: impl Into<String>,
        display_name_key: impl Into<String>,
        indexers: Vec<Indexer>,
    ) -> RegistryResult<()> {
        let field_id = field_id.into();
        self.insert(
            &field_id,
            FieldCapability::system(&field_id, display_name_key, indexers),
        )
    }

    /// Registers a custom field with a live resolver and static fallback.
    ///
    /// Fails with `DuplicateField` if the id (case-insensitive) is taken.
    pub fn register_custom_field(
        &self,
        field_id: impl Into<String>,
        display_name_key: impl Into<String>,
        resolver: IndexerResolver,
        fallback: Vec<Indexer>,
    ) -> RegistryResult<()> {
        let field_id = field_id.into();
        self.insert(
            &field_id,
            FieldCapability::custom(&field_id, display_name_key, resolver, fallback),
        )
    }

    fn insert(&self, field_id: &str, capability: FieldCapability) -> RegistryResult<()> {
        let key = field_id.to_lowercase();
        let mut fields = self.fields.write().unwrap();
        if fields.contains_key(&key) {
            return Err(RegistryError::duplicate_field(field_id));
        }
        let group = capability.group();
        fields.insert(key, Arc::new(capability));
        Logger::info(
            "FIELD_REGISTERED",
            &[
                ("field_id", field_id),
                (
                    "group",
                    match group {
                        FieldGroup::System => "system",
                        FieldGroup::Custom => "custom",
                    },
                ),
            ],
        );
        Ok(())
    }

    /// Looks up a field's capability; fails with `UnknownField` if absent
    pub fn lookup(&self, field_id: &str) -> RegistryResult<Arc<FieldCapability>> {
        self.fields
            .read()
            .unwrap()
            .get(&field_id.to_lowercase())
            .cloned()
            .ok_or_else(|| RegistryError::unknown_field(field_id))
    }

    /// Returns true if the field id is registered
    pub fn contains(&self, field_id: &str) -> bool {
        self.fields
            .read()
            .unwrap()
            .contains_key(&field_id.to_lowercase())
    }

    /// Resolves the current indexer set for a capability.
    ///
    /// System fields return their fixed set. Custom fields re-enter the
    /// live definition through the stored accessor; a non-empty answer
    /// wins, an empty answer falls back to the statically registered
    /// default set.
    pub fn resolve_indexers(&self, capability: &FieldCapability) -> Vec<Indexer> {
        match &capability.source {
            IndexerSource::Fixed(indexers) => indexers.clone(),
            IndexerSource::Dynamic { resolver, fallback } => {
                let live = resolver();
                if live.is_empty() {
                    fallback.clone()
                } else {
                    live
                }
            }
        }
    }

    /// All registered field ids (lowercased), unordered
    pub fn field_ids(&self) -> Vec<String> {
        self.fields.read().unwrap().keys().cloned().collect()
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}
