//! Documents handed to the index writer
//!
//! A document is the indexable projection of one entity: its opaque id
//! plus typed field values. How each value lands in the index is the
//! registered indexers' decision, not the document's.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A typed field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Free text, analyzed by text indexers
    Text(String),
    /// Integer, stored order-preserving by sortable indexers
    Number(i64),
    /// Calendar date, stored order-preserving by sortable indexers
    Date(NaiveDate),
}

/// The indexable projection of one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    id: String,
    fields: Vec<(String, FieldValue)>,
}

impl Document {
    /// Creates a document for the entity with the given opaque id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
        }
    }

    /// Adds a text field value
    pub fn with_text(mut self, field_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields
            .push((field_id.into(), FieldValue::Text(value.into())));
        self
    }

    /// Adds a number field value
    pub fn with_number(mut self, field_id: impl Into<String>, value: i64) -> Self {
        self.fields
            .push((field_id.into(), FieldValue::Number(value)));
        self
    }

    /// Adds a date field value
    pub fn with_date(mut self, field_id: impl Into<String>, value: NaiveDate) -> Self {
        self.fields.push((field_id.into(), FieldValue::Date(value)));
        self
    }

    /// The opaque entity id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The typed field values, in insertion order
    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }
}
