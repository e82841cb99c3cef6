//! # Message Set
//!
//! User-facing validation problems are collected, not thrown: a query can
//! carry several bad function arguments and unparseable values at once,
//! and the user should see all of them in one round trip.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered, de-duplicated collection of validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSet {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl MessageSet {
    /// Creates an empty message set
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an error message, keeping first-seen order and dropping
    /// duplicates
    pub fn add_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.errors.contains(&message) {
            self.errors.push(message);
        }
    }

    /// Adds a warning message, keeping first-seen order and dropping
    /// duplicates
    pub fn add_warning(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.warnings.contains(&message) {
            self.warnings.push(message);
        }
    }

    /// Absorbs all messages from another set
    pub fn merge(&mut self, other: MessageSet) {
        for error in other.errors {
            self.add_error(error);
        }
        for warning in other.warnings {
            self.add_warning(warning);
        }
    }

    /// Returns true if any error message was recorded
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns true if any message at all was recorded
    pub fn has_messages(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    /// The recorded errors, in first-seen order
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// The recorded warnings, in first-seen order
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

impl fmt::Display for MessageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.errors.join("; "))
    }
}
