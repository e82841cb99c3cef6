//! Permission seam
//!
//! The sanitizer asks an external permission oracle whether a principal
//! may use a field in a query at all. Per-field handlers sit on top of the
//! oracle and can additionally narrow a terminal clause (identity,
//! replacement, or removal) instead of the default keep/remove decision.

use std::collections::HashSet;

use uuid::Uuid;

use crate::query::{Clause, TerminalClause};

/// The requesting user identity carried through sanitization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// The authenticated user's id (None if anonymous)
    pub id: Option<Uuid>,
    /// Login name, empty for anonymous access
    pub name: String,
}

impl Principal {
    /// Creates a principal for an authenticated user
    pub fn authenticated(name: impl Into<String>, id: Uuid) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    /// Creates a principal for anonymous access
    pub fn anonymous() -> Self {
        Self {
            id: None,
            name: String::new(),
        }
    }

    /// Returns true when the principal is authenticated
    pub fn is_authenticated(&self) -> bool {
        self.id.is_some()
    }
}

/// External collaborator deciding field-level query permission
pub trait PermissionOracle: Send + Sync {
    /// May this principal reference this field in a query?
    fn has_permission(&self, principal: &Principal, field_id: &str) -> bool;
}

/// Oracle backed by a visible-field-layout set.
///
/// A field outside the set is invisible to every principal this oracle
/// serves; the common deployment keys one oracle per field-layout scheme.
pub struct VisibleFieldsOracle {
    visible: HashSet<String>,
}

impl VisibleFieldsOracle {
    /// Creates an oracle allowing exactly the given field ids
    /// (case-insensitive)
    pub fn new(visible: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            visible: visible
                .into_iter()
                .map(|f| f.into().to_lowercase())
                .collect(),
        }
    }
}

impl PermissionOracle for VisibleFieldsOracle {
    fn has_permission(&self, _principal: &Principal, field_id: &str) -> bool {
        self.visible.contains(&field_id.to_lowercase())
    }
}

/// Outcome of sanitizing one terminal clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanitizedTerminal {
    /// Keep the clause unchanged
    Keep,
    /// Substitute a narrowed replacement
    Replace(Clause),
    /// Remove the clause from its parent
    Remove,
}

/// Capability object bound to one field: decides permission and produces
/// the sanitized replacement for a terminal clause referencing it.
pub trait ClausePermissionHandler: Send + Sync {
    /// May this principal use the bound field at all?
    fn has_permission(&self, principal: &Principal) -> bool;

    /// Sanitizes one terminal clause. The default keeps permitted clauses
    /// unchanged and removes denied ones; handlers override to narrow
    /// instead.
    fn sanitize(&self, principal: &Principal, _clause: &TerminalClause) -> SanitizedTerminal {
        if self.has_permission(principal) {
            SanitizedTerminal::Keep
        } else {
            SanitizedTerminal::Remove
        }
    }
}
