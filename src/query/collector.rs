//! Named-terminal collector
//!
//! Walks a clause tree and accumulates every terminal clause whose field
//! name is in a case-insensitive set, preserving discovery order. Used by
//! context-narrowing logic ("does this query already constrain project?").
//!
//! The collector performs no structural validation: it does not care
//! whether a match sits under a `Not` or how many times the same field
//! appears. An empty name set is valid and simply never matches.

use std::collections::HashSet;

use super::clause::{Clause, TerminalClause};
use super::visitor::ClauseWalker;

/// Collects terminal clauses matching a field-name set
pub struct NamedTerminalCollector {
    names: HashSet<String>,
    collected: Vec<TerminalClause>,
}

impl NamedTerminalCollector {
    /// Creates a collector for the given field names (case-insensitive)
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            names: names
                .into_iter()
                .map(|n| n.into().to_lowercase())
                .collect(),
            collected: Vec::new(),
        }
    }

    /// Walks the tree and returns the matches in discovery order
    pub fn collect(mut self, clause: &Clause) -> Vec<TerminalClause> {
        self.walk(clause);
        self.collected
    }
}

impl ClauseWalker for NamedTerminalCollector {
    fn on_terminal(&mut self, clause: &TerminalClause) {
        if self.names.contains(&clause.field_name.to_lowercase()) {
            self.collected.push(clause.clone());
        }
    }
}

/// Convenience wrapper around [`NamedTerminalCollector`]
pub fn collect_named_terminals(
    clause: &Clause,
    names: impl IntoIterator<Item = impl Into<String>>,
) -> Vec<TerminalClause> {
    NamedTerminalCollector::new(names).collect(clause)
}
