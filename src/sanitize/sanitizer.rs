//! Sanitization algorithm
//!
//! Bottom-up rebuild of the clause tree. Terminals the principal may not
//! query are narrowed away with boolean semantics preserved:
//!
//! - inside a conjunction (and under NOT, and at the root) the terminal
//!   is dropped; the remaining constraints still hold
//! - inside a disjunction it is replaced by the always-false marker, so
//!   the surviving alternatives keep their meaning instead of the whole
//!   disjunction silently widening or collapsing
//!
//! A composite whose children all vanish vanishes too; one left with a
//! single child collapses to that child. The output therefore always
//! satisfies the arity invariants without any post-validation.

use std::collections::HashMap;
use std::sync::Arc;

use crate::query::{Clause, TerminalClause};
use crate::registry::FieldRegistry;

use super::errors::SanitizeResult;
use super::oracle::{ClausePermissionHandler, PermissionOracle, Principal, SanitizedTerminal};

/// Position of a clause relative to its parent, for denial handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    /// Child of AND, NOT, or the root: denial drops the clause
    Conjunctive,
    /// Child of OR: denial substitutes the always-false marker
    Disjunctive,
}

/// Permission-aware clause rewriter
pub struct ClauseSanitizer<'a> {
    registry: &'a FieldRegistry,
    oracle: &'a dyn PermissionOracle,
    handlers: HashMap<String, Arc<dyn ClausePermissionHandler>>,
}

impl<'a> ClauseSanitizer<'a> {
    /// Creates a sanitizer over the given registry and permission oracle
    pub fn new(registry: &'a FieldRegistry, oracle: &'a dyn PermissionOracle) -> Self {
        Self {
            registry,
            oracle,
            handlers: HashMap::new(),
        }
    }

    /// Installs a per-field handler overriding the default keep/remove
    /// decision for that field (case-insensitive)
    pub fn with_handler(
        mut self,
        field_id: impl Into<String>,
        handler: Arc<dyn ClausePermissionHandler>,
    ) -> Self {
        self.handlers.insert(field_id.into().to_lowercase(), handler);
        self
    }

    /// Rewrites the tree for the principal.
    ///
    /// `Ok(None)` means every clause was narrowed away. Permission denial
    /// is never an error; the only failure is an unregistered field,
    /// which aborts the whole query.
    pub fn sanitize(
        &self,
        principal: &Principal,
        clause: &Clause,
    ) -> SanitizeResult<Option<Clause>> {
        self.sanitize_in_context(principal, clause, Context::Conjunctive)
    }

    fn sanitize_in_context(
        &self,
        principal: &Principal,
        clause: &Clause,
        context: Context,
    ) -> SanitizeResult<Option<Clause>> {
        match clause {
            Clause::Terminal(terminal) => self.sanitize_terminal(principal, terminal, context),
            Clause::And(and) => {
                let mut kept = Vec::with_capacity(and.children().len());
                for child in and.children() {
                    if let Some(sanitized) =
                        self.sanitize_in_context(principal, child, Context::Conjunctive)?
                    {
                        kept.push(sanitized);
                    }
                }
                Ok(Self::rebuild_composite(kept, Clause::and))
            }
            Clause::Or(or) => {
                let mut kept = Vec::with_capacity(or.children().len());
                for child in or.children() {
                    if let Some(sanitized) =
                        self.sanitize_in_context(principal, child, Context::Disjunctive)?
                    {
                        kept.push(sanitized);
                    }
                }
                Ok(Self::rebuild_composite(kept, Clause::or))
            }
            Clause::Not(not) => {
                let child =
                    self.sanitize_in_context(principal, not.child(), Context::Conjunctive)?;
                Ok(child.map(Clause::not))
            }
        }
    }

    fn sanitize_terminal(
        &self,
        principal: &Principal,
        terminal: &TerminalClause,
        context: Context,
    ) -> SanitizeResult<Option<Clause>> {
        let clause = Clause::Terminal(terminal.clone());

        // The always-false marker is its own sanitized form; re-checking
        // it would make sanitization non-idempotent for unregistered
        // marker fields.
        if clause.is_match_none() {
            return Ok(Some(clause));
        }

        // Unknown field aborts the whole query
        self.registry.lookup(&terminal.field_name)?;

        let outcome = match self.handlers.get(&terminal.field_name.to_lowercase()) {
            Some(handler) => handler.sanitize(principal, terminal),
            None => {
                if self.oracle.has_permission(principal, &terminal.field_name) {
                    SanitizedTerminal::Keep
                } else {
                    SanitizedTerminal::Remove
                }
            }
        };

        Ok(match outcome {
            SanitizedTerminal::Keep => Some(clause),
            SanitizedTerminal::Replace(replacement) => Some(replacement),
            SanitizedTerminal::Remove => match context {
                Context::Conjunctive => None,
                Context::Disjunctive => Some(Clause::match_none()),
            },
        })
    }

    /// Rebuilds a composite from surviving children: zero children means
    /// the composite disappears, one collapses to the child itself.
    fn rebuild_composite(
        mut kept: Vec<Clause>,
        make: impl FnOnce(Vec<Clause>) -> crate::query::StructureResult<Clause>,
    ) -> Option<Clause> {
        match kept.len() {
            0 => None,
            1 => Some(kept.remove(0)),
            // Arity is >= 2 here, so construction cannot fail
            _ => make(kept).ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::oracle::VisibleFieldsOracle;
    use super::super::SanitizeError;
    use super::*;
    use crate::query::{Operand, Operator};
    use crate::registry::Indexer;

    fn registry_with(fields: &[&str]) -> FieldRegistry {
        let registry = FieldRegistry::new();
        for field in fields {
            registry
                .register_system_field(*field, format!("key.{}", field), vec![Indexer::keyword(
                    format!("{}_indexer", field),
                    *field,
                )])
                .unwrap();
        }
        registry
    }

    fn term(field: &str, value: &str) -> Clause {
        Clause::terminal(field, Operator::Equals, Operand::quoted(value))
    }

    #[test]
    fn test_permitted_tree_passes_through_unchanged() {
        let registry = registry_with(&["project", "status"]);
        let oracle = VisibleFieldsOracle::new(["project", "status"]);
        let sanitizer = ClauseSanitizer::new(&registry, &oracle);

        let tree = Clause::and(vec![term("project", "A"), term("status", "Open")]).unwrap();
        let sanitized = sanitizer
            .sanitize(&Principal::anonymous(), &tree)
            .unwrap()
            .unwrap();
        assert_eq!(sanitized, tree);
    }

    #[test]
    fn test_denied_terminal_dropped_from_and() {
        let registry = registry_with(&["project", "salary"]);
        let oracle = VisibleFieldsOracle::new(["project"]);
        let sanitizer = ClauseSanitizer::new(&registry, &oracle);

        let tree = Clause::and(vec![term("project", "A"), term("salary", "100")]).unwrap();
        let sanitized = sanitizer
            .sanitize(&Principal::anonymous(), &tree)
            .unwrap()
            .unwrap();

        // The AND collapses to its surviving child
        assert_eq!(sanitized, term("project", "A"));
    }

    #[test]
    fn test_denied_terminal_becomes_false_marker_in_or() {
        let registry = registry_with(&["project", "salary"]);
        let oracle = VisibleFieldsOracle::new(["project"]);
        let sanitizer = ClauseSanitizer::new(&registry, &oracle);

        let tree = Clause::or(vec![term("project", "A"), term("salary", "100")]).unwrap();
        let sanitized = sanitizer
            .sanitize(&Principal::anonymous(), &tree)
            .unwrap()
            .unwrap();

        match &sanitized {
            Clause::Or(or) => {
                assert_eq!(or.children().len(), 2);
                assert_eq!(or.children()[0], term("project", "A"));
                assert!(or.children()[1].is_match_none());
            }
            other => panic!("expected OR to survive, got {:?}", other),
        }
    }

    #[test]
    fn test_fully_denied_tree_sanitizes_to_none() {
        let registry = registry_with(&["salary"]);
        let oracle = VisibleFieldsOracle::new(["project"]);
        let sanitizer = ClauseSanitizer::new(&registry, &oracle);

        let tree = Clause::and(vec![term("salary", "100"), term("salary", "200")]).unwrap();
        assert_eq!(
            sanitizer.sanitize(&Principal::anonymous(), &tree).unwrap(),
            None
        );
    }

    #[test]
    fn test_denied_under_not_removes_the_not() {
        let registry = registry_with(&["project", "salary"]);
        let oracle = VisibleFieldsOracle::new(["project"]);
        let sanitizer = ClauseSanitizer::new(&registry, &oracle);

        let tree =
            Clause::and(vec![term("project", "A"), Clause::not(term("salary", "100"))]).unwrap();
        let sanitized = sanitizer
            .sanitize(&Principal::anonymous(), &tree)
            .unwrap()
            .unwrap();
        assert_eq!(sanitized, term("project", "A"));
    }

    #[test]
    fn test_unknown_field_aborts_whole_query() {
        let registry = registry_with(&["project"]);
        let oracle = VisibleFieldsOracle::new(["project", "ghost"]);
        let sanitizer = ClauseSanitizer::new(&registry, &oracle);

        let tree = Clause::and(vec![term("project", "A"), term("ghost", "x")]).unwrap();
        let err = sanitizer
            .sanitize(&Principal::anonymous(), &tree)
            .unwrap_err();
        assert_eq!(
            err,
            SanitizeError::UnknownField {
                field_id: "ghost".to_string()
            }
        );
    }

    #[test]
    fn test_sanitization_is_idempotent() {
        let registry = registry_with(&["project", "status", "salary"]);
        let oracle = VisibleFieldsOracle::new(["project", "status"]);
        let sanitizer = ClauseSanitizer::new(&registry, &oracle);
        let principal = Principal::anonymous();

        let tree = Clause::or(vec![
            Clause::and(vec![term("project", "A"), term("salary", "100")]).unwrap(),
            term("status", "Open"),
        ])
        .unwrap();

        let once = sanitizer.sanitize(&principal, &tree).unwrap().unwrap();
        let twice = sanitizer.sanitize(&principal, &once).unwrap().unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_handler_replacement_narrows_terminal() {
        struct NarrowToProject;
        impl ClausePermissionHandler for NarrowToProject {
            fn has_permission(&self, _principal: &Principal) -> bool {
                true
            }

            fn sanitize(
                &self,
                _principal: &Principal,
                clause: &TerminalClause,
            ) -> SanitizedTerminal {
                // Narrow any reporter constraint to the visible project
                SanitizedTerminal::Replace(
                    Clause::and(vec![
                        Clause::Terminal(clause.clone()),
                        Clause::terminal("project", Operator::Equals, Operand::quoted("A")),
                    ])
                    .unwrap(),
                )
            }
        }

        let registry = registry_with(&["project", "reporter"]);
        let oracle = VisibleFieldsOracle::new(["project", "reporter"]);
        let sanitizer = ClauseSanitizer::new(&registry, &oracle)
            .with_handler("reporter", Arc::new(NarrowToProject));

        let sanitized = sanitizer
            .sanitize(&Principal::anonymous(), &term("reporter", "bob"))
            .unwrap()
            .unwrap();
        assert!(matches!(sanitized, Clause::And(_)));
    }
}
