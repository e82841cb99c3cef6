//! Fluent clause builder
//!
//! Assembles a clause tree from a flat sequence of terminals joined by
//! `and()` / `or()`, with AND binding tighter than OR. Parenthesized
//! sub-expressions come in through [`ClauseBuilder::sub`], negation through
//! [`ClauseBuilder::not`].
//!
//! `project = "A" and status = "Open" or status = "Reopened"` builds
//! `OR(AND(project, status), status)`.

use super::clause::{AndClause, Clause, OrClause};
use super::operand::Operand;
use super::operator::Operator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connector {
    And,
    Or,
}

/// Precedence-aware builder for clause trees
#[derive(Default)]
pub struct ClauseBuilder {
    /// OR-separated groups; each group is an AND-joined run of clauses
    groups: Vec<Vec<Clause>>,
    pending: Option<Connector>,
    negate_next: bool,
}

impl ClauseBuilder {
    /// Creates an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Joins the next clause with AND (the default join)
    pub fn and(mut self) -> Self {
        self.pending = Some(Connector::And);
        self
    }

    /// Joins the next clause with OR
    pub fn or(mut self) -> Self {
        self.pending = Some(Connector::Or);
        self
    }

    /// Negates the next clause added
    pub fn not(mut self) -> Self {
        self.negate_next = true;
        self
    }

    /// Adds a terminal clause
    pub fn terminal(
        self,
        field_name: impl Into<String>,
        operator: Operator,
        operand: Operand,
    ) -> Self {
        self.clause(Clause::terminal(field_name, operator, operand))
    }

    /// Adds an already-built clause
    pub fn clause(mut self, clause: Clause) -> Self {
        let clause = if self.negate_next {
            Clause::not(clause)
        } else {
            clause
        };
        self.negate_next = false;

        let connector = self.pending.take().unwrap_or(Connector::And);
        match connector {
            Connector::Or => self.groups.push(vec![clause]),
            Connector::And => match self.groups.last_mut() {
                Some(group) => group.push(clause),
                None => self.groups.push(vec![clause]),
            },
        }
        self
    }

    /// Adds a parenthesized sub-expression built by another builder.
    ///
    /// An empty sub-builder adds nothing; a dangling `not()` before it
    /// still applies to whatever the sub-expression built.
    pub fn sub(self, builder: ClauseBuilder) -> Self {
        match builder.build() {
            Some(clause) => self.clause(clause),
            None => self,
        }
    }

    /// Builds the tree; an empty builder yields `None`
    pub fn build(self) -> Option<Clause> {
        let mut alternatives: Vec<Clause> = self
            .groups
            .into_iter()
            .map(|mut group| {
                if group.len() == 1 {
                    group.remove(0)
                } else {
                    Clause::And(AndClause::new_unchecked(group))
                }
            })
            .collect();

        match alternatives.len() {
            0 => None,
            1 => Some(alternatives.remove(0)),
            _ => Some(Clause::Or(OrClause::new_unchecked(alternatives))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eq(field: &str, value: &str) -> (String, Operator, Operand) {
        (field.to_string(), Operator::Equals, Operand::quoted(value))
    }

    #[test]
    fn test_empty_builder_builds_none() {
        assert!(ClauseBuilder::new().build().is_none());
    }

    #[test]
    fn test_single_terminal() {
        let (f, op, v) = eq("project", "A");
        let clause = ClauseBuilder::new().terminal(f, op, v).build().unwrap();
        assert_eq!(format!("{}", clause), "project = \"A\"");
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let (f1, op1, v1) = eq("project", "A");
        let (f2, op2, v2) = eq("status", "Open");
        let (f3, op3, v3) = eq("status", "Reopened");

        let clause = ClauseBuilder::new()
            .terminal(f1, op1, v1)
            .and()
            .terminal(f2, op2, v2)
            .or()
            .terminal(f3, op3, v3)
            .build()
            .unwrap();

        match &clause {
            Clause::Or(or) => {
                assert_eq!(or.children().len(), 2);
                assert!(matches!(or.children()[0], Clause::And(_)));
                assert!(matches!(or.children()[1], Clause::Terminal(_)));
            }
            other => panic!("expected OR at root, got {:?}", other),
        }
        assert_eq!(
            format!("{}", clause),
            "project = \"A\" AND status = \"Open\" OR status = \"Reopened\""
        );
    }

    #[test]
    fn test_not_applies_to_next_clause() {
        let (f1, op1, v1) = eq("project", "A");
        let (f2, op2, v2) = eq("assignee", "bob");

        let clause = ClauseBuilder::new()
            .terminal(f1, op1, v1)
            .and()
            .not()
            .terminal(f2, op2, v2)
            .build()
            .unwrap();

        assert_eq!(
            format!("{}", clause),
            "project = \"A\" AND NOT assignee = \"bob\""
        );
    }

    #[test]
    fn test_sub_expression_grouping() {
        let (f1, op1, v1) = eq("project", "A");
        let (f2, op2, v2) = eq("status", "Open");
        let (f3, op3, v3) = eq("status", "Reopened");

        // project = "A" AND (status = "Open" OR status = "Reopened")
        let clause = ClauseBuilder::new()
            .terminal(f1, op1, v1)
            .and()
            .sub(
                ClauseBuilder::new()
                    .terminal(f2, op2, v2)
                    .or()
                    .terminal(f3, op3, v3),
            )
            .build()
            .unwrap();

        match &clause {
            Clause::And(and) => {
                assert_eq!(and.children().len(), 2);
                assert!(matches!(and.children()[1], Clause::Or(_)));
            }
            other => panic!("expected AND at root, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_sub_adds_nothing() {
        let (f, op, v) = eq("project", "A");
        let clause = ClauseBuilder::new()
            .terminal(f, op, v)
            .and()
            .sub(ClauseBuilder::new())
            .build()
            .unwrap();
        assert!(matches!(clause, Clause::Terminal(_)));
    }
}
