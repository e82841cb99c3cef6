//! Clause tree
//!
//! The boolean query AST. Composite arity is checked once, in the
//! constructors; traversal code may rely on it without re-validating.
//!
//! Rewrites (sanitization, translation) build new trees; a `Clause` is
//! never mutated after construction and is freely shared across threads.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::{StructureError, StructureResult};
use super::operand::Operand;
use super::operator::Operator;
use super::ID_FIELD;

/// A terminal comparison: `field operator operand`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalClause {
    /// Field id this clause constrains
    pub field_name: String,
    /// Comparison operator
    pub operator: Operator,
    /// Right-hand side value(s)
    pub operand: Operand,
}

impl TerminalClause {
    /// Creates a terminal clause
    pub fn new(field_name: impl Into<String>, operator: Operator, operand: Operand) -> Self {
        Self {
            field_name: field_name.into(),
            operator,
            operand,
        }
    }
}

/// Conjunction over at least two children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndClause {
    children: Vec<Clause>,
}

impl AndClause {
    /// Creates a conjunction; fails below two children
    pub fn new(children: Vec<Clause>) -> StructureResult<Self> {
        if children.len() < 2 {
            return Err(StructureError::TooFewChildren {
                kind: "AND",
                got: children.len(),
            });
        }
        Ok(Self { children })
    }

    /// Builds without the arity check. Callers have already established
    /// `children.len() >= 2`.
    pub(crate) fn new_unchecked(children: Vec<Clause>) -> Self {
        debug_assert!(children.len() >= 2);
        Self { children }
    }

    /// The ordered children
    pub fn children(&self) -> &[Clause] {
        &self.children
    }
}

/// Disjunction over at least two children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrClause {
    children: Vec<Clause>,
}

impl OrClause {
    /// Creates a disjunction; fails below two children
    pub fn new(children: Vec<Clause>) -> StructureResult<Self> {
        if children.len() < 2 {
            return Err(StructureError::TooFewChildren {
                kind: "OR",
                got: children.len(),
            });
        }
        Ok(Self { children })
    }

    /// Builds without the arity check. Callers have already established
    /// `children.len() >= 2`.
    pub(crate) fn new_unchecked(children: Vec<Clause>) -> Self {
        debug_assert!(children.len() >= 2);
        Self { children }
    }

    /// The ordered children
    pub fn children(&self) -> &[Clause] {
        &self.children
    }
}

/// Negation of exactly one child
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotClause {
    child: Box<Clause>,
}

impl NotClause {
    /// Creates a negation
    pub fn new(child: Clause) -> Self {
        Self {
            child: Box::new(child),
        }
    }

    /// The negated child
    pub fn child(&self) -> &Clause {
        &self.child
    }
}

/// A node in the boolean query tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Clause {
    /// Terminal comparison
    Terminal(TerminalClause),
    /// Conjunction, >= 2 children
    And(AndClause),
    /// Disjunction, >= 2 children
    Or(OrClause),
    /// Negation, exactly 1 child
    Not(NotClause),
}

impl Clause {
    /// Creates a terminal clause node
    pub fn terminal(field_name: impl Into<String>, operator: Operator, operand: Operand) -> Self {
        Clause::Terminal(TerminalClause::new(field_name, operator, operand))
    }

    /// Creates a conjunction node; fails below two children
    pub fn and(children: Vec<Clause>) -> StructureResult<Self> {
        Ok(Clause::And(AndClause::new(children)?))
    }

    /// Creates a disjunction node; fails below two children
    pub fn or(children: Vec<Clause>) -> StructureResult<Self> {
        Ok(Clause::Or(OrClause::new(children)?))
    }

    /// Creates a negation node
    pub fn not(child: Clause) -> Self {
        Clause::Not(NotClause::new(child))
    }

    /// The always-false marker clause: `id in ()`.
    ///
    /// An empty membership list over the entity-id field matches no
    /// document. The sanitizer substitutes it for denied terminals inside
    /// a disjunction, and translation maps it to a match-none query.
    pub fn match_none() -> Self {
        Clause::terminal(ID_FIELD, Operator::In, Operand::multi([]))
    }

    /// Returns true for the always-false marker clause
    pub fn is_match_none(&self) -> bool {
        match self {
            Clause::Terminal(t) => {
                t.field_name == ID_FIELD
                    && t.operator == Operator::In
                    && matches!(&t.operand, Operand::Multi(values) if values.is_empty())
            }
            _ => false,
        }
    }

    /// Total number of terminal clauses in the tree
    pub fn terminal_count(&self) -> usize {
        match self {
            Clause::Terminal(_) => 1,
            Clause::And(and) => and.children().iter().map(Clause::terminal_count).sum(),
            Clause::Or(or) => or.children().iter().map(Clause::terminal_count).sum(),
            Clause::Not(not) => not.child().terminal_count(),
        }
    }
}

impl fmt::Display for Clause {
    /// Renders query text with precedence parentheses: AND binds tighter
    /// than OR, NOT tighter than both.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Terminal(t) => {
                write!(f, "{} {} {}", t.field_name, t.operator, t.operand)
            }
            Clause::And(and) => {
                for (i, child) in and.children().iter().enumerate() {
                    if i > 0 {
                        write!(f, " AND ")?;
                    }
                    if matches!(child, Clause::Or(_)) {
                        write!(f, "({})", child)?;
                    } else {
                        write!(f, "{}", child)?;
                    }
                }
                Ok(())
            }
            Clause::Or(or) => {
                for (i, child) in or.children().iter().enumerate() {
                    if i > 0 {
                        write!(f, " OR ")?;
                    }
                    write!(f, "{}", child)?;
                }
                Ok(())
            }
            Clause::Not(not) => {
                if matches!(not.child(), Clause::And(_) | Clause::Or(_)) {
                    write!(f, "NOT ({})", not.child())
                } else {
                    write!(f, "NOT {}", not.child())
                }
            }
        }
    }
}
