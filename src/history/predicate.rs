//! History predicates
//!
//! A predicate constrains where in the timeline a change query matches:
//! `changed before "2020-01-01" after "2019-01-01"` carries an AND
//! predicate with two terminals.
//!
//! Display rendering joins AND children with a single space and no AND
//! token: the surrounding grammar implies conjunction positionally. This
//! reads ambiguously once predicates nest, but the flat rendering is the
//! compatibility surface and is preserved exactly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::query::{Operand, Operator};

/// A single timeline condition: `operator operand`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalHistoryPredicate {
    /// Temporal or comparison operator
    pub operator: Operator,
    /// Right-hand side value(s)
    pub operand: Operand,
}

impl TerminalHistoryPredicate {
    /// Creates a terminal predicate
    pub fn new(operator: Operator, operand: Operand) -> Self {
        Self { operator, operand }
    }
}

/// Conjunction of predicates, rendered without an AND token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndHistoryPredicate {
    children: Vec<HistoryPredicate>,
}

impl AndHistoryPredicate {
    /// Creates a conjunction over the given predicates
    pub fn new(children: Vec<HistoryPredicate>) -> Self {
        Self { children }
    }

    /// The ordered children
    pub fn children(&self) -> &[HistoryPredicate] {
        &self.children
    }
}

/// A node in the history predicate tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryPredicate {
    /// Single timeline condition
    Terminal(TerminalHistoryPredicate),
    /// Positional conjunction
    And(AndHistoryPredicate),
}

/// Double-dispatch visitor over the history predicate tree
pub trait HistoryPredicateVisitor {
    /// Result produced per visited node
    type Output;

    /// Called for a terminal predicate
    fn visit_terminal(&mut self, predicate: &TerminalHistoryPredicate) -> Self::Output;

    /// Called for a conjunction
    fn visit_and(&mut self, predicate: &AndHistoryPredicate) -> Self::Output;
}

impl HistoryPredicate {
    /// Creates a terminal predicate node
    pub fn terminal(operator: Operator, operand: Operand) -> Self {
        HistoryPredicate::Terminal(TerminalHistoryPredicate::new(operator, operand))
    }

    /// Creates a conjunction node
    pub fn and(children: Vec<HistoryPredicate>) -> Self {
        HistoryPredicate::And(AndHistoryPredicate::new(children))
    }

    /// Dispatches to the visitor method matching this node's variant
    pub fn accept<V: HistoryPredicateVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            HistoryPredicate::Terminal(t) => visitor.visit_terminal(t),
            HistoryPredicate::And(and) => visitor.visit_and(and),
        }
    }

    /// Renders the predicate for display in query text.
    ///
    /// Terminals render `"<operator-token> <operand>"`; conjunctions render
    /// their children's display strings joined by single spaces, in order,
    /// with no AND token.
    pub fn display_string(&self) -> String {
        match self {
            HistoryPredicate::Terminal(t) => format!("{} {}", t.operator, t.operand),
            HistoryPredicate::And(and) => and
                .children()
                .iter()
                .map(HistoryPredicate::display_string)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl fmt::Display for HistoryPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_string())
    }
}
