//! Comparison and range operators
//!
//! A closed enum: new operators require a translator change, so the set is
//! deliberately not extensible. Each operator carries the canonical display
//! token used when rendering a clause back to query text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operator of a terminal clause or history predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Exact equality: `=`
    Equals,
    /// Negated equality: `!=`
    NotEquals,
    /// Text match: `~`
    Like,
    /// Negated text match: `!~`
    NotLike,
    /// Membership: `in`
    In,
    /// Negated membership: `not in`
    NotIn,
    /// Strictly greater: `>`
    Greater,
    /// Greater or equal: `>=`
    GreaterEquals,
    /// Strictly less: `<`
    Less,
    /// Less or equal: `<=`
    LessEquals,
    /// Emptiness test: `is`
    Is,
    /// Negated emptiness test: `is not`
    IsNot,
    /// Change happened before an instant: `before`
    Before,
    /// Change happened after an instant: `after`
    After,
    /// Change happened on a day: `on`
    On,
    /// Change happened within an interval: `during`
    During,
}

impl Operator {
    /// Returns the canonical display token used in query text
    pub fn display_token(&self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::NotEquals => "!=",
            Operator::Like => "~",
            Operator::NotLike => "!~",
            Operator::In => "in",
            Operator::NotIn => "not in",
            Operator::Greater => ">",
            Operator::GreaterEquals => ">=",
            Operator::Less => "<",
            Operator::LessEquals => "<=",
            Operator::Is => "is",
            Operator::IsNot => "is not",
            Operator::Before => "before",
            Operator::After => "after",
            Operator::On => "on",
            Operator::During => "during",
        }
    }

    /// Returns true for operators that negate their operand
    pub fn is_negative(&self) -> bool {
        matches!(
            self,
            Operator::NotEquals | Operator::NotLike | Operator::NotIn | Operator::IsNot
        )
    }

    /// Returns true for ordering comparisons over sortable values
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            Operator::Greater | Operator::GreaterEquals | Operator::Less | Operator::LessEquals
        )
    }

    /// Returns true for the point-in-time operators of the history language
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            Operator::Before | Operator::After | Operator::On | Operator::During
        )
    }

    /// Returns true for list-membership operators
    pub fn is_list(&self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }

    /// Returns true for analyzed text-match operators
    pub fn is_text_match(&self) -> bool {
        matches!(self, Operator::Like | Operator::NotLike)
    }

    /// Returns true for the emptiness-test operators
    pub fn is_emptiness(&self) -> bool {
        matches!(self, Operator::Is | Operator::IsNot)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_token())
    }
}
