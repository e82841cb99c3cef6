//! Operand model
//!
//! The right-hand side of a terminal clause: a literal, an ordered list, or
//! a function call that a resolution collaborator expands into literals
//! before translation.
//!
//! All values are immutable once built. A `Multi` operand never directly
//! nests another `Multi`; the constructor flattens.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A literal value inside an operand
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Literal {
    /// Text value. `quoted` records whether the surface form was
    /// quote-delimited; translation selects the exact sub-field on that
    /// flag alone, never on content.
    Text {
        /// The text content, without surrounding quotes
        value: String,
        /// Whether the literal was quote-delimited in query text
        quoted: bool,
    },
    /// Integer value
    Number(i64),
    /// The null-marker: "field has no value"
    Empty,
}

impl Literal {
    /// Creates an unquoted text literal
    pub fn text(value: impl Into<String>) -> Self {
        Literal::Text {
            value: value.into(),
            quoted: false,
        }
    }

    /// Creates a quote-delimited text literal
    pub fn quoted(value: impl Into<String>) -> Self {
        Literal::Text {
            value: value.into(),
            quoted: true,
        }
    }

    /// Creates a number literal
    pub fn number(value: i64) -> Self {
        Literal::Number(value)
    }

    /// Returns true for the null-marker
    pub fn is_empty(&self) -> bool {
        matches!(self, Literal::Empty)
    }

    /// Returns the text content for text literals
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Literal::Text { value, .. } => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Text { value, quoted } => {
                if *quoted {
                    write!(f, "\"{}\"", value)
                } else {
                    write!(f, "{}", value)
                }
            }
            Literal::Number(n) => write!(f, "{}", n),
            Literal::Empty => write!(f, "EMPTY"),
        }
    }
}

/// The operand of a terminal clause or history predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operand {
    /// No operand at all
    Empty,
    /// A single literal
    Single(Literal),
    /// An ordered sequence of operands; never directly nests another `Multi`
    Multi(Vec<Operand>),
    /// A function call expanded by the function-resolution collaborator
    Function {
        /// Function name
        name: String,
        /// Ordered string arguments, unparsed
        args: Vec<String>,
    },
}

impl Operand {
    /// Creates a single-literal operand
    pub fn single(literal: Literal) -> Self {
        Operand::Single(literal)
    }

    /// Creates a single unquoted text operand
    pub fn text(value: impl Into<String>) -> Self {
        Operand::Single(Literal::text(value))
    }

    /// Creates a single quoted text operand
    pub fn quoted(value: impl Into<String>) -> Self {
        Operand::Single(Literal::quoted(value))
    }

    /// Creates a single number operand
    pub fn number(value: i64) -> Self {
        Operand::Single(Literal::number(value))
    }

    /// Creates a multi-value operand, flattening directly nested `Multi`
    /// values so the invariant holds by construction
    pub fn multi(values: impl IntoIterator<Item = Operand>) -> Self {
        let mut flattened = Vec::new();
        for value in values {
            match value {
                Operand::Multi(inner) => flattened.extend(inner),
                other => flattened.push(other),
            }
        }
        Operand::Multi(flattened)
    }

    /// Creates a function-call operand
    pub fn function(
        name: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Operand::Function {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true when the operand carries no value at all
    pub fn is_empty(&self) -> bool {
        matches!(self, Operand::Empty)
    }

    /// Returns true for function-call operands
    pub fn is_function(&self) -> bool {
        matches!(self, Operand::Function { .. })
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Empty => write!(f, "EMPTY"),
            Operand::Single(literal) => write!(f, "{}", literal),
            Operand::Multi(values) => {
                write!(f, "(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, ")")
            }
            Operand::Function { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
