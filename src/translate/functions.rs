//! Function operand resolution seam
//!
//! The translator never interprets a function call itself: a registered
//! resolver expands it into literal values (or the `Empty` sentinel)
//! before index queries are built. Argument validation happens in the
//! resolver and comes back as messages, not errors, so several problems
//! can be reported to the user at once.

use std::collections::HashMap;
use std::sync::Arc;

use crate::query::Literal;
use crate::sanitize::Principal;

use super::messages::MessageSet;

/// Result of expanding one function call
#[derive(Debug, Clone, Default)]
pub struct FunctionExpansion {
    /// The literal values the call expands to; may legitimately be empty
    pub literals: Vec<Literal>,
    /// Argument problems, batched
    pub messages: MessageSet,
}

impl FunctionExpansion {
    /// Expansion to a fixed literal list with no problems
    pub fn values(literals: Vec<Literal>) -> Self {
        Self {
            literals,
            messages: MessageSet::new(),
        }
    }

    /// Expansion that failed validation
    pub fn error(message: impl Into<String>) -> Self {
        let mut messages = MessageSet::new();
        messages.add_error(message);
        Self {
            literals: Vec::new(),
            messages,
        }
    }
}

/// Collaborator expanding function operands into literals
pub trait FunctionResolver: Send + Sync {
    /// Expands `name(args)` for the given principal
    fn resolve(&self, principal: &Principal, name: &str, args: &[String]) -> FunctionExpansion;
}

/// Resolver for deployments without query functions: every call is an
/// unknown-function validation error
pub struct NoFunctions;

impl FunctionResolver for NoFunctions {
    fn resolve(&self, _principal: &Principal, name: &str, _args: &[String]) -> FunctionExpansion {
        FunctionExpansion::error(format!("unknown function '{}'", name))
    }
}

/// Implementation of one registered query function
pub type FunctionImpl = Arc<dyn Fn(&Principal, &[String]) -> FunctionExpansion + Send + Sync>;

/// Name-keyed table of query functions (case-insensitive).
///
/// Unregistered names resolve to an unknown-function error, matching
/// [`NoFunctions`].
#[derive(Default)]
pub struct FunctionTable {
    functions: HashMap<String, FunctionImpl>,
}

impl FunctionTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a function; a repeated name replaces the earlier entry
    pub fn register(&mut self, name: impl Into<String>, function: FunctionImpl) {
        self.functions.insert(name.into().to_lowercase(), function);
    }
}

impl FunctionResolver for FunctionTable {
    fn resolve(&self, principal: &Principal, name: &str, args: &[String]) -> FunctionExpansion {
        match self.functions.get(&name.to_lowercase()) {
            Some(function) => function(principal, args),
            None => FunctionExpansion::error(format!("unknown function '{}'", name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_functions_rejects_everything() {
        let expansion = NoFunctions.resolve(&Principal::anonymous(), "membersOf", &[]);
        assert!(expansion.messages.has_errors());
        assert!(expansion.literals.is_empty());
    }

    #[test]
    fn test_table_dispatches_case_insensitively() {
        let mut table = FunctionTable::new();
        table.register(
            "currentUser",
            Arc::new(|principal: &Principal, _args: &[String]| {
                FunctionExpansion::values(vec![Literal::text(principal.name.clone())])
            }),
        );

        let fred = Principal::authenticated("fred", uuid::Uuid::new_v4());
        let expansion = table.resolve(&fred, "CURRENTUSER", &[]);
        assert_eq!(expansion.literals, vec![Literal::text("fred")]);
    }

    #[test]
    fn test_table_validates_arguments_as_messages() {
        let mut table = FunctionTable::new();
        table.register(
            "lastDays",
            Arc::new(|_principal: &Principal, args: &[String]| {
                if args.len() != 1 {
                    return FunctionExpansion::error("lastDays requires exactly one argument");
                }
                match args[0].parse::<i64>() {
                    Ok(days) => FunctionExpansion::values(vec![Literal::number(days)]),
                    Err(_) => FunctionExpansion::error(format!(
                        "lastDays argument '{}' is not a number",
                        args[0]
                    )),
                }
            }),
        );

        let bad = table.resolve(&Principal::anonymous(), "lastDays", &["x".to_string()]);
        assert!(bad.messages.has_errors());

        let good = table.resolve(&Principal::anonymous(), "lastDays", &["7".to_string()]);
        assert_eq!(good.literals, vec![Literal::number(7)]);
    }
}
