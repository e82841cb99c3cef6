//! Translation algorithm
//!
//! Walks a sanitized clause tree bottom-up and emits the native index
//! query. Composites map structurally (AND to must, OR to should, NOT to
//! must_not); terminals dispatch on their operator and on the analysis
//! kind of the field's selected indexer.

use crate::query::{Clause, Literal, Operand, Operator, TerminalClause, ID_FIELD};
use crate::registry::{FieldRegistry, IndexedKind, Indexer};
use crate::sanitize::Principal;

use super::analysis::{
    analyzed_tokens, exact_tokens, keyword_term, parse_date, sortable_date, sortable_number,
    sortable_term,
};
use super::errors::{TranslateError, TranslateResult};
use super::functions::FunctionResolver;
use super::index_query::{BooleanQuery, IndexQuery, RangeBound};
use super::messages::MessageSet;
use super::NONEMPTY_FIELD;

/// Translation limits
#[derive(Debug, Clone)]
pub struct TranslateConfig {
    /// Maximum leaf clauses a translated query may expand to
    pub max_boolean_clauses: usize,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            max_boolean_clauses: 1024,
        }
    }
}

/// Clause-tree to index-query translator
pub struct QueryTranslator<'a> {
    registry: &'a FieldRegistry,
    resolver: &'a dyn FunctionResolver,
    config: TranslateConfig,
}

impl<'a> QueryTranslator<'a> {
    /// Creates a translator over the given registry and function resolver
    pub fn new(registry: &'a FieldRegistry, resolver: &'a dyn FunctionResolver) -> Self {
        Self {
            registry,
            resolver,
            config: TranslateConfig::default(),
        }
    }

    /// Replaces the default limits
    pub fn with_config(mut self, config: TranslateConfig) -> Self {
        self.config = config;
        self
    }

    /// Translates a sanitized clause tree.
    ///
    /// Callers must sanitize first; this method assumes every referenced
    /// field has already passed permission checks.
    pub fn translate(
        &self,
        principal: &Principal,
        clause: &Clause,
    ) -> TranslateResult<IndexQuery> {
        // 1. Reject structurally unsatisfiable disjunctions up front
        Self::validate_satisfiable(clause)?;

        // 2. Build the query, batching user-input problems
        let mut messages = MessageSet::new();
        let query = self.translate_clause(principal, clause, &mut messages)?;
        if messages.has_errors() {
            return Err(TranslateError::Messages(messages));
        }

        // 3. Enforce the clause budget
        let got = query.clause_count();
        if got > self.config.max_boolean_clauses {
            return Err(TranslateError::TooManyClauses {
                got,
                limit: self.config.max_boolean_clauses,
            });
        }

        Ok(query)
    }

    /// A disjunction must hold at least one positive (non-negated) arm,
    /// or no document can ever satisfy it.
    fn validate_satisfiable(clause: &Clause) -> TranslateResult<()> {
        match clause {
            Clause::Terminal(_) => Ok(()),
            Clause::And(and) => {
                for child in and.children() {
                    Self::validate_satisfiable(child)?;
                }
                Ok(())
            }
            Clause::Or(or) => {
                if !or.children().iter().any(Self::has_positive) {
                    return Err(TranslateError::UnsatisfiableQuery {
                        reason: "disjunction contains only negated clauses".to_string(),
                    });
                }
                for child in or.children() {
                    Self::validate_satisfiable(child)?;
                }
                Ok(())
            }
            Clause::Not(not) => Self::validate_satisfiable(not.child()),
        }
    }

    fn has_positive(clause: &Clause) -> bool {
        match clause {
            Clause::Terminal(_) => true,
            Clause::Not(_) => false,
            Clause::And(and) => and.children().iter().any(Self::has_positive),
            Clause::Or(or) => or.children().iter().any(Self::has_positive),
        }
    }

    fn translate_clause(
        &self,
        principal: &Principal,
        clause: &Clause,
        messages: &mut MessageSet,
    ) -> TranslateResult<IndexQuery> {
        match clause {
            Clause::Terminal(terminal) => self.translate_terminal(principal, terminal, messages),
            Clause::And(and) => {
                let mut must = Vec::with_capacity(and.children().len());
                for child in and.children() {
                    must.push(self.translate_clause(principal, child, messages)?);
                }
                Ok(IndexQuery::all_of(must))
            }
            Clause::Or(or) => {
                let mut should = Vec::with_capacity(or.children().len());
                for child in or.children() {
                    should.push(self.translate_clause(principal, child, messages)?);
                }
                Ok(IndexQuery::any_of(should))
            }
            Clause::Not(not) => {
                let inner = self.translate_clause(principal, not.child(), messages)?;
                Ok(IndexQuery::Boolean(BooleanQuery {
                    must_not: vec![inner],
                    ..BooleanQuery::new()
                }))
            }
        }
    }

    fn translate_terminal(
        &self,
        principal: &Principal,
        terminal: &TerminalClause,
        messages: &mut MessageSet,
    ) -> TranslateResult<IndexQuery> {
        // The sanitizer's always-false marker may reference an
        // unregistered id field; it needs no capability to translate.
        if Self::is_match_none_terminal(terminal) {
            return Ok(IndexQuery::MatchNone);
        }

        let capability = self.registry.lookup(&terminal.field_name)?;
        let indexers = self.registry.resolve_indexers(&capability);
        let indexer = match Self::select_indexer(&indexers, terminal.operator) {
            Some(indexer) => indexer,
            // A field with no indexers cannot match anything
            None => return Ok(IndexQuery::MatchNone),
        };

        let literals = self.expand_operand(principal, &terminal.operand, messages);

        let query = match terminal.operator {
            Operator::Equals | Operator::In => {
                Self::positive(Self::equalities(indexer, &literals))
            }
            Operator::NotEquals => {
                Self::negated(indexer, Self::equalities(indexer, &literals))
            }
            Operator::NotIn => {
                if literals.is_empty() {
                    IndexQuery::MatchAll
                } else {
                    Self::negated(indexer, Self::equalities(indexer, &literals))
                }
            }
            Operator::Like => {
                Self::positive(Self::likes(indexer, &literals, messages))
            }
            Operator::NotLike => {
                Self::negated(indexer, Self::likes(indexer, &literals, messages))
            }
            Operator::Greater | Operator::GreaterEquals | Operator::Less
            | Operator::LessEquals => {
                Self::positive(Self::relational_ranges(
                    indexer,
                    terminal.operator,
                    &literals,
                    messages,
                ))
            }
            Operator::Before | Operator::After | Operator::On => {
                Self::positive(Self::instant_ranges(
                    indexer,
                    terminal.operator,
                    &literals,
                    messages,
                ))
            }
            Operator::During => Self::during_range(indexer, &literals, messages),
            Operator::Is => {
                if literals.iter().all(Literal::is_empty) && !literals.is_empty() {
                    Self::absence(indexer)
                } else {
                    messages.add_error(format!(
                        "operator 'is' on field '{}' supports only EMPTY",
                        terminal.field_name
                    ));
                    IndexQuery::MatchNone
                }
            }
            Operator::IsNot => {
                if literals.iter().all(Literal::is_empty) && !literals.is_empty() {
                    Self::presence(indexer)
                } else {
                    messages.add_error(format!(
                        "operator 'is not' on field '{}' supports only EMPTY",
                        terminal.field_name
                    ));
                    IndexQuery::MatchNone
                }
            }
        };

        Ok(query)
    }

    fn is_match_none_terminal(terminal: &TerminalClause) -> bool {
        terminal.field_name == ID_FIELD
            && terminal.operator == Operator::In
            && matches!(&terminal.operand, Operand::Multi(values) if values.is_empty())
    }

    /// Picks the indexer whose analysis kind suits the operator; falls
    /// back to the first registered indexer.
    fn select_indexer(indexers: &[Indexer], operator: Operator) -> Option<&Indexer> {
        let preferred = |indexer: &&Indexer| -> bool {
            match operator {
                op if op.is_relational() || op.is_temporal() => {
                    matches!(indexer.kind, IndexedKind::Sortable)
                }
                op if op.is_text_match() => matches!(indexer.kind, IndexedKind::Text { .. }),
                _ => true,
            }
        };
        indexers.iter().find(preferred).or_else(|| indexers.first())
    }

    /// Expands an operand into literals, routing function calls through
    /// the resolver and batching its problems.
    fn expand_operand(
        &self,
        principal: &Principal,
        operand: &Operand,
        messages: &mut MessageSet,
    ) -> Vec<Literal> {
        match operand {
            Operand::Empty => vec![Literal::Empty],
            Operand::Single(literal) => vec![literal.clone()],
            Operand::Multi(values) => values
                .iter()
                .flat_map(|value| self.expand_operand(principal, value, messages))
                .collect(),
            Operand::Function { name, args } => {
                let expansion = self.resolver.resolve(principal, name, args);
                messages.merge(expansion.messages);
                expansion.literals
            }
        }
    }

    /// Combines positive alternatives: none matches nothing, one stands
    /// alone, several union.
    fn positive(mut queries: Vec<IndexQuery>) -> IndexQuery {
        match queries.len() {
            0 => IndexQuery::MatchNone,
            1 => queries.remove(0),
            _ => IndexQuery::any_of(queries),
        }
    }

    /// Negative operators exclude their matches but still require the
    /// field to hold a value; a document without the field never matches
    /// `!=` / `not in` / `!~`.
    fn negated(indexer: &Indexer, excluded: Vec<IndexQuery>) -> IndexQuery {
        if excluded.is_empty() {
            return Self::presence(indexer);
        }
        IndexQuery::Boolean(BooleanQuery {
            must: vec![Self::presence(indexer)],
            must_not: excluded,
            ..BooleanQuery::new()
        })
    }

    fn presence(indexer: &Indexer) -> IndexQuery {
        IndexQuery::term(NONEMPTY_FIELD, &indexer.index_field)
    }

    fn absence(indexer: &Indexer) -> IndexQuery {
        IndexQuery::Boolean(BooleanQuery {
            must_not: vec![Self::presence(indexer)],
            ..BooleanQuery::new()
        })
    }

    fn equalities(indexer: &Indexer, literals: &[Literal]) -> Vec<IndexQuery> {
        literals
            .iter()
            .map(|literal| Self::equality(indexer, literal))
            .collect()
    }

    fn equality(indexer: &Indexer, literal: &Literal) -> IndexQuery {
        match literal {
            Literal::Empty => Self::absence(indexer),
            Literal::Text { value, quoted } => match &indexer.kind {
                IndexedKind::Text { exact_field } => {
                    if *quoted {
                        Self::phrase_or_term(exact_field, exact_tokens(value))
                    } else {
                        Self::phrase_or_term(&indexer.index_field, analyzed_tokens(value))
                    }
                }
                IndexedKind::Keyword => {
                    IndexQuery::term(&indexer.index_field, keyword_term(value))
                }
                IndexedKind::Sortable => {
                    IndexQuery::term(&indexer.index_field, sortable_term(value))
                }
            },
            Literal::Number(n) => match &indexer.kind {
                IndexedKind::Sortable => {
                    IndexQuery::term(&indexer.index_field, sortable_number(*n))
                }
                _ => IndexQuery::term(&indexer.index_field, n.to_string()),
            },
        }
    }

    fn likes(
        indexer: &Indexer,
        literals: &[Literal],
        messages: &mut MessageSet,
    ) -> Vec<IndexQuery> {
        literals
            .iter()
            .map(|literal| Self::like(indexer, literal, messages))
            .collect()
    }

    /// Text match: a quoted literal is an exact phrase; an unquoted one
    /// requires every analyzed token, in any position.
    fn like(indexer: &Indexer, literal: &Literal, messages: &mut MessageSet) -> IndexQuery {
        let (value, quoted) = match literal {
            Literal::Text { value, quoted } => (value.clone(), *quoted),
            Literal::Number(n) => (n.to_string(), false),
            Literal::Empty => {
                messages.add_error(format!(
                    "operator '~' on field '{}' does not support EMPTY",
                    indexer.index_field
                ));
                return IndexQuery::MatchNone;
            }
        };

        match &indexer.kind {
            IndexedKind::Text { exact_field } => {
                if quoted {
                    Self::phrase_or_term(exact_field, exact_tokens(&value))
                } else {
                    let terms: Vec<IndexQuery> = analyzed_tokens(&value)
                        .into_iter()
                        .map(|t| IndexQuery::term(&indexer.index_field, t))
                        .collect();
                    match terms.len() {
                        0 => IndexQuery::MatchNone,
                        1 => Self::positive(terms),
                        _ => IndexQuery::all_of(terms),
                    }
                }
            }
            _ => IndexQuery::term(&indexer.index_field, keyword_term(&value)),
        }
    }

    fn phrase_or_term(field: &str, mut tokens: Vec<String>) -> IndexQuery {
        match tokens.len() {
            0 => IndexQuery::MatchNone,
            1 => IndexQuery::term(field, tokens.remove(0)),
            _ => IndexQuery::phrase(field, tokens),
        }
    }

    fn relational_ranges(
        indexer: &Indexer,
        operator: Operator,
        literals: &[Literal],
        messages: &mut MessageSet,
    ) -> Vec<IndexQuery> {
        literals
            .iter()
            .filter_map(|literal| {
                let bound = Self::range_term(indexer, literal, operator, messages)?;
                let (lower, upper) = match operator {
                    Operator::Greater => (RangeBound::Exclusive(bound), RangeBound::Unbounded),
                    Operator::GreaterEquals => {
                        (RangeBound::Inclusive(bound), RangeBound::Unbounded)
                    }
                    Operator::Less => (RangeBound::Unbounded, RangeBound::Exclusive(bound)),
                    Operator::LessEquals => {
                        (RangeBound::Unbounded, RangeBound::Inclusive(bound))
                    }
                    _ => return None,
                };
                Some(IndexQuery::range(&indexer.index_field, lower, upper))
            })
            .collect()
    }

    fn instant_ranges(
        indexer: &Indexer,
        operator: Operator,
        literals: &[Literal],
        messages: &mut MessageSet,
    ) -> Vec<IndexQuery> {
        literals
            .iter()
            .filter_map(|literal| {
                let date = Self::date_term(literal, operator, messages)?;
                let (lower, upper) = match operator {
                    Operator::Before => (RangeBound::Unbounded, RangeBound::Exclusive(date)),
                    Operator::After => (RangeBound::Exclusive(date), RangeBound::Unbounded),
                    Operator::On => {
                        (RangeBound::Inclusive(date.clone()), RangeBound::Inclusive(date))
                    }
                    _ => return None,
                };
                Some(IndexQuery::range(&indexer.index_field, lower, upper))
            })
            .collect()
    }

    fn during_range(
        indexer: &Indexer,
        literals: &[Literal],
        messages: &mut MessageSet,
    ) -> IndexQuery {
        if literals.len() != 2 {
            messages.add_error(format!(
                "operator 'during' on field '{}' requires exactly two values, got {}",
                indexer.index_field,
                literals.len()
            ));
            return IndexQuery::MatchNone;
        }
        let start = Self::date_term(&literals[0], Operator::During, messages);
        let end = Self::date_term(&literals[1], Operator::During, messages);
        match (start, end) {
            (Some(start), Some(end)) => IndexQuery::range(
                &indexer.index_field,
                RangeBound::Inclusive(start),
                RangeBound::Inclusive(end),
            ),
            _ => IndexQuery::MatchNone,
        }
    }

    /// Order-preserving term for one end of a relational range
    fn range_term(
        indexer: &Indexer,
        literal: &Literal,
        operator: Operator,
        messages: &mut MessageSet,
    ) -> Option<String> {
        match literal {
            Literal::Number(n) => match indexer.kind {
                IndexedKind::Sortable => Some(sortable_number(*n)),
                _ => Some(n.to_string()),
            },
            Literal::Text { value, .. } => match indexer.kind {
                IndexedKind::Sortable => Some(sortable_term(value)),
                _ => Some(keyword_term(value)),
            },
            Literal::Empty => {
                messages.add_error(format!(
                    "EMPTY is not valid with operator '{}'",
                    operator.display_token()
                ));
                None
            }
        }
    }

    /// Calendar-date term for the temporal operators
    fn date_term(
        literal: &Literal,
        operator: Operator,
        messages: &mut MessageSet,
    ) -> Option<String> {
        match literal {
            Literal::Text { value, .. } => match parse_date(value) {
                Some(date) => Some(sortable_date(date)),
                None => {
                    messages.add_error(format!(
                        "'{}' is not a date (expected yyyy-MM-dd) for operator '{}'",
                        value,
                        operator.display_token()
                    ));
                    None
                }
            },
            other => {
                messages.add_error(format!(
                    "operator '{}' expects a date value, got {:?}",
                    operator.display_token(),
                    other
                ));
                None
            }
        }
    }
}
