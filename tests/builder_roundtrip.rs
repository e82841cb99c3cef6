//! Builder and Display Round-Trip Tests
//!
//! Tests for query-text rendering:
//! - Builder precedence: AND binds tighter than OR, sub() groups
//! - Clause display round-trips operator tokens and precedence parens
//! - Named-terminal collection over built trees
//! - History predicate display: space-joined, no AND token

use trackql::history::HistoryPredicate;
use trackql::query::{collect_named_terminals, Clause, ClauseBuilder, Operand, Operator};

fn eq(field: &str, value: &str) -> (String, Operator, Operand) {
    (field.to_string(), Operator::Equals, Operand::quoted(value))
}

// =============================================================================
// Builder Precedence Tests
// =============================================================================

/// `a AND b OR c` groups as `OR(AND(a, b), c)`.
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
        }
        other => panic!("expected OR at root, got {:?}", other),
    }
}

/// A sub() expression overrides the default precedence the way
/// parentheses do in query text.
#[test]
fn test_sub_expression_binds_as_group() {
    let (f1, op1, v1) = eq("project", "A");
    let (f2, op2, v2) = eq("status", "Open");
    let (f3, op3, v3) = eq("status", "Reopened");

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

    assert_eq!(
        format!("{}", clause),
        "project = \"A\" AND (status = \"Open\" OR status = \"Reopened\")"
    );
}

/// not() negates exactly the next clause, including a sub() group.
#[test]
fn test_not_negates_next_clause() {
    let (f1, op1, v1) = eq("project", "A");
    let (f2, op2, v2) = eq("status", "Closed");
    let (f3, op3, v3) = eq("status", "Resolved");

    let clause = ClauseBuilder::new()
        .terminal(f1, op1, v1)
        .and()
        .not()
        .sub(
            ClauseBuilder::new()
                .terminal(f2, op2, v2)
                .or()
                .terminal(f3, op3, v3),
        )
        .build()
        .unwrap();

    assert_eq!(
        format!("{}", clause),
        "project = \"A\" AND NOT (status = \"Closed\" OR status = \"Resolved\")"
    );
}

/// An empty builder yields no clause at all.
#[test]
fn test_empty_builder_yields_none() {
    assert!(ClauseBuilder::new().build().is_none());
}

// =============================================================================
// Display Round-Trip Tests
// =============================================================================

/// Every operator family renders its canonical token.
#[test]
fn test_operator_tokens_in_rendered_text() {
    let cases = [
        (
            Clause::terminal("votes", Operator::GreaterEquals, Operand::number(5)),
            "votes >= 5",
        ),
        (
            Clause::terminal("summary", Operator::Like, Operand::text("crash")),
            "summary ~ crash",
        ),
        (
            Clause::terminal(
                "status",
                Operator::NotIn,
                Operand::multi([Operand::quoted("Closed"), Operand::quoted("Resolved")]),
            ),
            "status not in (\"Closed\", \"Resolved\")",
        ),
        (
            Clause::terminal("resolution", Operator::Is, Operand::Empty),
            "resolution is EMPTY",
        ),
        (
            Clause::terminal(
                "assignee",
                Operator::Equals,
                Operand::function("currentUser", Vec::<String>::new()),
            ),
            "assignee = currentUser()",
        ),
    ];

    for (clause, expected) in cases {
        assert_eq!(format!("{}", clause), expected);
    }
}

/// Quoted literals re-quote on rendering; unquoted ones do not.
#[test]
fn test_quoting_round_trips() {
    let quoted = Clause::terminal("summary", Operator::Equals, Operand::quoted("New York"));
    assert_eq!(format!("{}", quoted), "summary = \"New York\"");

    let bare = Clause::terminal("summary", Operator::Equals, Operand::text("crash"));
    assert_eq!(format!("{}", bare), "summary = crash");
}

// =============================================================================
// Collector Tests
// =============================================================================

/// Collecting `{"status"}` over `project = "A" AND (status = "Open" OR
/// assignee = "bob")` yields exactly the one status clause.
#[test]
fn test_collector_over_built_tree() {
    let (f1, op1, v1) = eq("project", "A");
    let (f2, op2, v2) = eq("status", "Open");
    let (f3, op3, v3) = eq("assignee", "bob");

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

    let matches = collect_named_terminals(&clause, ["status"]);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].field_name, "status");
    assert_eq!(matches[0].operand, Operand::quoted("Open"));
}

// =============================================================================
// History Predicate Display Tests
// =============================================================================

/// The AND predicate joins children's display strings with single spaces
/// and no AND token, in child order.
#[test]
fn test_history_and_renders_space_joined() {
    let predicate = HistoryPredicate::and(vec![
        HistoryPredicate::terminal(Operator::Before, Operand::text("2019-01-01")),
        HistoryPredicate::terminal(Operator::After, Operand::text("2020-01-01")),
    ]);

    assert_eq!(
        predicate.display_string(),
        "before 2019-01-01 after 2020-01-01"
    );
}

/// A lone terminal renders operator token then operand.
#[test]
fn test_history_terminal_renders_token_and_operand() {
    let predicate = HistoryPredicate::terminal(
        Operator::During,
        Operand::multi([Operand::text("2019-01-01"), Operand::text("2019-12-31")]),
    );
    assert_eq!(
        predicate.display_string(),
        "during (2019-01-01, 2019-12-31)"
    );
}
