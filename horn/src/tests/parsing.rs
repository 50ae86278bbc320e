use crate::parser::{parse_line, parse_program, parse_query};
use crate::term::{is_variable_token, Clause, Goal, Term};

#[test]
fn test_parse_fact() {
    let clause = parse_line("parent(tom, liz).", None).unwrap();
    match clause {
        Clause::Fact(fact) => {
            assert_eq!(fact.functor, "parent");
            assert_eq!(fact.alternatives.len(), 1);
            assert_eq!(fact.alternatives[0].arity(), 2);
            assert!(!fact.alternatives[0].has_variable());
        }
        other => panic!("expected a fact, got {:?}", other),
    }
}

#[test]
fn test_parse_simple_rule() {
    let clause = parse_line("child(X, Y) :- parent(Y, X).", None).unwrap();
    match clause {
        Clause::Rule(rule) => {
            assert_eq!(rule.head.functor, "child");
            assert_eq!(rule.head_predicate().unwrap().arity(), 2);
            match &rule.body {
                Goal::Simple(query) => {
                    assert_eq!(query.functor, "parent");
                    assert!(query.is_non_ground());
                }
                other => panic!("expected a simple body, got {:?}", other),
            }
        }
        other => panic!("expected a rule, got {:?}", other),
    }
}

#[test]
fn test_parse_conjunctive_rule() {
    let clause = parse_line("ancestor(X, Z) :- parent(X, Y), parent(Y, Z).", None).unwrap();
    match clause {
        Clause::Rule(rule) => match &rule.body {
            Goal::Conjunctive(conjunction) => {
                assert_eq!(conjunction.goals.len(), 2);
                assert_eq!(conjunction.goals[0].functor, "parent");
                assert_eq!(conjunction.goals[1].functor, "parent");
            }
            other => panic!("expected a conjunctive body, got {:?}", other),
        },
        other => panic!("expected a rule, got {:?}", other),
    }
}

#[test]
fn test_parse_query_without_terminator() {
    let clause = parse_line("parent(X, liz)", None).unwrap();
    match clause {
        Clause::Query(goal) => assert!(goal.is_non_ground()),
        other => panic!("expected a query, got {:?}", other),
    }
}

#[test]
fn test_parse_query_with_question_mark() {
    let clause = parse_line("parent(tom, liz)?", None).unwrap();
    match clause {
        Clause::Query(goal) => assert!(!goal.is_non_ground()),
        other => panic!("expected a query, got {:?}", other),
    }
}

#[test]
fn test_parse_conjunctive_query() {
    let clause = parse_line("parent(X, Y), parent(Y, Z)?", None).unwrap();
    match clause {
        Clause::Query(Goal::Conjunctive(conjunction)) => {
            assert_eq!(conjunction.goals.len(), 2);
        }
        other => panic!("expected a conjunctive query, got {:?}", other),
    }
}

#[test]
fn test_variable_classification() {
    assert!(is_variable_token("X"));
    assert!(is_variable_token("Tail"));
    assert!(!is_variable_token("abc"));
    assert!(!is_variable_token("_tail"));
    assert!(matches!(Term::from_token("_x"), Term::Atom(_)));
    assert!(matches!(Term::from_token("Xs"), Term::Variable(_)));
}

#[test]
fn test_parse_flat_list() {
    let clause = parse_line("pair(a, [b, c]).", None).unwrap();
    match clause {
        Clause::Fact(fact) => {
            let predicate = &fact.alternatives[0];
            assert_eq!(predicate.arity(), 1);
            assert_eq!(predicate.lists.len(), 1);
            assert_eq!(predicate.lists[0].len(), 2);
            assert_eq!(predicate.lists[0].elements[0].text(), "b");
        }
        other => panic!("expected a fact, got {:?}", other),
    }
}

#[test]
fn test_parse_divider_list_flattens() {
    let clause = parse_line("split([H | T], X) :- pair(X, T).", None).unwrap();
    match clause {
        Clause::Rule(rule) => {
            let head = rule.head_predicate().unwrap();
            assert_eq!(head.arity(), 1);
            assert_eq!(head.lists.len(), 1);
            let elements: Vec<&str> =
                head.lists[0].elements.iter().map(|t| t.text()).collect();
            assert_eq!(elements, vec!["H", "T"]);
            assert!(head.lists[0].has_variable());
        }
        other => panic!("expected a rule, got {:?}", other),
    }
}

#[test]
fn test_empty_list_contributes_nothing() {
    let clause = parse_line("r([]).", None).unwrap();
    match clause {
        Clause::Fact(fact) => {
            let predicate = &fact.alternatives[0];
            assert_eq!(predicate.arity(), 0);
            assert!(predicate.lists.is_empty());
        }
        other => panic!("expected a fact, got {:?}", other),
    }
}

#[test]
fn test_parse_error_carries_location() {
    let error = parse_line("parent(tom", None).unwrap_err();
    let details = error.details().expect("parse errors carry details");
    assert_eq!(details.span.line, 1);
    assert!(details.message.starts_with("Parse error"));
}

#[test]
fn test_parse_program_skips_bad_lines() {
    let source = r#"% family facts
parent(tom, liz).
parent(
parent(liz, ann).
"#;
    let (clauses, errors) = parse_program(source, Some("family.horn".to_string()));
    assert_eq!(clauses.len(), 2);
    assert_eq!(errors.len(), 1);
    let details = errors[0].details().unwrap();
    assert_eq!(details.span.line, 3);
    assert_eq!(details.source_name.as_deref(), Some("family.horn"));
}

#[test]
fn test_parse_query_rejects_trailing_period() {
    let error = parse_query("parent(tom, liz).").unwrap_err();
    let details = error.details().unwrap();
    assert!(details.suggestion.is_some());
}

#[test]
fn test_rule_display_round_trip() {
    let text = "ancestor(X, Z) :- parent(X, Y), parent(Y, Z).";
    let clause = parse_line(text, None).unwrap();
    assert_eq!(clause.to_string(), text);
}

#[test]
fn test_parse_underscore_atoms() {
    let clause = parse_line("likes(mary_jane, _private).", None).unwrap();
    match clause {
        Clause::Fact(fact) => {
            let predicate = &fact.alternatives[0];
            assert!(matches!(predicate.terms[1], Term::Atom(_)));
        }
        other => panic!("expected a fact, got {:?}", other),
    }
}
