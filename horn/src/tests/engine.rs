use crate::engine::Engine;
use crate::parser::parse_line;
use crate::resource_limits::ResourceLimits;
use crate::response::Resolution;

#[test]
fn test_consult_counts_and_skipped_lines() {
    let mut engine = Engine::new();
    let report = engine
        .consult(
            r#"
parent(a, b).
parent(b, c).
child(X, Y) :- parent(Y, X).
nonsense line
parent(a, b)?
"#,
            "family.horn",
        )
        .unwrap();

    assert_eq!(report.facts, 2);
    assert_eq!(report.rules, 1);
    assert_eq!(report.answers.len(), 1);
    assert!(report.answers[0].is_success());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].details().unwrap().span.line, 5);
}

#[test]
fn test_resolve_stores_assertions_and_answers_queries() {
    let mut engine = Engine::new();

    let fact = parse_line("parent(a, b).", None).unwrap();
    assert!(engine.resolve(fact).unwrap().is_none());

    let rule = parse_line("child(X, Y) :- parent(Y, X).", None).unwrap();
    assert!(engine.resolve(rule).unwrap().is_none());

    let query = parse_line("child(b, a)?", None).unwrap();
    let answer = engine.resolve(query).unwrap().unwrap();
    assert_eq!(answer, Resolution::Truth { value: true });
}

#[test]
fn test_listing_renders_program_in_order() {
    let mut engine = Engine::new();
    engine
        .consult(
            r#"
parent(a, b).
parent(c, d).
child(X, Y) :- parent(Y, X).
"#,
            "family.horn",
        )
        .unwrap();

    assert_eq!(
        engine.listing(),
        vec![
            "parent(a, b).",
            "parent(c, d).",
            "child(X, Y) :- parent(Y, X).",
        ]
    );
}

#[test]
fn test_query_parse_error_surfaces() {
    let engine = Engine::new();
    let error = engine.query("parent(").unwrap_err();
    assert!(error.details().is_some());
}

#[test]
fn test_resource_limits_accessor() {
    let engine = Engine::with_resource_limits(ResourceLimits::with_max_recursion_depth(64));
    assert_eq!(engine.limits().max_recursion_depth, 64);
}

#[test]
fn test_embedded_non_ground_query_answers() {
    let mut engine = Engine::new();
    let report = engine
        .consult(
            r#"
parent(a, b).
parent(c, b).
parent(X, b)
"#,
            "family.horn",
        )
        .unwrap();

    assert_eq!(report.answers.len(), 1);
    assert!(matches!(report.answers[0], Resolution::Bindings { .. }));
}

#[test]
fn test_json_serialization_of_answers() {
    let mut engine = Engine::new();
    engine.consult("parent(a, b).", "family.horn").unwrap();

    let truth = engine.query("parent(a, b)").unwrap();
    let json = truth.to_json().unwrap();
    assert!(json.contains(r#""type":"truth""#));
    assert!(json.contains(r#""value":true"#));

    let bindings = engine.query("parent(X, b)").unwrap();
    let json = bindings.to_json().unwrap();
    assert!(json.contains(r#""type":"bindings""#));
    assert!(json.contains(r#""variable":"X""#));
}
