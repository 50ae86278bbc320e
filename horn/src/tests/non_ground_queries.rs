use crate::engine::Engine;
use crate::presenter::present;
use crate::response::Resolution;

fn engine_with(program: &str) -> Engine {
    let mut engine = Engine::new();
    engine.consult(program, "test.horn").unwrap();
    engine
}

fn binding_lines(engine: &Engine, query: &str) -> Vec<String> {
    match engine.query(query).unwrap() {
        Resolution::Bindings { bindings } => present(&bindings),
        other => panic!("expected bindings, got {:?}", other),
    }
}

#[test]
fn test_enumerates_in_assertion_order() {
    let engine = engine_with(
        r#"
parent(a, b).
parent(c, b).
"#,
    );
    assert_eq!(binding_lines(&engine, "parent(X, b)"), vec!["X = a", "X = c"]);
}

#[test]
fn test_candidate_lists_zip_positionally() {
    let engine = engine_with(
        r#"
p(a, b).
p(c, d).
"#,
    );
    assert_eq!(
        binding_lines(&engine, "p(X, Y)"),
        vec!["X = a, Y = b", "X = c, Y = d"]
    );
}

#[test]
fn test_failed_alternative_discards_staged_values() {
    let engine = engine_with(
        r#"
p(a, b).
p(c, z).
"#,
    );
    assert_eq!(binding_lines(&engine, "p(X, b)"), vec!["X = a"]);
}

#[test]
fn test_fact_variable_token_becomes_candidate() {
    // a fact-side variable is staged verbatim, so its name surfaces as the
    // candidate value
    let engine = engine_with("q(X, b).");
    assert_eq!(binding_lines(&engine, "q(Y, b)"), vec!["Y = X"]);
}

#[test]
fn test_projection_through_simple_rule() {
    let engine = engine_with(
        r#"
parent(a, b).
child(X, Y) :- parent(Y, X).
"#,
    );
    assert_eq!(binding_lines(&engine, "child(X, a)"), vec!["X = b"]);
}

#[test]
fn test_unknown_functor_fails_without_error() {
    let engine = engine_with("parent(a, b).");
    let answer = engine.query("missing(X)").unwrap();
    assert_eq!(answer, Resolution::Failure);
    assert!(!answer.is_success());
}

#[test]
fn test_no_share_body_gives_bare_truth() {
    // the body resolves on its own and shares no variable with the head, so
    // the answer degrades to a verdict with no binding rows
    let engine = engine_with(
        r#"
base(a).
mid(X) :- base(Z).
"#,
    );
    let answer = engine.query("mid(W)").unwrap();
    assert_eq!(answer, Resolution::Truth { value: true });
}

#[test]
fn test_ground_body_gives_bare_truth() {
    let engine = engine_with(
        r#"
p(a).
q(X) :- p(a).
"#,
    );
    let answer = engine.query("q(W)").unwrap();
    assert_eq!(answer, Resolution::Truth { value: true });
}

#[test]
fn test_duplicate_variable_requires_positional_agreement() {
    let engine = engine_with(
        r#"
p(a, a).
p(b, c).
"#,
    );
    assert_eq!(binding_lines(&engine, "p(X, X)"), vec!["X = a"]);

    let skewed = engine_with("p(a, b).");
    let answer = skewed.query("p(X, X)").unwrap();
    assert_eq!(answer, Resolution::Failure);
}

#[test]
fn test_recursive_rules_commit_to_first_match() {
    // the first ancestor rule resolves and the scan commits to it, so only
    // the direct parent surfaces
    let engine = engine_with(
        r#"
parent(a, b).
parent(b, c).
ancestor(X, Y) :- parent(X, Y).
ancestor(X, Y) :- parent(X, Z), ancestor(Z, Y).
"#,
    );
    assert_eq!(binding_lines(&engine, "ancestor(X, c)"), vec!["X = b"]);
}
