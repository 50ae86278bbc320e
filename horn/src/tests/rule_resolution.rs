use crate::engine::Engine;

fn engine_with(program: &str) -> Engine {
    let mut engine = Engine::new();
    engine.consult(program, "test.horn").unwrap();
    engine
}

fn truth(engine: &Engine, query: &str) -> bool {
    engine.query(query).unwrap().is_success()
}

#[test]
fn test_simple_rule_swaps_arguments() {
    let engine = engine_with(
        r#"
parent(a, b).
child(X, Y) :- parent(Y, X).
"#,
    );
    assert!(truth(&engine, "child(b, a)"));
    assert!(!truth(&engine, "child(b, b)"));
}

#[test]
fn test_head_and_body_records_pair_by_position() {
    // head records and body records line up by list position, not by
    // variable name, so the swapped reading also holds
    let engine = engine_with(
        r#"
parent(a, b).
child(X, Y) :- parent(Y, X).
"#,
    );
    assert!(truth(&engine, "child(a, b)"));
}

#[test]
fn test_conjunctive_rule_grandparent() {
    let engine = engine_with(
        r#"
parent(a, b).
parent(b, c).
ancestor(X, Z) :- parent(X, Y), parent(Y, Z).
"#,
    );
    assert!(truth(&engine, "ancestor(a, c)"));
    assert!(!truth(&engine, "ancestor(a, d)"));
    assert!(!truth(&engine, "ancestor(b, a)"));
}

#[test]
fn test_recursive_ancestor_rules() {
    let engine = engine_with(
        r#"
parent(a, b).
parent(b, c).
ancestor(X, Y) :- parent(X, Y).
ancestor(X, Y) :- parent(X, Z), ancestor(Z, Y).
"#,
    );
    assert!(truth(&engine, "ancestor(a, b)"));
    assert!(truth(&engine, "ancestor(a, c)"));
    assert!(!truth(&engine, "ancestor(a, d)"));
    assert!(!truth(&engine, "ancestor(c, a)"));
}

#[test]
fn test_rule_scan_tries_alternatives_in_order() {
    let engine = engine_with(
        r#"
p(a).
q(X) :- r(X).
q(X) :- p(X).
"#,
    );
    assert!(truth(&engine, "q(a)"));
}

#[test]
fn test_rule_head_arity_gate() {
    let engine = engine_with(
        r#"
p(a).
q(X) :- p(X).
"#,
    );
    assert!(!truth(&engine, "q(a, b)"));
}

#[test]
fn test_head_atoms_gate_matching() {
    let engine = engine_with(
        r#"
p(a).
q(a, b) :- p(a).
"#,
    );
    assert!(truth(&engine, "q(a, b)"));
    assert!(!truth(&engine, "q(a, c)"));
    assert!(!truth(&engine, "q(z, b)"));
}

#[test]
fn test_variable_body_with_ground_head() {
    let engine = engine_with(
        r#"
p(a).
flag(on) :- p(X).
"#,
    );
    assert!(truth(&engine, "flag(on)"));

    let empty = engine_with("flag(on) :- p(X).");
    assert!(!truth(&empty, "flag(on)"));
}

#[test]
fn test_verdict_body_outcome_fails_alternative() {
    // mid's body shares no variable with its head, so resolving it yields a
    // bare verdict; a verdict at a rule-body call site fails the alternative
    let engine = engine_with(
        r#"
base(a).
mid(X) :- base(Z).
top(X) :- mid(X).
"#,
    );
    assert!(!truth(&engine, "top(q)"));
    assert!(!truth(&engine, "mid(q)"));
}

#[test]
fn test_list_only_head_never_fires() {
    let engine = engine_with(
        r#"
p(a).
all([X]) :- p(X).
"#,
    );
    assert!(!truth(&engine, "all([a])"));
}
