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
fn test_ground_list_fact_match() {
    let engine = engine_with("pair(a, [b, c]).");
    assert!(truth(&engine, "pair(a, [b, c])"));
    assert!(!truth(&engine, "pair(a, [c, b])"));
    assert!(!truth(&engine, "pair(z, [b, c])"));
}

#[test]
fn test_lists_compare_up_to_shorter_length() {
    // element comparison stops at the shorter list, so a prefix matches
    let engine = engine_with("pair(a, [b, c]).");
    assert!(truth(&engine, "pair(a, [b])"));
    assert!(!truth(&engine, "pair(a, [c])"));
}

#[test]
fn test_fact_side_list_variable_binds() {
    let engine = engine_with("pair(a, [X, c]).");
    assert!(truth(&engine, "pair(a, [b, c])"));
    assert!(!truth(&engine, "pair(a, [b, d])"));
}

#[test]
fn test_divider_rule_absorbs_tail() {
    let engine = engine_with(
        r#"
pair(a, [b, c]).
split([H | T], X) :- pair(X, T).
"#,
    );
    assert!(truth(&engine, "split([a, b, c], a)"));
    assert!(!truth(&engine, "split([a, b, c], z)"));
}

#[test]
fn test_divider_rule_binds_head_element() {
    let engine = engine_with(
        r#"
pair(a, b).
split([H | T], X) :- pair(X, H).
"#,
    );
    assert!(truth(&engine, "split([b, c], a)"));
    assert!(!truth(&engine, "split([c, b], a)"));
}

#[test]
fn test_list_rule_with_short_query_list() {
    let engine = engine_with(
        r#"
pair(a, [b, c]).
split([H | T], X) :- pair(X, T).
"#,
    );
    assert!(!truth(&engine, "split([a], a)"));
}

#[test]
fn test_list_head_with_conjunctive_body_never_fires() {
    let engine = engine_with(
        r#"
pair(a, b).
split([H | T], X) :- pair(X, H), pair(X, H).
"#,
    );
    assert!(!truth(&engine, "split([b, c], a)"));
}

#[test]
fn test_list_and_term_bindings_must_agree() {
    let engine = engine_with(
        r#"
exists(a).
first([H], H) :- exists(H).
"#,
    );
    assert!(!truth(&engine, "first([a], b)"));
}
