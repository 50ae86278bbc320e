use horn::{present, Engine, Resolution};

fn answer_lines(engine: &Engine, question: &str) -> Vec<String> {
    match engine.query(question).unwrap() {
        Resolution::Bindings { bindings } => present(&bindings),
        other => panic!("expected bindings for {}, got {:?}", question, other),
    }
}

#[test]
fn test_single_variable_rows() {
    let mut engine = Engine::new();
    engine
        .consult("parent(tom, bob).\nparent(tom, liz).", "family.horn")
        .unwrap();

    let lines = answer_lines(&engine, "parent(tom, X)");
    insta::assert_snapshot!(lines.join("; "), @"X = bob; X = liz");
}

#[test]
fn test_rows_zip_positionally() {
    let mut engine = Engine::new();
    engine.consult("parent(a, b).\nparent(c, d).", "pairs.horn").unwrap();

    let lines = answer_lines(&engine, "parent(X, Y)");
    insta::assert_snapshot!(lines.join("; "), @"X = a, Y = b; X = c, Y = d");
}

#[test]
fn test_conjunction_groups_rows_by_goal() {
    let mut engine = Engine::new();
    engine
        .consult("flight(paris, lyon).\nhotel(nice).", "trip.horn")
        .unwrap();

    let lines = answer_lines(&engine, "flight(X, Y), hotel(Z)");
    insta::assert_snapshot!(lines.join("; "), @"X = paris, Y = lyon; Z = nice");
}

#[test]
fn test_shared_variable_keeps_surviving_rows() {
    let mut engine = Engine::new();
    engine
        .consult(
            "flight(paris, lyon).\nflight(lyon, nice).\nrail(nice).",
            "trip.horn",
        )
        .unwrap();

    let lines = answer_lines(&engine, "flight(X, Y), rail(Y)");
    insta::assert_snapshot!(lines.join("; "), @"X = lyon, Y = nice");
}

#[test]
fn test_deduplicated_goal_groups_are_skipped() {
    // the second goal's record is folded into the first goal's, so only
    // one group of rows is rendered
    let mut engine = Engine::new();
    engine.consult("p(a, b).\np(c, d).\nq(d).", "prog.horn").unwrap();

    let lines = answer_lines(&engine, "p(X, Y), q(Y)");
    insta::assert_snapshot!(lines.join("; "), @"X = c, Y = d");
}

#[test]
fn test_verdicts_serialize_with_a_type_tag() {
    let mut engine = Engine::new();
    engine.consult("parent(a, b).", "family.horn").unwrap();

    let answer = engine.query("parent(a, b)").unwrap();
    insta::assert_snapshot!(answer.to_json().unwrap(), @r#"{"type":"truth","value":true}"#);
}
