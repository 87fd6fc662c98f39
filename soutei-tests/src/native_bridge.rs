//! Exercises the native bridge (spec §4.4) through the public API: the
//! `:builtin` assertion shipped by `soutei-solve`, plus the construction
//! errors the database is supposed to reject.

use soutei::{
    builtins, compile_query, install_native, run, Bounds, Database, DatabaseError, Mode,
    NativePred, Term, Value,
};

fn builtin_db() -> Database {
    let mut db = Database::new();
    install_native(&mut db, "builtin", builtins()).expect("builtins must install cleanly");
    db
}

#[test]
fn lt_succeeds_on_ordered_integers() {
    let outcome = run(
        Bounds::new(100, 10),
        builtin_db(),
        compile_query(":builtin", "lt", vec![Term::Value(Value::Int(1)), Term::Value(Value::Int(2))]),
    );
    assert_eq!(outcome.answers.len(), 1);
}

#[test]
fn lt_fails_branch_on_type_mismatch() {
    let outcome = run(
        Bounds::new(100, 10),
        builtin_db(),
        compile_query(":builtin", "lt", vec![Term::Value(Value::Bool(true)), Term::Value(Value::Int(2))]),
    );
    assert!(outcome.answers.is_empty());
}

#[test]
fn concat_grounds_its_output_argument() {
    let var = Term::Var(soutei::Variable::new(0, "out"));
    let outcome = run(
        Bounds::new(100, 10),
        builtin_db(),
        compile_query(":builtin", "concat", vec![Term::Value(Value::str("foo")), Term::Value(Value::str("bar")), var]),
    );
    assert_eq!(outcome.answers.len(), 1);
    let produced = outcome.answers[0].args[2].as_value().expect("native grounding: Out arg must be a value");
    assert_eq!(*produced, Value::str("foobar"));
}

#[test]
fn duplicate_predicate_key_is_a_construction_error() {
    let mut db = Database::new();
    let dup = vec![
        NativePred::new("lt", vec![Mode::In, Mode::In], |_| None),
        NativePred::new("lt", vec![Mode::In, Mode::In], |_| None),
    ];
    let err = install_native(&mut db, "builtin", dup).unwrap_err();
    assert!(matches!(err, DatabaseError::DuplicateNativePredicate { .. }));
}

#[test]
fn signature_evaluator_arity_mismatch_is_a_construction_error() {
    let mut db = Database::new();
    let mut bad = NativePred::new("lt", vec![Mode::In, Mode::In], |_| None);
    bad.n_in = 1; // declares two `In` modes but the evaluator was built for one
    let err = install_native(&mut db, "builtin", vec![bad]).unwrap_err();
    assert!(matches!(err, DatabaseError::NativeArityMismatch { .. }));
}
