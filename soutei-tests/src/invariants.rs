//! Boundary behaviors from spec §8 that don't need the full reachability
//! database to exercise.

use soutei::{compile_query, install, run, Bounds, Database, Rule, RuleLit, RuleTerm, Term, Value};

fn single_fact_db() -> Database {
    let mut db = Database::new();
    install(
        &mut db,
        Value::str("app"),
        vec![Rule::fact(RuleLit::new(
            "likes",
            vec![RuleTerm::Value(Value::str("alice")), RuleTerm::Value(Value::str("bob"))],
        ))],
    );
    db
}

#[test]
fn answer_limit_zero_yields_empty_list() {
    let outcome = run(
        Bounds::new(1_000, 0),
        single_fact_db(),
        compile_query("app", "likes", vec![Term::Value(Value::str("alice")), Term::Value(Value::str("bob"))]),
    );
    assert!(outcome.answers.is_empty());
}

#[test]
fn step_limit_zero_yields_empty_list() {
    let outcome = run(
        Bounds::new(0, 1_000),
        single_fact_db(),
        compile_query("app", "likes", vec![Term::Value(Value::str("alice")), Term::Value(Value::str("bob"))]),
    );
    assert!(outcome.answers.is_empty());
}

#[test]
fn arity_mismatch_fails_the_branch_not_the_caller() {
    // The installed fact is `likes/2`; querying `likes/3` must fail
    // quietly rather than panicking on an out-of-bounds argument index.
    let outcome = run(
        Bounds::new(1_000, 10),
        single_fact_db(),
        compile_query(
            "app",
            "likes",
            vec![
                Term::Value(Value::str("alice")),
                Term::Value(Value::str("bob")),
                Term::Value(Value::Bool(true)),
            ],
        ),
    );
    assert!(outcome.answers.is_empty());
}

#[test]
fn missing_predicate_in_assertion_fails_the_branch() {
    let outcome = run(
        Bounds::new(1_000, 10),
        single_fact_db(),
        compile_query("app", "dislikes", vec![Term::Value(Value::str("alice")), Term::Value(Value::str("bob"))]),
    );
    assert!(outcome.answers.is_empty());
}

#[test]
fn unground_assertion_reference_fails_the_branch() {
    use soutei::{AssertionRef, Goal, Lit};
    let goal = Goal::new(
        AssertionRef::Principal(Term::Var(soutei::Variable::new(0, "who"))),
        Lit::new("likes", vec![Term::Value(Value::str("alice")), Term::Value(Value::str("bob"))]),
    );
    let outcome = run(Bounds::new(1_000, 10), single_fact_db(), goal);
    assert!(outcome.answers.is_empty());
}
