//! The end-to-end scenario from spec §8: the classical reachability
//! database, testing fairness directly — a left-biased depth-first
//! scheduler would diverge on `path/2`'s first, left-recursive rule
//! before ever trying the base case.

use soutei::{
    compile_query, install, run, Bounds, Database, Rule, RuleAssertionRef, RuleGoal, RuleLit,
    RuleTerm, Term, Value,
};

use crate::util::int;

const EDGES: &[(i64, i64)] = &[(1, 2), (2, 3), (3, 4), (3, 1), (1, 5), (5, 4)];

fn app() -> RuleAssertionRef {
    RuleAssertionRef::Principal(RuleTerm::Value(Value::str("app")))
}

fn path_rules() -> Vec<Rule> {
    let mut rules = vec![
        Rule::new(
            RuleLit::new("path", vec![RuleTerm::Var("x".into()), RuleTerm::Var("y".into())]),
            vec![
                RuleGoal::new(
                    app(),
                    RuleLit::new("path", vec![RuleTerm::Var("x".into()), RuleTerm::Var("z".into())]),
                ),
                RuleGoal::new(
                    app(),
                    RuleLit::new("edge", vec![RuleTerm::Var("z".into()), RuleTerm::Var("y".into())]),
                ),
            ],
        ),
        Rule::new(
            RuleLit::new("path", vec![RuleTerm::Var("x".into()), RuleTerm::Var("y".into())]),
            vec![RuleGoal::new(
                app(),
                RuleLit::new("edge", vec![RuleTerm::Var("x".into()), RuleTerm::Var("y".into())]),
            )],
        ),
    ];
    for (a, b) in EDGES {
        rules.push(Rule::fact(RuleLit::new(
            "edge",
            vec![RuleTerm::Value(Value::Int(*a)), RuleTerm::Value(Value::Int(*b))],
        )));
    }
    rules
}

fn reachability_db() -> Database {
    let mut db = Database::new();
    install(&mut db, Value::str("app"), path_rules());
    db
}

const BOUNDS: Bounds = Bounds {
    step_limit: 10_000,
    answer_limit: 100,
};

fn query_path(from: i64, to_term: Term) -> soutei::Goal {
    compile_query("app", "path", vec![int(from), to_term])
}

#[test]
fn one_to_two_succeeds() {
    let outcome = run(BOUNDS, reachability_db(), query_path(1, int(2)));
    assert_eq!(outcome.answers.len(), 1);
}

#[test]
fn one_to_four_has_multiple_proofs() {
    let outcome = run(BOUNDS, reachability_db(), query_path(1, int(4)));
    // via 1->2->3->4 and via 1->5->4
    assert!(outcome.answers.len() >= 2);
}

#[test]
fn three_to_five_succeeds() {
    let outcome = run(BOUNDS, reachability_db(), query_path(3, int(5)));
    assert!(!outcome.answers.is_empty());
}

#[test]
fn four_to_one_fails() {
    let outcome = run(BOUNDS, reachability_db(), query_path(4, int(1)));
    assert!(outcome.answers.is_empty());
}

#[test]
fn five_to_three_fails() {
    let outcome = run(BOUNDS, reachability_db(), query_path(5, int(3)));
    assert!(outcome.answers.is_empty());
}

#[test]
fn one_reaches_everyone_including_itself() {
    // A left-biased depth-first scheduler diverges here: the first rule
    // recurses on `path(1, ?z)` before ever trying the base-case rule.
    let outcome = run(
        BOUNDS,
        reachability_db(),
        query_path(1, Term::Var(soutei::Variable::new(0, "y"))),
    );
    let mut reached: Vec<i64> = outcome
        .answers
        .iter()
        .filter_map(|lit| lit.args[1].as_value())
        .filter_map(|v| match v {
            Value::Int(i) => Some(*i),
            _ => None,
        })
        .collect();
    reached.sort_unstable();
    reached.dedup();
    assert_eq!(reached, vec![1, 2, 3, 4, 5]);
}

#[test]
fn determinism_under_fixed_bounds() {
    let first = run(BOUNDS, reachability_db(), query_path(1, Term::Var(soutei::Variable::new(0, "y"))));
    let second = run(BOUNDS, reachability_db(), query_path(1, Term::Var(soutei::Variable::new(0, "y"))));
    crate::util::assert_answers_eq(&first.answers, &second.answers);
}

#[test]
fn raising_answer_limit_is_monotone() {
    let small = run(
        Bounds::new(10_000, 2),
        reachability_db(),
        query_path(1, Term::Var(soutei::Variable::new(0, "y"))),
    );
    let large = run(
        Bounds::new(10_000, 100),
        reachability_db(),
        query_path(1, Term::Var(soutei::Variable::new(0, "y"))),
    );
    for answer in &small.answers {
        assert!(
            large.answers.contains(answer),
            "raising answerLimit dropped a previously found answer: {answer}"
        );
    }
}
