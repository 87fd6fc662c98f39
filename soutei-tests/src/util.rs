#![cfg(test)]

use std::fmt::Write;

use itertools::Itertools;
use soutei::{Lit, Term, Value};

/// Compares two answer sets up to order, per spec §5: "test suites must
/// not depend on relative ordering of answers from distinct proofs;
/// they may depend on set equality up to `answerLimit`." Prints a
/// line-level diff on mismatch, the same shape as `chalk-tests`'
/// `assert_test_result_eq`.
pub(crate) fn assert_answers_eq(expected: &[Lit], actual: &[Lit]) {
    let mut expected_sorted: Vec<String> = expected.iter().map(|l| l.to_string()).collect();
    let mut actual_sorted: Vec<String> = actual.iter().map(|l| l.to_string()).collect();
    expected_sorted.sort();
    actual_sorted.sort();

    if expected_sorted == actual_sorted {
        return;
    }

    let expected_text: String = expected_sorted.iter().cloned().intersperse("\n".to_string()).collect();
    let actual_text: String = actual_sorted.iter().cloned().intersperse("\n".to_string()).collect();
    let diff = diff::lines(&expected_text, &actual_text);

    let mut rendered = String::new();
    for result in &diff {
        match result {
            diff::Result::Both(a, _) => writeln!(&mut rendered, "  {}", a).unwrap(),
            diff::Result::Left(a) => writeln!(&mut rendered, "- {}", a).unwrap(),
            diff::Result::Right(a) => writeln!(&mut rendered, "+ {}", a).unwrap(),
        }
    }

    panic!("answer sets did not match, diff:\n{}", rendered);
}

pub(crate) fn int(i: i64) -> Term {
    Term::Value(Value::Int(i))
}
