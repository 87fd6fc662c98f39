//! A small `:builtin` native assertion: worked examples of the native
//! bridge (spec §4.4), and a minimal standard library for rules that
//! need comparison or string-building beyond what a purely relational
//! database provides. Not named in spec.md, which explicitly leaves any
//! *specific* native predicate library out of scope — but an engine of
//! this shape is useless to test (and to embed) without at least one
//! concrete native predicate, so this ships the obvious three, each
//! built with `NativePred::from_schema` so the mode list and the
//! evaluator's decoding come from the same `InSchema` description rather
//! than being hand-written in parallel.

use soutei_ir::Value;

use crate::native::{InSchema, NativeOutput, NativePred};

/// `eq(?a, ?b)`: succeeds iff both arguments are equal values. Worked
/// example of the `Bool` output schema composed with the polymorphic
/// `InSchema::Any` decoder.
pub fn eq_pred() -> NativePred {
    NativePred::from_schema("eq", vec![InSchema::Any, InSchema::Any], vec![], |args| {
        Some(NativeOutput::Bool(args[0] == args[1]))
    })
}

/// `lt(?a, ?b)`: succeeds iff both are integers and the first is less
/// than the second. A non-integer argument fails to decode against
/// `InSchema::Int`, which fails the branch rather than panicking.
pub fn lt_pred() -> NativePred {
    NativePred::from_schema("lt", vec![InSchema::Int, InSchema::Int], vec![], |args| {
        match (&args[0], &args[1]) {
            (Value::Int(a), Value::Int(b)) => Some(NativeOutput::Bool(a < b)),
            _ => None,
        }
    })
}

/// `concat(?a, ?b, ?out)`: string concatenation. Worked example of the
/// `Value` output schema composed after two decoded `InSchema::Str`
/// inputs.
pub fn concat_pred() -> NativePred {
    NativePred::from_schema(
        "concat",
        vec![InSchema::Str, InSchema::Str],
        vec![soutei_ir::Mode::Out],
        |args| match (&args[0], &args[1]) {
            (Value::Str(a), Value::Str(b)) => {
                let mut s = String::with_capacity(a.len() + b.len());
                s.push_str(a);
                s.push_str(b);
                Some(NativeOutput::value(Value::str(s)))
            }
            _ => None,
        },
    )
}

pub fn builtins() -> Vec<NativePred> {
    vec![eq_pred(), lt_pred(), concat_pred()]
}
