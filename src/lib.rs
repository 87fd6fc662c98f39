//! The embedding API (spec §6): the only surface a host program needs to
//! install assertions and run queries against this evaluation core. A
//! thin facade over `soutei-solve`/`soutei-engine`, the way
//! `chalk-integration` sits thinly over `chalk-solve`/`chalk-engine` —
//! parsing, lowering, and persistence are the host's job, not this
//! crate's (spec §1, "external collaborators").

use std::rc::Rc;

pub use soutei_engine::Exhaustion;
pub use soutei_ir::{
    AssertionRef, Goal, Lit, Mode, ModedLit, PredKey, Rule, RuleAssertionRef, RuleGoal, RuleLit,
    RuleTerm, Term, Value, Variable,
};
pub use soutei_solve::{
    builtins, concat_pred, eq_pred, lt_pred, Assertion, Database, DatabaseError, InSchema,
    NativeOutput, NativePred,
};

use soutei_solve::{resolve_lit, State};

/// The two mandatory bounds a run is evaluated under (spec §4.2: "Both
/// limits are mandatory; the engine does not support unbounded runs").
#[derive(Clone, Copy, Debug)]
pub struct Bounds {
    pub step_limit: u64,
    pub answer_limit: u64,
}

impl Bounds {
    pub fn new(step_limit: u64, answer_limit: u64) -> Self {
        Bounds {
            step_limit,
            answer_limit,
        }
    }
}

/// The result of a `run`: the answers found, plus which bound ended the
/// search (spec §6 "SHOULD expose a diagnostic indicating which bound
/// terminated the stream").
pub type RunOutcome = soutei_engine::RunOutcome<Lit>;

/// `run(stepLimit, answerLimit, db, query) -> list[Lit]`, generalized to
/// return the termination diagnostic alongside the answers. Callers that
/// only want the list per the literal spec signature can take
/// `outcome.answers`.
pub fn run(bounds: Bounds, db: Database, query: Goal) -> RunOutcome {
    let state = State::new(Rc::new(db));
    let root = resolve_lit(state, query.assn, query.lit);
    let projected = soutei_engine::map(root, Rc::new(|outcome: soutei_solve::ResolveOutcome| {
        outcome.lit
    }));
    soutei_engine::run(projected, bounds.step_limit, bounds.answer_limit)
}

/// `compileQuery(assn, pred, args) -> Goal`. If `assn` begins with `:`,
/// the goal is a native reference with the leading colon stripped (the
/// resolved choice from spec Design Notes §9's open question); otherwise
/// `assn` is used verbatim as a string-valued principal.
pub fn compile_query(assn: &str, pred: &str, args: Vec<Term>) -> Goal {
    let lit = Lit::new(pred, args);
    match assn.strip_prefix(':') {
        Some(native_name) => Goal::new(AssertionRef::native(native_name), lit),
        None => Goal::new(AssertionRef::principal(Value::str(assn)), lit),
    }
}

/// `install(principal, compiled_rules)`: compiles `rules` and replaces
/// whatever assertion is currently bound to `principal`.
pub fn install(db: &mut Database, principal: Value, rules: Vec<Rule>) {
    db.install(principal, Assertion::compile_rules(rules));
}

/// `retract(principal)`, returning the assertion that was removed, if
/// any.
pub fn retract(db: &mut Database, principal: &Value) -> Option<Assertion> {
    db.retract(principal)
}

/// `installNative(name, preds)`.
pub fn install_native(
    db: &mut Database,
    name: impl Into<Rc<str>>,
    preds: Vec<NativePred>,
) -> Result<(), DatabaseError> {
    db.install_native(name, preds)
}
