use std::rc::Rc;

use soutei_ir::{
    AssertionRef, Goal, Lit, Rule, RuleAssertionRef, RuleGoal, RuleLit, RuleTerm, Term, Variable,
};

use crate::native::NativeOutput;
use crate::state::State;

/// The result of successfully resolving one goal: the state as modified
/// by unification during the attempt, and the call literal with its
/// arguments walked through the resulting substitution (spec §4.3 step
/// 4: "return `Lit(p, walk(arg_i) for each arg)`").
pub struct ResolveOutcome {
    pub state: State,
    pub lit: Lit,
}

/// A compiled predicate: `(state, call literal) -> search action`. Bound
/// into an `Assertion` by predicate key. Returns a `Step` directly
/// rather than a further `Cont`, because by the time a `CompiledPred` is
/// invoked the mandatory dispatch yield (spec §4.2's "sole mandatory
/// suspension point") has already happened in `resolve_lit`, which is
/// what produced the `Cont` that led here.
pub type CompiledPred = Rc<dyn Fn(State, Lit) -> soutei_engine::Step<ResolveOutcome>>;

/// The resolver's single entry point: `resolve(goal) -> Lit` from spec
/// §4.3, generalized to also thread the resulting `State`, since
/// `soutei-solve` needs it to sequence further body literals.
///
/// Returning a boxed closure rather than computing eagerly *is* the
/// mandatory yield: the caller enqueues this `Cont` in the scheduler
/// instead of calling it inline, so every predicate dispatch costs
/// exactly one scheduler step before any rule or native evaluator runs.
pub fn resolve_lit(
    state: State,
    assn: AssertionRef,
    lit: Lit,
) -> soutei_engine::Cont<ResolveOutcome> {
    Box::new(move || dispatch(state, assn, lit))
}

fn dispatch(state: State, assn: AssertionRef, lit: Lit) -> soutei_engine::Step<ResolveOutcome> {
    match assn {
        AssertionRef::Native(name) => {
            let key = lit.key();
            let pred = match state.db.native_pred(&name, &key) {
                Some(p) => p.clone(),
                None => return soutei_engine::Step::done(),
            };
            dispatch_native(&pred, state, lit)
        }
        AssertionRef::Principal(term) => {
            let principal = match state.env.walk(&term).as_value() {
                Some(v) => v.clone(),
                // An unground assertion reference at resolve time fails
                // the branch (spec §4.3 "Assertion reference semantics").
                None => return soutei_engine::Step::done(),
            };
            let key = lit.key();
            let compiled = match state
                .db
                .rule_assertion(&principal)
                .and_then(|a| a.preds.get(&key))
            {
                Some(c) => c.clone(),
                None => return soutei_engine::Step::done(),
            };
            tracing::trace!(assn = %principal, pred = %key, "dispatching rule assertion");
            (compiled)(state, lit)
        }
    }
}

fn dispatch_native(
    pred: &crate::native::NativePred,
    state: State,
    call: Lit,
) -> soutei_engine::Step<ResolveOutcome> {
    let modes = &pred.signature.modes;
    if modes.len() != call.args.len() {
        return soutei_engine::Step::done();
    }
    let mut ins = Vec::with_capacity(pred.n_in);
    let mut out_positions = Vec::new();
    for (i, mode) in modes.iter().enumerate() {
        match mode {
            soutei_ir::Mode::In => match state.env.walk(&call.args[i]).as_value() {
                Some(v) => ins.push(v.clone()),
                None => return soutei_engine::Step::done(),
            },
            soutei_ir::Mode::Out => out_positions.push(i),
        }
    }
    let output = match (pred.call)(&ins) {
        Some(o) => o,
        None => return soutei_engine::Step::done(),
    };
    let out_terms: Vec<Term> = out_positions.iter().map(|&i| call.args[i].clone()).collect();
    apply_native_output(output, out_terms, state, call)
}

fn apply_native_output(
    output: NativeOutput,
    out_terms: Vec<Term>,
    mut state: State,
    call: Lit,
) -> soutei_engine::Step<ResolveOutcome> {
    match output {
        NativeOutput::Bool(true) => finish(state, call),
        NativeOutput::Bool(false) => soutei_engine::Step::done(),
        NativeOutput::Values(values) => {
            if values.len() != out_terms.len() {
                return soutei_engine::Step::done();
            }
            for (value, term) in values.into_iter().zip(out_terms.iter()) {
                if state.env.unify(term, &Term::Value(value)).is_err() {
                    return soutei_engine::Step::done();
                }
            }
            finish(state, call)
        }
        NativeOutput::Maybe(None) => soutei_engine::Step::done(),
        NativeOutput::Maybe(Some(inner)) => apply_native_output(*inner, out_terms, state, call),
        NativeOutput::Choices(items) => {
            let conts: Vec<soutei_engine::Cont<ResolveOutcome>> = items
                .into_iter()
                .map(|item| {
                    let state = state.clone();
                    let out_terms = out_terms.clone();
                    let call = call.clone();
                    Box::new(move || apply_native_output(item, out_terms, state, call))
                        as soutei_engine::Cont<ResolveOutcome>
                })
                .collect();
            soutei_engine::Step::fork(conts)
        }
    }
}

fn finish(state: State, call: Lit) -> soutei_engine::Step<ResolveOutcome> {
    let args = call.args.iter().map(|a| state.env.walk(a)).collect();
    let lit = Lit {
        pred: call.pred.clone(),
        args,
    };
    soutei_engine::Step::answer(ResolveOutcome { state, lit })
}

/// Compiles one predicate-key group of rules into a `CompiledPred`, per
/// spec §4.3 "Compiling rules for one predicate": a single fresh epoch
/// is allocated per *invocation*, shared by every rule's head and body
/// in that invocation, and the alternatives are combined with fair
/// disjunction by fanning each rule out into its own continuation.
pub fn compile_rule_group(rules: Rc<Vec<Rule>>) -> CompiledPred {
    Rc::new(move |mut state: State, call: Lit| -> soutei_engine::Step<ResolveOutcome> {
        let epoch = state.fresh_epoch();
        let conts: Vec<soutei_engine::Cont<ResolveOutcome>> = rules
            .iter()
            .map(|rule| {
                let rule = rule.clone();
                let state = state.clone();
                let call = call.clone();
                Box::new(move || try_rule(state, epoch, rule, call))
                    as soutei_engine::Cont<ResolveOutcome>
            })
            .collect();
        soutei_engine::Step::fork(conts)
    })
}

fn try_rule(
    mut state: State,
    epoch: u64,
    rule: Rule,
    call: Lit,
) -> soutei_engine::Step<ResolveOutcome> {
    if rule.head.args.len() != call.args.len() {
        return soutei_engine::Step::done();
    }
    let head_args: Vec<Term> = instantiate_args(&rule.head.args, epoch);
    if state.env.unify_args(&head_args, &call.args).is_err() {
        return soutei_engine::Step::done();
    }
    let body = Rc::new(rule.body);
    soutei_engine::Step::more(resolve_body(state, body, 0, epoch, call))
}

fn resolve_body(
    state: State,
    goals: Rc<Vec<RuleGoal>>,
    idx: usize,
    epoch: u64,
    call: Lit,
) -> soutei_engine::Cont<ResolveOutcome> {
    if idx == goals.len() {
        return Box::new(move || finish(state, call));
    }
    let goal = instantiate_goal(&goals[idx], epoch);
    let first = resolve_lit(state, goal.assn, goal.lit);
    let rest = goals.clone();
    soutei_engine::bind(
        first,
        Rc::new(move |outcome: ResolveOutcome| {
            resolve_body(outcome.state, rest.clone(), idx + 1, epoch, call.clone())
        }),
    )
}

fn instantiate_term(term: &RuleTerm, epoch: u64) -> Term {
    match term {
        RuleTerm::Value(v) => Term::Value(v.clone()),
        RuleTerm::Var(name) => Term::Var(Variable::new(epoch, name.clone())),
    }
}

fn instantiate_args(args: &[RuleTerm], epoch: u64) -> Vec<Term> {
    args.iter().map(|t| instantiate_term(t, epoch)).collect()
}

fn instantiate_lit(lit: &RuleLit, epoch: u64) -> Lit {
    Lit::new(lit.pred.clone(), instantiate_args(&lit.args, epoch))
}

fn instantiate_assn(assn: &RuleAssertionRef, epoch: u64) -> AssertionRef {
    match assn {
        RuleAssertionRef::Principal(t) => AssertionRef::Principal(instantiate_term(t, epoch)),
        RuleAssertionRef::Native(n) => AssertionRef::Native(n.clone()),
    }
}

fn instantiate_goal(goal: &RuleGoal, epoch: u64) -> Goal {
    Goal::new(instantiate_assn(&goal.assn, epoch), instantiate_lit(&goal.lit, epoch))
}
