//! The search monad: fair, step-and-answer-bounded interleaving of
//! alternative computations.
//!
//! A plain recursive-descent search diverges on left-recursive rules
//! (`path(x,y) :- path(x,z), edge(z,y).` never reaches its base case
//! under depth-first exploration). Spec Design Notes name three
//! equivalent strategies; this module picks the first — "a stream of
//! `Done | More(thunk) | Choice(streams)` nodes with round-robin
//! scheduling" — and realizes the round-robin part literally as a FIFO
//! queue of suspended continuations, per the same notes' "Fair
//! scheduling" paragraph: popping the front and re-enqueuing whatever a
//! continuation spawns at the back.

use std::collections::VecDeque;

/// A suspended unit of work. Invoking it performs exactly one scheduler
/// step and yields a `Step`. This is the sole representation of
/// "pending alternative" in the engine; there is no separate thread or
/// generator per branch.
pub type Cont<T> = Box<dyn FnOnce() -> Step<T>>;

/// The result of forcing one `Cont`.
///
/// `answer`, if present, is one solution produced by this step.
/// `spawn` holds zero or more further continuations to enqueue — zero
/// for a branch that is finished, one for plain sequencing ("more of the
/// same branch"), and more than one where a predicate dispatch fans out
/// into several alternatives (several matching rules, several elements
/// of a native predicate's list/option output). Fanning out here, rather
/// than recursing immediately, is what keeps unrelated branches fair to
/// each other: every alternative becomes its own peer in the scheduler's
/// queue instead of a nested call frame.
pub struct Step<T> {
    pub answer: Option<T>,
    pub spawn: Vec<Cont<T>>,
}

impl<T> Step<T> {
    pub fn done() -> Self {
        Step {
            answer: None,
            spawn: Vec::new(),
        }
    }

    pub fn answer(value: T) -> Self {
        Step {
            answer: Some(value),
            spawn: Vec::new(),
        }
    }

    pub fn more(cont: Cont<T>) -> Self {
        Step {
            answer: None,
            spawn: vec![cont],
        }
    }

    pub fn answer_and_more(value: T, cont: Cont<T>) -> Self {
        Step {
            answer: Some(value),
            spawn: vec![cont],
        }
    }

    pub fn fork(conts: Vec<Cont<T>>) -> Self {
        Step {
            answer: None,
            spawn: conts,
        }
    }
}

/// Sequences a search action with a followup that depends on its result,
/// the monadic bind of this search monad. Every answer produced by
/// `cont` is handed to `f`; every further alternative `cont` spawns is
/// independently bound to `f` as well, so that binding does not collapse
/// fan-out back into a single chain.
pub fn bind<T, U>(
    cont: Cont<T>,
    f: std::rc::Rc<dyn Fn(T) -> Cont<U>>,
) -> Cont<U>
where
    T: 'static,
    U: 'static,
{
    Box::new(move || {
        let step = cont();
        let mut spawn = Vec::with_capacity(step.spawn.len() + 1);
        if let Some(t) = step.answer {
            spawn.push(f(t));
        }
        for c in step.spawn {
            spawn.push(bind(c, f.clone()));
        }
        Step {
            answer: None,
            spawn,
        }
    })
}

/// Transforms every answer a search action produces, preserving its
/// fan-out structure exactly like `bind` but without the ability to
/// spawn further alternatives — the embedding API's `run` uses this to
/// project the resolver's internal `ResolveOutcome` down to the final
/// `Lit` a caller asked for.
pub fn map<T, U>(cont: Cont<T>, f: std::rc::Rc<dyn Fn(T) -> U>) -> Cont<U>
where
    T: 'static,
    U: 'static,
{
    Box::new(move || {
        let step = cont();
        Step {
            answer: step.answer.map(|t| f(t)),
            spawn: step.spawn.into_iter().map(|c| map(c, f.clone())).collect(),
        }
    })
}

/// Which bound ended the run, per spec §6's recommendation that
/// implementations surface this even though it is not mandatory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exhaustion {
    StepLimit,
    AnswerLimit,
    NoMoreSolutions,
}

pub struct RunOutcome<T> {
    pub answers: Vec<T>,
    pub exhausted: Exhaustion,
}

/// Drives a single root continuation to completion under the two
/// mandatory bounds. Both limits are required, matching spec §4.2: the
/// engine does not support unbounded runs.
///
/// Each popped-and-invoked continuation counts as one step, regardless
/// of how many further continuations it spawns — this is the "every
/// suspension point counts one step" rule, and it is what makes the
/// mandatory dispatch yield in `soutei-solve::resolve` meaningful: a
/// predicate with many candidate rules costs one step to *discover*, not
/// one step per candidate.
pub fn run<T: 'static>(root: Cont<T>, step_limit: u64, answer_limit: u64) -> RunOutcome<T> {
    let _span = tracing::debug_span!("run", step_limit, answer_limit).entered();

    let mut queue: VecDeque<Cont<T>> = VecDeque::new();
    queue.push_back(root);

    let mut answers = Vec::new();
    if answer_limit == 0 || step_limit == 0 {
        tracing::debug!("zero bound supplied, yielding no answers");
        return RunOutcome {
            answers,
            exhausted: if answer_limit == 0 {
                Exhaustion::AnswerLimit
            } else {
                Exhaustion::StepLimit
            },
        };
    }

    let mut steps_taken = 0u64;
    while let Some(cont) = queue.pop_front() {
        if steps_taken >= step_limit {
            tracing::info!(steps_taken, "step limit exhausted");
            return RunOutcome {
                answers,
                exhausted: Exhaustion::StepLimit,
            };
        }
        steps_taken += 1;
        tracing::trace!(steps_taken, queue_len = queue.len(), "scheduler step");

        let step = cont();
        if let Some(t) = step.answer {
            answers.push(t);
            tracing::debug!(count = answers.len(), "answer found");
            if answers.len() as u64 >= answer_limit {
                tracing::info!(answers = answers.len(), "answer limit exhausted");
                return RunOutcome {
                    answers,
                    exhausted: Exhaustion::AnswerLimit,
                };
            }
        }
        for c in step.spawn {
            queue.push_back(c);
        }
    }

    tracing::debug!(steps_taken, "no more solutions");
    RunOutcome {
        answers,
        exhausted: Exhaustion::NoMoreSolutions,
    }
}
