use std::rc::Rc;

use soutei_unify::Env;

use crate::database::Database;

/// Runtime state threaded through one resolution branch: the
/// substitution, the fresh-epoch counter, and the database in force for
/// this query. Cloned at every branch point; cheap because `Env` is a
/// persistent map and `db` is reference-counted and never mutated during
/// a query (spec §5: "the database is read-only during a query").
///
/// Epoch `0` is reserved for a query's own free variables, assigned once
/// by `soutei::compile_query` — `fresh_epoch` starts handing out `1` so a
/// query variable can never collide with a rule invocation's variables.
#[derive(Clone)]
pub struct State {
    pub env: Env,
    next_epoch: u64,
    pub db: Rc<Database>,
}

impl State {
    pub fn new(db: Rc<Database>) -> Self {
        State {
            env: Env::new(),
            next_epoch: 1,
            db,
        }
    }

    /// Allocates a fresh epoch, per rule-group *invocation* rather than
    /// per rule (spec §4.3): every rule sharing a predicate key in one
    /// invocation gets the same epoch, so their heads and bodies see the
    /// same freshly-renamed variables, while a recursive call into the
    /// same rule allocates another, later epoch.
    pub fn fresh_epoch(&mut self) -> u64 {
        let epoch = self.next_epoch;
        self.next_epoch += 1;
        epoch
    }
}

pub const QUERY_EPOCH: u64 = 0;
