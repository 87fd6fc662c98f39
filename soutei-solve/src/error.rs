use soutei_ir::PredKey;
use std::rc::Rc;

/// Construction errors: raised while building a database, never during
/// query evaluation. Spec stratum 2 (§7) — these prevent the database
/// from being used at all, as opposed to branch failure (stratum 1),
/// which is recovered locally by the search monad and never surfaces.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error(
        "native predicate {pred} declares {declared} input argument(s) in its signature \
         but its evaluator was built for {actual}"
    )]
    NativeArityMismatch {
        pred: PredKey,
        declared: usize,
        actual: usize,
    },

    #[error("native assertion {assertion:?} declares {pred} more than once")]
    DuplicateNativePredicate { assertion: Rc<str>, pred: PredKey },

    #[error("native fact {pred} has a variable in an `In` argument position; facts must be ground")]
    NonGroundNativeFact { pred: PredKey },
}
