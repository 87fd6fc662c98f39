//! First-order unification over the atomic term model in `soutei-ir`.
//!
//! Grounded on the shape of `chalk-solve`'s `InferenceTable::unify`: a
//! substitution extended in place, with failure signaled distinctly from
//! success so the caller can roll back cleanly. Unlike chalk's unifier
//! there is no occurs check and no structural recursion into compound
//! terms — `Term` has no function symbols, so `unify` bottoms out in one
//! of three cases every time.

use im::HashMap;
use soutei_ir::{Term, Variable};

/// Branch failure: "this proof attempt is not a solution". Carries no
/// payload, matching spec stratum 1 — the search monad recovers from it
/// locally and it is never surfaced to an embedder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoSolution;

pub type Fallible<T> = Result<T, NoSolution>;

/// The substitution: a partial map from variable identifier to term.
///
/// Backed by an immutable hash array mapped trie (`im::HashMap`) rather
/// than a mutable map plus an undo trail. Both are legitimate per the
/// spec's own design notes; a persistent map was chosen here because the
/// search monad clones `Env` at every branch point (see `soutei-engine`),
/// and a HAMT clone is O(1) (a new root pointer) where a `HashMap` clone
/// would copy every binding made so far on every alternative explored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Env {
    bindings: HashMap<Variable, Term>,
}

impl Env {
    pub fn new() -> Self {
        Env {
            bindings: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Dereferences `t` through the substitution to its current
    /// representative. Bottoms out on a `Value` or an unbound `Variable`;
    /// termination is guaranteed by the acyclicity invariant maintained
    /// by `bind`/`unify`.
    pub fn walk(&self, t: &Term) -> Term {
        let mut current = t.clone();
        loop {
            match current {
                Term::Value(_) => return current,
                Term::Var(ref v) => match self.bindings.get(v) {
                    Some(next) => current = next.clone(),
                    None => return current,
                },
            }
        }
    }

    fn bind(&mut self, v: Variable, t: Term) {
        self.bindings.insert(v, t);
    }

    /// Unifies `a` and `b` under this substitution, extending it on
    /// success. Failure means "no solution on this branch", not a
    /// contract violation; the caller backtracks.
    pub fn unify(&mut self, a: &Term, b: &Term) -> Fallible<()> {
        let a = self.walk(a);
        let b = self.walk(b);
        if a == b {
            return Ok(());
        }
        match (a, b) {
            (Term::Var(v), other) | (other, Term::Var(v)) => {
                tracing::trace!(var = %v, term = %other, "binding");
                self.bind(v, other);
                Ok(())
            }
            (Term::Value(_), Term::Value(_)) => Err(NoSolution),
        }
    }

    /// Unifies two argument lists pairwise. A length mismatch fails the
    /// branch rather than panicking — arity is checked at assertion
    /// construction time, not here.
    pub fn unify_args(&mut self, xs: &[Term], ys: &[Term]) -> Fallible<()> {
        if xs.len() != ys.len() {
            return Err(NoSolution);
        }
        for (x, y) in xs.iter().zip(ys.iter()) {
            self.unify(x, y)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soutei_ir::Value;

    fn var(epoch: u64, name: &str) -> Term {
        Term::Var(Variable::new(epoch, name))
    }

    fn val(i: i64) -> Term {
        Term::Value(Value::Int(i))
    }

    #[test]
    fn walk_chases_bindings() {
        let mut env = Env::new();
        env.unify(&var(0, "x"), &var(0, "y")).unwrap();
        env.unify(&var(0, "y"), &val(1)).unwrap();
        assert_eq!(env.walk(&var(0, "x")), val(1));
    }

    #[test]
    fn unify_symmetry() {
        let mut forward = Env::new();
        forward.unify(&var(0, "x"), &val(7)).unwrap();
        let mut backward = Env::new();
        backward.unify(&val(7), &var(0, "x")).unwrap();
        assert_eq!(forward.walk(&var(0, "x")), backward.walk(&var(0, "x")));
    }

    #[test]
    fn walk_is_idempotent() {
        let mut env = Env::new();
        env.unify(&var(0, "x"), &var(0, "y")).unwrap();
        env.unify(&var(0, "y"), &var(0, "z")).unwrap();
        env.unify(&var(0, "z"), &val(3)).unwrap();
        let once = env.walk(&var(0, "x"));
        let twice = env.walk(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn distinct_epochs_never_clash() {
        let mut env = Env::new();
        env.unify(&var(0, "x"), &val(1)).unwrap();
        // same name, different epoch: must be an entirely separate binding
        assert_eq!(env.walk(&var(1, "x")), var(1, "x"));
    }

    #[test]
    fn mismatched_values_fail() {
        let mut env = Env::new();
        assert_eq!(env.unify(&val(1), &val(2)), Err(NoSolution));
    }

    #[test]
    fn unify_args_checks_length() {
        let mut env = Env::new();
        assert_eq!(env.unify_args(&[val(1)], &[val(1), val(2)]), Err(NoSolution));
    }
}
