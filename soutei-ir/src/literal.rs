use std::fmt;
use std::rc::Rc;

use crate::value::{Term, Value};

/// Per-argument direction on a native predicate's declared signature.
///
/// `In` must be ground at the moment of call; `Out` may be unbound and is
/// expected to come back ground on success (see `soutei-solve`'s native
/// bridge, which is the only place modes are checked against real calls).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    In,
    Out,
}

/// `(name, arity)`. Two predicates with the same name but different arity
/// never collide.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PredKey {
    pub name: Rc<str>,
    pub arity: usize,
}

impl PredKey {
    pub fn new(name: impl Into<Rc<str>>, arity: usize) -> Self {
        PredKey {
            name: name.into(),
            arity,
        }
    }
}

impl fmt::Display for PredKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

/// `Lit(pred, args)`. The argument count always equals the predicate's
/// arity for a well-formed literal; callers that violate this fail the
/// branch rather than panicking (see `soutei-unify::unify_args`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Lit {
    pub pred: Rc<str>,
    pub args: Vec<Term>,
}

impl Lit {
    pub fn new(pred: impl Into<Rc<str>>, args: Vec<Term>) -> Self {
        Lit {
            pred: pred.into(),
            args,
        }
    }

    pub fn key(&self) -> PredKey {
        PredKey::new(self.pred.clone(), self.args.len())
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.pred)?;
        for (i, a) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", a)?;
        }
        write!(f, ")")
    }
}

/// A moded literal: the signature carried by a native predicate, each
/// argument replaced by its direction rather than a term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModedLit {
    pub pred: Rc<str>,
    pub modes: Vec<Mode>,
}

impl ModedLit {
    pub fn new(pred: impl Into<Rc<str>>, modes: Vec<Mode>) -> Self {
        ModedLit {
            pred: pred.into(),
            modes,
        }
    }

    pub fn key(&self) -> PredKey {
        PredKey::new(self.pred.clone(), self.modes.len())
    }
}

/// The `assn` half of a goal `assn says lit`: either a principal term
/// (must be ground by the time the resolver needs it) or a native
/// reference, which is never a variable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AssertionRef {
    Principal(Term),
    Native(Rc<str>),
}

impl AssertionRef {
    pub fn principal(value: Value) -> Self {
        AssertionRef::Principal(Term::Value(value))
    }

    pub fn native(name: impl Into<Rc<str>>) -> Self {
        AssertionRef::Native(name.into())
    }
}

impl fmt::Display for AssertionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssertionRef::Principal(t) => write!(f, "{}", t),
            AssertionRef::Native(n) => write!(f, ":{}", n),
        }
    }
}

/// A body literal / goal: `assn says lit`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Goal {
    pub assn: AssertionRef,
    pub lit: Lit,
}

impl Goal {
    pub fn new(assn: AssertionRef, lit: Lit) -> Self {
        Goal { assn, lit }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} says {}", self.assn, self.lit)
    }
}
