use std::rc::Rc;

use soutei_ir::{Lit, Mode, ModedLit, PredKey, Term, Value};

use crate::error::DatabaseError;

/// The shape of what a native call produced, the return half of the
/// tagged-sum schema from spec Design Notes §9 (`Value`, `Unit`, `Bool`,
/// `Tuple(n)`, `List(schema)`, `Option(schema)`). `Function(schema,
/// schema)` — the input half of that sum, realized separately below as
/// `InSchema` — has no separate runtime representation here: a
/// `NativePred`'s evaluator simply consumes its `In`-moded arguments as
/// plain `Value`s (see `NativePred::call`) before producing one of
/// these. `Effect(schema)` likewise has no dedicated variant: an
/// evaluator that performs host I/O is just a closure that does so
/// before returning one of the shapes below: the ordering guarantee
/// (spec §4.2/§5, no speculative rollback of effects) comes from the
/// scheduler only ever invoking a continuation once, in FIFO order, not
/// from anything in this enum.
pub enum NativeOutput {
    /// `Value`/`Unit`/`Tuple(n)`: zero or more produced values to unify
    /// against the call's `Out` argument terms, positionally.
    Values(Vec<Value>),
    /// `Bool`: zero output arguments; `true` succeeds, `false` fails the
    /// branch.
    Bool(bool),
    /// `Option(schema)`: zero or one solution.
    Maybe(Option<Box<NativeOutput>>),
    /// `List(schema)`: nondeterministic choice over the elements, one
    /// alternative per element, fanned out fairly by the search monad
    /// rather than tried in sequence.
    Choices(Vec<NativeOutput>),
}

impl NativeOutput {
    pub fn unit() -> Self {
        NativeOutput::Values(Vec::new())
    }

    pub fn value(v: Value) -> Self {
        NativeOutput::Values(vec![v])
    }
}

/// The input half of spec §4.4's compositional construction: "a
/// (possibly nested) input schema turning leading arguments into host
/// values via a `fromValue` partial decoder". Each variant is one
/// `fromValue` decoder for one leading argument, contributing exactly
/// one `Mode::In` to the derived signature. There is no nesting here
/// because `Term` (spec §3) has no compound structure to decode into —
/// every decoder bottoms out at a single `Value` in one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InSchema {
    /// Accepts only `Value::Int`.
    Int,
    /// Accepts only `Value::Str`.
    Str,
    /// Accepts only `Value::Bool`.
    Bool,
    /// Accepts any `Value`, unchanged — the identity decoder, for
    /// predicates (like `eq/2`) that are polymorphic over value kind.
    Any,
}

impl InSchema {
    fn decode(self, v: &Value) -> Option<Value> {
        match (self, v) {
            (InSchema::Int, Value::Int(_))
            | (InSchema::Str, Value::Str(_))
            | (InSchema::Bool, Value::Bool(_))
            | (InSchema::Any, _) => Some(v.clone()),
            _ => None,
        }
    }
}

/// A host-language function exposed as a predicate.
///
/// `signature` is the moded literal the mode-checker (external to this
/// crate) would consult before accepting a rule that calls this native
/// predicate. `n_in` is the evaluator's own declared input arity, kept
/// independent of `signature` so that `Database::install_native` can
/// catch the construction error spec §7 names: "a native predicate
/// whose advertised signature and evaluator disagree in arity".
#[derive(Clone)]
pub struct NativePred {
    pub signature: ModedLit,
    pub n_in: usize,
    pub call: Rc<dyn Fn(&[Value]) -> Option<NativeOutput>>,
}

impl NativePred {
    /// General constructor. `modes` gives the full moded signature;
    /// `call` receives exactly the walked `In`-position values, in
    /// argument order, and returns the output shape for the `Out`
    /// positions, or `None` on a decode/type mismatch (branch failure,
    /// spec §7 stratum 1 — "type-mismatched value passed to a native
    /// input decoder").
    pub fn new(
        pred: impl Into<Rc<str>>,
        modes: Vec<Mode>,
        call: impl Fn(&[Value]) -> Option<NativeOutput> + 'static,
    ) -> Self {
        let n_in = modes.iter().filter(|m| matches!(m, Mode::In)).count();
        NativePred {
            signature: ModedLit::new(pred, modes),
            n_in,
            call: Rc::new(call),
        }
    }

    /// The compositional builder spec §4.4 describes: given an
    /// `InSchema` per leading argument and an `eval` that consumes the
    /// decoded values to produce a `NativeOutput`, derives both the
    /// `Vec<Mode>` signature (one `In` per input schema, then
    /// `out_modes`) and the evaluator together, so a predicate's mode
    /// list can never drift out of sync with what its closure actually
    /// decodes — the bug class `NativePred::fact` (below) once had to
    /// be patched for.
    pub fn from_schema(
        pred: impl Into<Rc<str>>,
        inputs: Vec<InSchema>,
        out_modes: Vec<Mode>,
        eval: impl Fn(&[Value]) -> Option<NativeOutput> + 'static,
    ) -> Self {
        let mut modes: Vec<Mode> = inputs.iter().map(|_| Mode::In).collect();
        modes.extend(out_modes);
        NativePred::new(pred, modes, move |ins| {
            if ins.len() != inputs.len() {
                return None;
            }
            let mut decoded = Vec::with_capacity(ins.len());
            for (schema, v) in inputs.iter().zip(ins.iter()) {
                decoded.push(schema.decode(v)?);
            }
            eval(&decoded)
        })
    }

    /// A fact: no host call, the evaluator just unifies a fixed
    /// literal's arguments against the call's — `In` positions must
    /// match the literal's own value there, `Out` positions are handed
    /// back for the caller to unify freely.
    ///
    /// `lit`'s arguments at `In` positions must be ground; a variable
    /// there is a construction-time error (spec §7 stratum 2, the same
    /// bucket as a signature/evaluator arity mismatch), surfaced as a
    /// `DatabaseError` rather than a panic.
    pub fn fact(lit: Lit, modes: Vec<Mode>) -> Result<Self, DatabaseError> {
        let key = PredKey::new(lit.pred.clone(), modes.len());
        let ground = |t: &Term| -> Result<Value, DatabaseError> {
            match t {
                Term::Value(v) => Ok(v.clone()),
                Term::Var(_) => Err(DatabaseError::NonGroundNativeFact { pred: key.clone() }),
            }
        };
        let in_values: Vec<Value> = lit
            .args
            .iter()
            .zip(modes.iter())
            .filter(|(_, m)| matches!(m, Mode::In))
            .map(|(t, _)| ground(t))
            .collect::<Result<_, _>>()?;
        let out_values: Vec<Value> = lit
            .args
            .iter()
            .zip(modes.iter())
            .filter(|(_, m)| matches!(m, Mode::Out))
            .map(|(t, _)| ground(t))
            .collect::<Result<_, _>>()?;
        Ok(NativePred::new(lit.pred, modes, move |ins| {
            if ins != in_values.as_slice() {
                return None;
            }
            Some(NativeOutput::Values(out_values.clone()))
        }))
    }
}
