use rustc_hash::FxHashMap;
use std::rc::Rc;

use soutei_ir::{PredKey, Rule, Value};

use crate::error::DatabaseError;
use crate::native::NativePred;
use crate::resolve::{compile_rule_group, CompiledPred};

/// A mapping from predicate key to compiled predicate, for one
/// principal's rule assertion.
#[derive(Clone, Default)]
pub struct Assertion {
    pub(crate) preds: FxHashMap<PredKey, CompiledPred>,
}

impl Assertion {
    /// Groups `rules` by predicate key and wraps each group in a
    /// compiled predicate (spec §4.5 `compileRules`, §4.3 "compiling
    /// rules for one predicate").
    pub fn compile_rules(rules: Vec<Rule>) -> Self {
        let mut groups: FxHashMap<PredKey, Vec<Rule>> = FxHashMap::default();
        for rule in rules {
            let key = PredKey::new(rule.head.pred.clone(), rule.head.args.len());
            groups.entry(key).or_default().push(rule);
        }
        let preds = groups
            .into_iter()
            .map(|(key, rules)| (key, compile_rule_group(Rc::new(rules))))
            .collect();
        Assertion { preds }
    }
}

/// A native assertion: a fixed table of `NativePred`s keyed by the
/// predicate key each one's moded signature implies.
#[derive(Clone, Default)]
pub struct NativeAssertion {
    pub(crate) preds: FxHashMap<PredKey, Rc<NativePred>>,
}

/// The pair of rule and native databases, monoidal under componentwise
/// union (spec §3). `Default` is the identity element.
#[derive(Clone, Default)]
pub struct Database {
    rules: FxHashMap<Value, Assertion>,
    native: FxHashMap<Rc<str>, NativeAssertion>,
}

impl Database {
    pub fn new() -> Self {
        Database::default()
    }

    pub fn rule_assertion(&self, principal: &Value) -> Option<&Assertion> {
        self.rules.get(principal)
    }

    pub fn native_assertion(&self, name: &str) -> Option<&NativeAssertion> {
        self.native.get(name)
    }

    pub fn native_pred(&self, name: &str, key: &PredKey) -> Option<&Rc<NativePred>> {
        self.native.get(name).and_then(|a| a.preds.get(key))
    }

    /// `insertRuleAssertion`: replaces whatever assertion is currently
    /// bound to `principal`.
    pub fn install(&mut self, principal: Value, assertion: Assertion) {
        self.rules.insert(principal, assertion);
    }

    /// `retractRuleAssertion`, supplemented to hand back the removed
    /// assertion so a host can restore it.
    pub fn retract(&mut self, principal: &Value) -> Option<Assertion> {
        self.rules.remove(principal)
    }

    /// `mkNativeDb`: assembles a native assertion keyed by predicate key,
    /// checking the two construction invariants from spec §7: declared
    /// vs. evaluator arity, and no duplicate predicate key within one
    /// assertion.
    pub fn install_native(
        &mut self,
        name: impl Into<Rc<str>>,
        preds: Vec<NativePred>,
    ) -> Result<(), DatabaseError> {
        let name = name.into();
        let mut map = FxHashMap::default();
        for pred in preds {
            let declared_in = pred
                .signature
                .modes
                .iter()
                .filter(|m| matches!(m, soutei_ir::Mode::In))
                .count();
            if declared_in != pred.n_in {
                return Err(DatabaseError::NativeArityMismatch {
                    pred: pred.signature.key(),
                    declared: declared_in,
                    actual: pred.n_in,
                });
            }
            let key = pred.signature.key();
            if map.insert(key.clone(), Rc::new(pred)).is_some() {
                return Err(DatabaseError::DuplicateNativePredicate {
                    assertion: name.clone(),
                    pred: key,
                });
            }
        }
        self.native.insert(name, NativeAssertion { preds: map });
        Ok(())
    }

    /// Componentwise union, right-biased: an entry present in `other`
    /// replaces the corresponding entry of `self`. This is an arbitrary
    /// but consistent tie-break (spec only specifies "componentwise
    /// union" as the monoid operation, not a conflict policy).
    pub fn union(mut self, other: Database) -> Database {
        self.rules.extend(other.rules);
        self.native.extend(other.native);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_is_associative_and_has_identity() {
        let mut a = Database::new();
        a.install(Value::str("app"), Assertion::compile_rules(vec![]));
        let mut b = Database::new();
        b.install(Value::str("other"), Assertion::compile_rules(vec![]));
        let c = Database::new();

        let left = a.clone().union(b.clone()).union(c.clone());
        let right = a.clone().union(b.clone().union(c.clone()));
        assert_eq!(left.rules.len(), right.rules.len());

        let identity = a.clone().union(Database::new());
        assert_eq!(identity.rules.len(), a.rules.len());
    }
}
