use std::rc::Rc;

use crate::value::Value;

/// A source-level term: a rule body is written against textual variable
/// names, not yet annotated with an epoch. `soutei-solve` assigns the
/// epoch once per rule-group invocation and turns these into real
/// `Term`s.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RuleTerm {
    Value(Value),
    Var(Rc<str>),
}

/// A source-level literal: predicate name plus `RuleTerm` arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RuleLit {
    pub pred: Rc<str>,
    pub args: Vec<RuleTerm>,
}

impl RuleLit {
    pub fn new(pred: impl Into<Rc<str>>, args: Vec<RuleTerm>) -> Self {
        RuleLit {
            pred: pred.into(),
            args,
        }
    }
}

/// A source-level assertion reference, before epoching.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RuleAssertionRef {
    Principal(RuleTerm),
    Native(Rc<str>),
}

/// A source-level goal: `assn says lit`, written against a rule's free
/// variable names.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RuleGoal {
    pub assn: RuleAssertionRef,
    pub lit: RuleLit,
}

impl RuleGoal {
    pub fn new(assn: RuleAssertionRef, lit: RuleLit) -> Self {
        RuleGoal { assn, lit }
    }
}

/// `head :- body.`. Compiled once, when the assertion that owns it is
/// installed (see `soutei-solve::compile_rules`); the same `Rule` value
/// is shared by every later invocation, with a fresh epoch handed out
/// per invocation rather than per rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub head: RuleLit,
    pub body: Vec<RuleGoal>,
}

impl Rule {
    pub fn new(head: RuleLit, body: Vec<RuleGoal>) -> Self {
        Rule { head, body }
    }

    pub fn fact(head: RuleLit) -> Self {
        Rule {
            head,
            body: Vec::new(),
        }
    }
}
