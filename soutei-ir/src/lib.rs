//! Term, value, and assertion types for the soutei evaluation core.
//!
//! This crate carries no resolution logic: it is the data model that
//! `soutei-unify`, `soutei-engine`, and `soutei-solve` build on, the way
//! `chalk-ir` sits underneath `chalk-engine` and `chalk-solve`.

mod literal;
mod rule;
mod value;

pub use literal::{AssertionRef, Goal, Lit, Mode, ModedLit, PredKey};
pub use rule::{Rule, RuleAssertionRef, RuleGoal, RuleLit, RuleTerm};
pub use value::{Term, Value, Variable};
