//! Checker contract, negation combinator and the built-in checkers.
//!
//! A checker is an immutable, stateless singleton: `info()` names it and its
//! parameters, `check(params, names)` produces a [`Verdict`]. Rewriting a
//! parameter/name pair for diagnostic chaining is an explicit field on the
//! verdict rather than in-place mutation, so callers apply it deliberately
//! via [`apply_rewrite`].

pub mod contains;
pub mod equality;
pub mod errors;
pub mod length;
pub mod matches;
pub mod ordering;
pub mod panics;
pub mod truth;
pub mod types;

pub use contains::{Contains, NotContains};
pub use equality::{DeepEquals, Equals};
pub use errors::{ErrorIs, ErrorMatches};
pub use length::{HasLen, HasLenLessThan, HasLenMoreThan};
pub use matches::Matches;
pub use ordering::{
    EqualsFloat32, EqualsMore, LessOrEqualThan, LessThan, MoreOrEqualThan, MoreThan,
};
pub use panics::{PanicMatches, Panics};
pub use truth::{IsFalse, IsNil, IsTrue, NotNil};
pub use types::{FitsTypeOf, Implements};

use crate::value::Value;

/// Checker identity: name plus ordered parameter names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerInfo {
    pub name: String,
    pub params: Vec<&'static str>,
}

impl CheckerInfo {
    pub fn new(name: impl Into<String>, params: &[&'static str]) -> Self {
        CheckerInfo { name: name.into(), params: params.to_vec() }
    }
}

/// Replacement of one parameter/name pair, visible on the verdict so the
/// caller can re-assert against a derived value (an error's message, a
/// captured panic payload).
#[derive(Debug, Clone)]
pub struct Rewrite {
    pub index: usize,
    pub value: Value,
    pub name: &'static str,
}

/// Outcome of a check invocation. The diagnostic is empty exactly when the
/// check succeeded and has nothing further to say; a non-empty diagnostic
/// with `matched == false` is either a usage-error sentinel or a value
/// mismatch.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub matched: bool,
    pub diagnostic: String,
    pub rewrite: Option<Rewrite>,
}

impl Verdict {
    pub fn pass() -> Self {
        Verdict { matched: true, diagnostic: String::new(), rewrite: None }
    }

    pub fn fail() -> Self {
        Verdict { matched: false, diagnostic: String::new(), rewrite: None }
    }

    pub fn fail_with(diagnostic: impl Into<String>) -> Self {
        Verdict { matched: false, diagnostic: diagnostic.into(), rewrite: None }
    }

    pub fn with_rewrite(mut self, index: usize, value: Value, name: &'static str) -> Self {
        self.rewrite = Some(Rewrite { index, value, name });
        self
    }
}

/// The checker contract. Implementations are `Send + Sync` and hold no
/// mutable state, so a single instance may be shared across concurrently
/// running tests. Arity (`params.len() == info().params.len()`) is a caller
/// precondition, not a verdict.
pub trait Checker: Send + Sync {
    fn info(&self) -> CheckerInfo;
    fn check(&self, params: &[Value], names: &[&str]) -> Verdict;
}

/// Inverts a checker's boolean verdict. The diagnostic is forwarded
/// unchanged so usage errors still explain why the inner check could not
/// run; `not(not(x))` restores the original boolean.
pub struct Not<C>(pub C);

pub fn not<C: Checker>(inner: C) -> Not<C> {
    Not(inner)
}

impl<C: Checker> Checker for Not<C> {
    fn info(&self) -> CheckerInfo {
        let inner = self.0.info();
        CheckerInfo { name: format!("Not({})", inner.name), params: inner.params }
    }

    fn check(&self, params: &[Value], names: &[&str]) -> Verdict {
        let mut verdict = self.0.check(params, names);
        verdict.matched = !verdict.matched;
        verdict
    }
}

/// Applies a verdict's rewrite, if any, to the caller's parameter and name
/// slots, making the derived value visible to later checks against the same
/// slots.
pub fn apply_rewrite(verdict: &Verdict, params: &mut [Value], names: &mut [String]) {
    if let Some(r) = &verdict.rewrite {
        if r.index < params.len() {
            params[r.index] = r.value.clone();
            names[r.index] = r.name.to_string();
        }
    }
}

/// Dispatch helper for suite runners: runs the checker and traces the
/// outcome.
pub fn run_checker(checker: &dyn Checker, params: &[Value], names: &[&str]) -> Verdict {
    let info = checker.info();
    let verdict = checker.check(params, names);
    tracing::debug!(
        checker = %info.name,
        matched = verdict.matched,
        diagnostic = %verdict.diagnostic,
        "check evaluated"
    );
    verdict
}
