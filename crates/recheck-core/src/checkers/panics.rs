//! Panic capture checkers: `Panics` and `PanicMatches`.
//!
//! The supplied callable is invoked exactly once inside a catch-unwind
//! boundary; the unwind never propagates past it. The captured payload is
//! rewritten into slot 0 under the name `"panic"` on mismatch, so the caller
//! can chain further assertions against it, mirroring `ErrorMatches`.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::render::text_form;
use crate::value::Value;

use super::equality::equals_verdict;
use super::matches::compile_anchored;
use super::{Checker, CheckerInfo, Verdict};

enum Invocation {
    NotAFunction,
    Returned,
    Panicked(Value),
}

fn invoke(param: &Value) -> Invocation {
    let f = match param {
        Value::Func(f) if f.arity() == 0 => f,
        _ => return Invocation::NotAFunction,
    };
    let body = f.body();
    match catch_unwind(AssertUnwindSafe(move || body())) {
        Ok(()) => Invocation::Returned,
        Err(payload) => {
            let value = payload_value(payload);
            tracing::debug!(payload = %text_form(&value), "captured panic");
            Invocation::Panicked(value)
        }
    }
}

// Payloads raised through `panic!` with a format string arrive as `String`
// (or `&str` for a literal); `panic_any` can carry a `Value` directly,
// including `Value::Nil` for a nil panic. Anything else is opaque.
fn payload_value(payload: Box<dyn Any + Send>) -> Value {
    let payload = match payload.downcast::<Value>() {
        Ok(v) => return *v,
        Err(p) => p,
    };
    let payload = match payload.downcast::<String>() {
        Ok(s) => return Value::Str(*s),
        Err(p) => p,
    };
    match payload.downcast::<&'static str>() {
        Ok(s) => Value::str(*s),
        Err(_) => Value::str("<opaque panic payload>"),
    }
}

/// Invokes `function` and compares the captured panic payload against
/// `expected`: strings byte-wise, errors by message, structs and pointers by
/// content with a structural diff on mismatch. A nil panic is a distinct
/// captured state, equal only to an explicit nil expectation.
pub struct Panics;

impl Checker for Panics {
    fn info(&self) -> CheckerInfo {
        CheckerInfo::new("Panics", &["function", "expected"])
    }

    fn check(&self, params: &[Value], _names: &[&str]) -> Verdict {
        let captured = match invoke(&params[0]) {
            Invocation::NotAFunction => {
                return Verdict::fail_with("Function must take zero arguments")
            }
            Invocation::Returned => return Verdict::fail_with("Function has not panicked"),
            Invocation::Panicked(v) => v,
        };
        let verdict = match (&captured, &params[1]) {
            (Value::Error(a), Value::Error(b)) => {
                if a.message() == b.message() {
                    Verdict::pass()
                } else {
                    Verdict::fail()
                }
            }
            _ => equals_verdict(&captured, &params[1]),
        };
        if verdict.matched {
            verdict
        } else {
            let diagnostic = verdict.diagnostic;
            Verdict::fail_with(diagnostic).with_rewrite(0, captured, "panic")
        }
    }
}

/// Invokes `function` and matches the captured panic payload's string form
/// against an anchored regex.
///
/// A nil panic has no inherent string form. By default it is rendered as the
/// fixed sentinel `"panic called with nil argument"` and matched like any
/// other payload; setting `nil_panic_matches` makes a nil panic satisfy any
/// pattern instead.
#[derive(Default)]
pub struct PanicMatches {
    pub nil_panic_matches: bool,
}

pub(crate) const NIL_PANIC_STRING: &str = "panic called with nil argument";

impl Checker for PanicMatches {
    fn info(&self) -> CheckerInfo {
        CheckerInfo::new("PanicMatches", &["function", "expected"])
    }

    fn check(&self, params: &[Value], _names: &[&str]) -> Verdict {
        let captured = match invoke(&params[0]) {
            Invocation::NotAFunction => {
                return Verdict::fail_with("Function must take zero arguments")
            }
            Invocation::Returned => return Verdict::fail_with("Function has not panicked"),
            Invocation::Panicked(v) => v,
        };
        let output = match &captured {
            Value::Nil if self.nil_panic_matches => return Verdict::pass(),
            Value::Nil => NIL_PANIC_STRING.to_string(),
            other => text_form(other),
        };
        let pattern = match params[1].text() {
            Some(p) => p,
            None => return Verdict::fail_with("Regex must be a string"),
        };
        let re = match compile_anchored(&pattern) {
            Ok(re) => re,
            Err(e) => return Verdict::fail_with(format!("Can't compile regex: {e}")),
        };
        if re.is_match(&output) {
            Verdict::pass()
        } else {
            Verdict::fail().with_rewrite(0, Value::Str(output), "panic")
        }
    }
}
