//! Error relationship checkers: `ErrorMatches` and `ErrorIs`.

use crate::value::Value;

use super::matches::compile_anchored;
use super::{Checker, CheckerInfo, Verdict};

/// Anchored regex match over an error's message. On a value mismatch the
/// verdict rewrites slot 0 to the message text under the name `"error"`, so
/// the caller can chain further string assertions against it.
pub struct ErrorMatches;

impl Checker for ErrorMatches {
    fn info(&self) -> CheckerInfo {
        CheckerInfo::new("ErrorMatches", &["value", "regex"])
    }

    fn check(&self, params: &[Value], _names: &[&str]) -> Verdict {
        if matches!(params[0], Value::Nil) {
            return Verdict::fail_with("Error value is nil");
        }
        let err = match &params[0] {
            Value::Error(e) => e,
            _ => return Verdict::fail_with("Value is not an error"),
        };
        let pattern = match params[1].text() {
            Some(p) => p,
            None => return Verdict::fail_with("Regex must be a string"),
        };
        let re = match compile_anchored(&pattern) {
            Ok(re) => re,
            Err(e) => return Verdict::fail_with(format!("Can't compile regex: {e}")),
        };
        if re.is_match(err.message()) {
            Verdict::pass()
        } else {
            Verdict::fail().with_rewrite(0, Value::str(err.message()), "error")
        }
    }
}

/// Identity search through the obtained error's wrap chain. Unrelated errors
/// fail even with identical messages.
pub struct ErrorIs;

impl Checker for ErrorIs {
    fn info(&self) -> CheckerInfo {
        CheckerInfo::new("ErrorIs", &["obtained", "expected"])
    }

    fn check(&self, params: &[Value], _names: &[&str]) -> Verdict {
        let obtained = match &params[0] {
            Value::Error(e) => e,
            _ => return Verdict::fail_with("obtained value is not an error"),
        };
        let expected = match &params[1] {
            Value::Error(e) => e,
            _ => return Verdict::fail_with("expected value is not an error"),
        };
        if obtained.is(expected) {
            Verdict::pass()
        } else {
            Verdict::fail_with("expected error doesn't contains obtained error")
        }
    }
}
