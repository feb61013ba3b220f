//! `Matches`: anchored regex over a value's textual form.

use regex::Regex;

use crate::value::Value;

use super::{Checker, CheckerInfo, Verdict};

/// Compiles a pattern anchored to the full string, as every regex checker
/// expects.
pub(crate) fn compile_anchored(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{pattern})$"))
}

// String form accepted by the regex checkers: strings, byte sequences and
// error messages.
pub(crate) fn string_form(v: &Value) -> Option<String> {
    match v {
        Value::Error(e) => Some(e.message().to_string()),
        _ => v.text(),
    }
}

pub struct Matches;

impl Checker for Matches {
    fn info(&self) -> CheckerInfo {
        CheckerInfo::new("Matches", &["value", "regex"])
    }

    fn check(&self, params: &[Value], _names: &[&str]) -> Verdict {
        let text = match string_form(&params[0]) {
            Some(t) => t,
            None => {
                return Verdict::fail_with("Obtained value is not a string and has no .String()")
            }
        };
        let pattern = match params[1].text() {
            Some(p) => p,
            None => return Verdict::fail_with("Regex must be a string"),
        };
        match compile_anchored(&pattern) {
            Ok(re) if re.is_match(&text) => Verdict::pass(),
            Ok(_) => Verdict::fail(),
            Err(e) => Verdict::fail_with(format!("Can't compile regex: {e}")),
        }
    }
}
