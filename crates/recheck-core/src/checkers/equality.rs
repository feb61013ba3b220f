//! `Equals` and `DeepEquals`.

use crate::diff::{diff, render_diff};
use crate::value::Value;

use super::{Checker, CheckerInfo, Verdict};

/// Identity-first equality: native comparison on comparable kinds, with a
/// structural diff fallback for struct and pointer-to-struct mismatches.
/// Uncomparable kinds (slice, map, function) yield the recovered runtime
/// error as a sentinel rather than crashing the caller.
pub struct Equals;

impl Checker for Equals {
    fn info(&self) -> CheckerInfo {
        CheckerInfo::new("Equals", &["obtained", "expected"])
    }

    fn check(&self, params: &[Value], _names: &[&str]) -> Verdict {
        equals_verdict(&params[0], &params[1])
    }
}

pub(crate) fn equals_verdict(obtained: &Value, expected: &Value) -> Verdict {
    match (matches!(obtained, Value::Nil), matches!(expected, Value::Nil)) {
        (true, true) => return Verdict::pass(),
        (true, false) | (false, true) => return Verdict::fail(),
        (false, false) => {}
    }
    if obtained.type_name() != expected.type_name() {
        return Verdict::fail();
    }
    match obtained.native_eq(expected) {
        Ok(true) => Verdict::pass(),
        Ok(false) => {
            if is_structish(obtained) || is_structish(expected) {
                let entries = diff(obtained, expected);
                if entries.is_empty() {
                    // Distinct pointers to equal content.
                    Verdict::fail()
                } else {
                    Verdict::fail_with(render_diff(&entries))
                }
            } else {
                Verdict::fail()
            }
        }
        Err(type_name) => {
            Verdict::fail_with(format!("runtime error: comparing uncomparable type {type_name}"))
        }
    }
}

fn is_structish(v: &Value) -> bool {
    match v {
        Value::Struct(_) => true,
        Value::Ptr(target) => matches!(**target, Value::Struct(_)),
        _ => false,
    }
}

/// Structural equality with container support: always runs the diff engine,
/// so slices, maps and arrays compare element-wise. A lone top-level scalar
/// mismatch keeps the diagnostic empty; any nested mismatch renders the
/// diff.
pub struct DeepEquals;

impl Checker for DeepEquals {
    fn info(&self) -> CheckerInfo {
        CheckerInfo::new("DeepEquals", &["obtained", "expected"])
    }

    fn check(&self, params: &[Value], _names: &[&str]) -> Verdict {
        let entries = diff(&params[0], &params[1]);
        if entries.is_empty() {
            return Verdict::pass();
        }
        if entries.len() == 1 && entries[0].path.is_empty() {
            return Verdict::fail();
        }
        Verdict::fail_with(render_diff(&entries))
    }
}
