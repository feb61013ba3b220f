//! The `HasLen` family: length equality and strict bounds.
//!
//! The three variants share validation and diagnostics and differ only in
//! the relational operator applied to `len(obtained)` and `n`.

use std::cmp::Ordering;

use crate::value::Value;

use super::{Checker, CheckerInfo, Verdict};

fn len_verdict(expect: Ordering, params: &[Value]) -> Verdict {
    let n = match int_param(&params[1]) {
        Some(n) => n,
        None => {
            return Verdict::fail_with(format!(
                "n must be an int*, not {}",
                params[1].type_name()
            ))
        }
    };
    let len = match params[0].length() {
        Some(len) => len as i128,
        None => return Verdict::fail_with("obtained value type has no length property"),
    };
    if len.cmp(&n) == expect {
        Verdict::pass()
    } else {
        Verdict::fail()
    }
}

// Any integer kind, signed or unsigned, of any width.
fn int_param(v: &Value) -> Option<i128> {
    match v {
        Value::Int(_, n) => Some(i128::from(*n)),
        Value::Uint(_, n) => Some(i128::from(*n)),
        _ => None,
    }
}

/// `len(obtained) == n`.
pub struct HasLen;

impl Checker for HasLen {
    fn info(&self) -> CheckerInfo {
        CheckerInfo::new("HasLen", &["obtained", "n"])
    }

    fn check(&self, params: &[Value], _names: &[&str]) -> Verdict {
        len_verdict(Ordering::Equal, params)
    }
}

/// `len(obtained) < n`.
pub struct HasLenLessThan;

impl Checker for HasLenLessThan {
    fn info(&self) -> CheckerInfo {
        CheckerInfo::new("HasLenLessThan", &["obtained", "n"])
    }

    fn check(&self, params: &[Value], _names: &[&str]) -> Verdict {
        len_verdict(Ordering::Less, params)
    }
}

/// `len(obtained) > n`.
pub struct HasLenMoreThan;

impl Checker for HasLenMoreThan {
    fn info(&self) -> CheckerInfo {
        CheckerInfo::new("HasLenMoreThan", &["obtained", "n"])
    }

    fn check(&self, params: &[Value], _names: &[&str]) -> Verdict {
        len_verdict(Ordering::Greater, params)
    }
}
