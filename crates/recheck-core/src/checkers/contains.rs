//! Membership checkers: `Contains` and `NotContains`.
//!
//! The container is the second parameter. Map membership is tested against
//! keys, string membership via substring of the obtained value's textual
//! form, and sequence membership via element-wise structural equality with
//! exact kind match (no cross-numeric-kind coercion).

use crate::diff::deep_eq;
use crate::render::text_form;
use crate::value::Value;

use super::{Checker, CheckerInfo, Verdict};

// Err(()) means the container kind cannot hold members at all.
fn find(obtained: &Value, container: &Value) -> Result<bool, ()> {
    match container {
        Value::Str(s) => Ok(s.contains(&text_form(obtained))),
        Value::Seq(items) => Ok(items.iter().any(|e| deep_eq(e, obtained))),
        Value::Bytes(items) => {
            Ok(items.iter().any(|b| deep_eq(&Value::uint8(*b), obtained)))
        }
        Value::Map(pairs) => Ok(pairs.iter().any(|(k, _)| deep_eq(k, obtained))),
        // Channel members cannot be enumerated without draining them.
        Value::Chan(_) => Ok(false),
        _ => Err(()),
    }
}

pub struct Contains;

impl Checker for Contains {
    fn info(&self) -> CheckerInfo {
        CheckerInfo::new("Contains", &["obtained", "expected"])
    }

    fn check(&self, params: &[Value], _names: &[&str]) -> Verdict {
        match find(&params[0], &params[1]) {
            Err(()) => {
                Verdict::fail_with("expected value type is not Map, Array, Slice, Chan or String")
            }
            Ok(true) => Verdict::pass(),
            Ok(false) => Verdict::fail_with("expected does not contain obtained"),
        }
    }
}

/// Negated membership with its own wording. An invalid container trivially
/// does not contain the obtained value, so it succeeds.
pub struct NotContains;

impl Checker for NotContains {
    fn info(&self) -> CheckerInfo {
        CheckerInfo::new("NotContains", &["obtained", "expected"])
    }

    fn check(&self, params: &[Value], _names: &[&str]) -> Verdict {
        match find(&params[0], &params[1]) {
            Ok(true) => Verdict::fail_with("expected value contains obtained value"),
            Ok(false) | Err(()) => Verdict::pass(),
        }
    }
}
