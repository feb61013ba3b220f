//! Nil-ness and truthiness checkers: `IsNil`, `NotNil`, `IsTrue`, `IsFalse`.

use crate::value::Value;

use super::{Checker, CheckerInfo, Verdict};

// Classified truthiness over the closed kind set: zero numbers, empty
// text/containers, the untyped nil and empty error messages are falsy;
// everything else is truthy. Channels are truthy even when nil; nil-ness is
// the province of `IsNil`.
fn truthy(v: &Value) -> bool {
    match v {
        Value::Nil => false,
        Value::Bool(b) => *b,
        Value::Int(_, n) => *n != 0,
        Value::Uint(_, n) => *n != 0,
        Value::F32(f) => *f != 0.0,
        Value::F64(f) => *f != 0.0,
        Value::Str(s) => !s.is_empty(),
        Value::Bytes(b) => !b.is_empty(),
        Value::Seq(items) => !items.is_empty(),
        Value::Map(pairs) => !pairs.is_empty(),
        Value::Error(e) => !e.message().is_empty(),
        Value::Chan(_) | Value::Struct(_) | Value::Ptr(_) | Value::Func(_) | Value::Iface(_) => {
            true
        }
    }
}

macro_rules! unary_checker {
    ($(#[$doc:meta])* $name:ident, $pred:expr) => {
        $(#[$doc])*
        pub struct $name;

        impl Checker for $name {
            fn info(&self) -> CheckerInfo {
                CheckerInfo::new(stringify!($name), &["value"])
            }

            fn check(&self, params: &[Value], _names: &[&str]) -> Verdict {
                #[allow(clippy::redundant_closure_call)]
                if ($pred)(&params[0]) {
                    Verdict::pass()
                } else {
                    Verdict::fail()
                }
            }
        }
    };
}

unary_checker!(
    /// The value is nil: an explicit nil or a nil channel.
    IsNil,
    |v: &Value| v.is_nil()
);
unary_checker!(NotNil, |v: &Value| !v.is_nil());
unary_checker!(
    /// The value is truthy under the classified truthiness rules.
    IsTrue,
    truthy
);
unary_checker!(IsFalse, |v: &Value| !truthy(v));
