//! Ordering and tolerance checkers atop the shared coercion core.

use crate::compare::{self, Relation};
use crate::value::Value;

use super::{Checker, CheckerInfo, Verdict};

fn order_verdict(rel: Relation, params: &[Value]) -> Verdict {
    match compare::check_order(rel, &params[0], &params[1]) {
        Ok(()) => Verdict::pass(),
        Err(e) => Verdict::fail_with(e.to_string()),
    }
}

macro_rules! order_checker {
    ($(#[$doc:meta])* $name:ident, $rel:expr) => {
        $(#[$doc])*
        pub struct $name;

        impl Checker for $name {
            fn info(&self) -> CheckerInfo {
                CheckerInfo::new(stringify!($name), &["obtained", "expected"])
            }

            fn check(&self, params: &[Value], _names: &[&str]) -> Verdict {
                order_verdict($rel, params)
            }
        }
    };
}

order_checker!(
    /// Strictly greater, within a single numeric or string-like category.
    MoreThan,
    Relation::More
);
order_checker!(
    /// Strictly less, within a single numeric or string-like category.
    LessThan,
    Relation::Less
);
order_checker!(MoreOrEqualThan, Relation::MoreOrEqual);
order_checker!(LessOrEqualThan, Relation::LessOrEqual);

/// Equality with safe cross-width (and cross-sign) integer coercion and
/// byte-wise string-like comparison.
pub struct EqualsMore;

impl Checker for EqualsMore {
    fn info(&self) -> CheckerInfo {
        CheckerInfo::new("EqualsMore", &["obtained", "expected"])
    }

    fn check(&self, params: &[Value], _names: &[&str]) -> Verdict {
        match compare::equals_more(&params[0], &params[1]) {
            Ok(()) => Verdict::pass(),
            Err(e) => Verdict::fail_with(e.to_string()),
        }
    }
}

/// Equality after coercing every numeric operand to float32, with dedicated
/// overflow sentinels at the float32 range boundary.
pub struct EqualsFloat32;

impl Checker for EqualsFloat32 {
    fn info(&self) -> CheckerInfo {
        CheckerInfo::new("EqualsFloat32", &["obtained", "expected"])
    }

    fn check(&self, params: &[Value], _names: &[&str]) -> Verdict {
        match compare::equals_float32(&params[0], &params[1]) {
            Ok(()) => Verdict::pass(),
            Err(e) => Verdict::fail_with(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{
        NO_EQUALS_MORE_STRING_ERROR, NO_LESS_OR_EQUAL_THAN_STRING_ERROR, NO_LESS_THAN_STRING_ERROR,
    };

    fn check(c: &dyn Checker, obtained: Value, expected: Value) -> (bool, String) {
        let v = c.check(&[obtained, expected], &["obtained", "expected"]);
        (v.matched, v.diagnostic)
    }

    #[test]
    fn more_than_numeric() {
        assert_eq!(check(&MoreThan, Value::int(43), Value::int(42)), (true, String::new()));
        assert_eq!(check(&MoreThan, Value::f32(43.11), Value::f32(43.1)), (true, String::new()));
        assert_eq!(check(&MoreThan, Value::f64(43.1201), Value::f64(43.12)), (true, String::new()));
        assert_eq!(
            check(&MoreThan, Value::uint64(4554), Value::uint64(4455)),
            (true, String::new())
        );
    }

    #[test]
    fn more_than_rejects_mixed_kinds() {
        assert_eq!(
            check(&MoreThan, Value::int(43342), Value::f64(f64::from(f32::MAX) + 1000.0)),
            (false, "Comparing incomparable type int and float64".to_string())
        );
        assert_eq!(
            check(&MoreThan, Value::f32(43.12), Value::uint64(43)),
            (false, "Comparing incomparable type float32 and uint64".to_string())
        );
        assert_eq!(
            check(&MoreThan, Value::int(41), Value::str("42")),
            (false, "Comparing incomparable type int and string".to_string())
        );
        assert_eq!(
            check(&MoreThan, Value::bytes(b"42".to_vec()), Value::f64(123.543)),
            (false, "Comparing incomparable type []uint8 and float64".to_string())
        );
    }

    #[test]
    fn more_than_float32_range_guard() {
        assert_eq!(
            check(
                &MoreThan,
                Value::f64(f64::from(f32::MAX) + 1000.0),
                Value::f32(f32::MAX - 1.0e33)
            ),
            (false, "Comparing incomparable type float64 and float32".to_string())
        );
    }

    #[test]
    fn more_than_strings() {
        assert_eq!(check(&MoreThan, Value::str("43"), Value::str("42")), (true, String::new()));
        assert_eq!(
            check(&MoreThan, Value::str("423"), Value::bytes(b"421".to_vec())),
            (true, String::new())
        );
        assert_eq!(
            check(&MoreThan, Value::bytes(b"42".to_vec()), Value::str("42")),
            (false, "First (string) parameter equals (string) second, expect more".to_string())
        );
        assert_eq!(
            check(&MoreThan, Value::bytes(b"42".to_vec()), Value::str("421")),
            (false, NO_LESS_THAN_STRING_ERROR.to_string())
        );
        assert_eq!(
            check(&MoreThan, Value::str("ABC"), Value::str("abc")),
            (false, NO_LESS_THAN_STRING_ERROR.to_string())
        );
    }

    #[test]
    fn less_than_strings() {
        assert_eq!(check(&LessThan, Value::str("42"), Value::str("43")), (true, String::new()));
        assert_eq!(
            check(&LessThan, Value::bytes(b"43".to_vec()), Value::str("43")),
            (false, "First (string) parameter equals (string) second, expect less".to_string())
        );
        assert_eq!(
            check(&LessThan, Value::str("abc"), Value::str("ABC")),
            (false, NO_LESS_THAN_STRING_ERROR.to_string())
        );
    }

    #[test]
    fn or_equal_variants() {
        assert_eq!(
            check(&MoreOrEqualThan, Value::f32(43.12), Value::f32(43.12)),
            (true, String::new())
        );
        assert_eq!(
            check(&MoreOrEqualThan, Value::int(42), Value::int(43)),
            (false, "Difference: 42 < 43".to_string())
        );
        assert_eq!(
            check(&LessOrEqualThan, Value::int(43), Value::int(42)),
            (false, "Difference: 43 > 42".to_string())
        );
        assert_eq!(
            check(&LessOrEqualThan, Value::bytes(b"421".to_vec()), Value::str("42")),
            (false, NO_LESS_OR_EQUAL_THAN_STRING_ERROR.to_string())
        );
        let max = f64::from(f32::MAX);
        assert_eq!(check(&MoreOrEqualThan, Value::f64(max), Value::f64(max)), (true, String::new()));
        assert_eq!(
            check(&LessOrEqualThan, Value::f64(-max), Value::f64(-max)),
            (true, String::new())
        );
    }

    #[test]
    fn equals_more() {
        assert_eq!(check(&EqualsMore, Value::int(42), Value::int(42)), (true, String::new()));
        assert_eq!(
            check(&EqualsMore, Value::int(43), Value::int32(64)),
            (false, "Difference: 43 != 64".to_string())
        );
        assert_eq!(
            check(&EqualsMore, Value::str("42"), Value::bytes(b"42".to_vec())),
            (true, String::new())
        );
        assert_eq!(
            check(&EqualsMore, Value::str("421"), Value::str("42")),
            (false, NO_EQUALS_MORE_STRING_ERROR.to_string())
        );
        assert_eq!(
            check(&EqualsMore, Value::f32(43.0), Value::uint64(43)),
            (false, "Comparing incomparable type float32 and uint64".to_string())
        );
    }

    #[test]
    fn equals_float32() {
        assert_eq!(check(&EqualsFloat32, Value::int(42), Value::int(42)), (true, String::new()));
        assert_eq!(
            check(&EqualsFloat32, Value::f32(43.0), Value::uint64(43)),
            (true, String::new())
        );
        assert_eq!(
            check(&EqualsFloat32, Value::int(43), Value::int32(64)),
            (false, "Difference: 43 != 64".to_string())
        );
        assert_eq!(
            check(&EqualsFloat32, Value::str("42"), Value::bytes(b"42".to_vec())),
            (false, "Comparing incomparable type as float32: string and []uint8".to_string())
        );
    }
}
