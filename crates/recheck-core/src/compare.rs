//! Shared ordering and tolerance rules for cross-kind numeric and
//! string-like comparisons.
//!
//! Operands are first classified into the categories signed, unsigned,
//! float32, float64 and string-like. Mixed categories are rejected with the
//! incomparable-type sentinel; string-likes compare byte-wise and
//! case-sensitively; float64 operands strictly beyond the float32
//! representable range abort ordering checks.

use std::cmp::Ordering;

use thiserror::Error;

use crate::render::render;
use crate::value::Value;

pub const NO_LESS_THAN_STRING_ERROR: &str =
    "First (string) parameter doesn't match expected (string) order";
pub const NO_MORE_OR_EQUAL_THAN_STRING_ERROR: &str =
    "First (string) parameter is less than (string) second, expect more or equal";
pub const NO_LESS_OR_EQUAL_THAN_STRING_ERROR: &str =
    "First (string) parameter is more than (string) second, expect less or equal";
pub const NO_EQUALS_MORE_STRING_ERROR: &str =
    "First (string) parameter doesn't equal (string) second";
pub const NO_EQUALS_FLOAT32_MORE_THAN_MAX_FLOAT32_ERROR: &str =
    "Comparing value is more than max float32";
pub const NO_EQUALS_FLOAT32_LESS_THAN_MAX_FLOAT32_ERROR: &str =
    "Comparing value is less than min float32";

const MORE_THAN_EQUAL_STRINGS: &str =
    "First (string) parameter equals (string) second, expect more";
const LESS_THAN_EQUAL_STRINGS: &str =
    "First (string) parameter equals (string) second, expect less";

/// Typed comparison failures; `Display` renders the exact sentinel text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    #[error("Comparing incomparable type {left} and {right}")]
    Incomparable { left: String, right: String },
    /// A float64 operand strictly beyond the float32 representable range.
    #[error("Comparing incomparable type float64 and float32")]
    BeyondFloat32Range,
    #[error("Comparing incomparable type as float32: {left} and {right}")]
    IncomparableAsFloat32 { left: String, right: String },
    #[error("{relation}")]
    StringOrder { relation: &'static str },
    #[error("Difference: {left} {op} {right}")]
    Relation { left: String, op: &'static str, right: String },
    #[error("{0}")]
    Overflow(&'static str),
}

/// Relation a checker expects to hold between its two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    More,
    Less,
    MoreOrEqual,
    LessOrEqual,
}

impl Relation {
    fn holds(self, ord: Ordering) -> bool {
        match self {
            Relation::More => ord == Ordering::Greater,
            Relation::Less => ord == Ordering::Less,
            Relation::MoreOrEqual => ord != Ordering::Less,
            Relation::LessOrEqual => ord != Ordering::Greater,
        }
    }

    /// Operator of the complement relation, the one that actually held when
    /// the check failed.
    fn violated_op(self) -> &'static str {
        match self {
            Relation::More => "<=",
            Relation::Less => ">=",
            Relation::MoreOrEqual => "<",
            Relation::LessOrEqual => ">",
        }
    }

    fn equal_strings_sentinel(self) -> Option<&'static str> {
        match self {
            Relation::More => Some(MORE_THAN_EQUAL_STRINGS),
            Relation::Less => Some(LESS_THAN_EQUAL_STRINGS),
            _ => None,
        }
    }

    fn string_order_sentinel(self) -> &'static str {
        match self {
            Relation::More | Relation::Less => NO_LESS_THAN_STRING_ERROR,
            Relation::MoreOrEqual => NO_MORE_OR_EQUAL_THAN_STRING_ERROR,
            Relation::LessOrEqual => NO_LESS_OR_EQUAL_THAN_STRING_ERROR,
        }
    }
}

enum Category<'a> {
    Signed(i64),
    Unsigned(u64),
    Float32(f32),
    Float64(f64),
    Text(&'a [u8]),
}

fn categorize(v: &Value) -> Option<Category<'_>> {
    match v {
        Value::Int(_, n) => Some(Category::Signed(*n)),
        Value::Uint(_, n) => Some(Category::Unsigned(*n)),
        Value::F32(f) => Some(Category::Float32(*f)),
        Value::F64(f) => Some(Category::Float64(*f)),
        Value::Str(s) => Some(Category::Text(s.as_bytes())),
        Value::Bytes(b) => Some(Category::Text(b)),
        _ => None,
    }
}

fn incomparable(left: &Value, right: &Value) -> CompareError {
    CompareError::Incomparable { left: left.type_name(), right: right.type_name() }
}

fn guard_f64(v: f64) -> Result<(), CompareError> {
    if v.abs() > f64::from(f32::MAX) {
        Err(CompareError::BeyondFloat32Range)
    } else {
        Ok(())
    }
}

/// Applies an ordering relation to two operands under the shared coercion
/// rules. `Ok(())` means the relation holds.
pub fn check_order(rel: Relation, left: &Value, right: &Value) -> Result<(), CompareError> {
    let (Some(a), Some(b)) = (categorize(left), categorize(right)) else {
        return Err(incomparable(left, right));
    };
    let ord = match (a, b) {
        (Category::Signed(x), Category::Signed(y)) => x.cmp(&y),
        (Category::Unsigned(x), Category::Unsigned(y)) => x.cmp(&y),
        (Category::Float32(x), Category::Float32(y)) => {
            x.partial_cmp(&y).ok_or_else(|| incomparable(left, right))?
        }
        (Category::Float64(x), Category::Float64(y)) => {
            guard_f64(x)?;
            guard_f64(y)?;
            x.partial_cmp(&y).ok_or_else(|| incomparable(left, right))?
        }
        (Category::Text(x), Category::Text(y)) => {
            let ord = x.cmp(y);
            return if rel.holds(ord) {
                Ok(())
            } else if ord == Ordering::Equal {
                // Strict relations have a dedicated equality sentinel.
                Err(CompareError::StringOrder {
                    relation: rel.equal_strings_sentinel().unwrap_or(rel.string_order_sentinel()),
                })
            } else {
                Err(CompareError::StringOrder { relation: rel.string_order_sentinel() })
            };
        }
        _ => return Err(incomparable(left, right)),
    };
    if rel.holds(ord) {
        Ok(())
    } else {
        Err(CompareError::Relation {
            left: render(left),
            op: rel.violated_op(),
            right: render(right),
        })
    }
}

/// Width-coercing equality: integers of any width within (and across, when
/// safe) the signed/unsigned categories, floats within their own width, and
/// string-likes byte-wise.
pub fn equals_more(left: &Value, right: &Value) -> Result<(), CompareError> {
    let (Some(a), Some(b)) = (categorize(left), categorize(right)) else {
        return Err(incomparable(left, right));
    };
    let equal = match (a, b) {
        (Category::Signed(x), Category::Signed(y)) => x == y,
        (Category::Unsigned(x), Category::Unsigned(y)) => x == y,
        // Safe cross-sign coercion through a wider integer.
        (Category::Signed(x), Category::Unsigned(y)) => i128::from(x) == i128::from(y),
        (Category::Unsigned(x), Category::Signed(y)) => i128::from(x) == i128::from(y),
        (Category::Float32(x), Category::Float32(y)) => x == y,
        (Category::Float64(x), Category::Float64(y)) => {
            guard_f64(x)?;
            guard_f64(y)?;
            x == y
        }
        (Category::Text(x), Category::Text(y)) => {
            return if x == y {
                Ok(())
            } else {
                Err(CompareError::StringOrder { relation: NO_EQUALS_MORE_STRING_ERROR })
            };
        }
        _ => return Err(incomparable(left, right)),
    };
    if equal {
        Ok(())
    } else {
        Err(CompareError::Relation { left: render(left), op: "!=", right: render(right) })
    }
}

/// Equality after coercing every numeric category to float32. Operands at or
/// beyond the float32 range report dedicated overflow sentinels; string-likes
/// are rejected outright.
pub fn equals_float32(left: &Value, right: &Value) -> Result<(), CompareError> {
    let (Some(fa), Some(fb)) = (numeric_as_f64(left), numeric_as_f64(right)) else {
        return Err(CompareError::IncomparableAsFloat32 {
            left: left.type_name(),
            right: right.type_name(),
        });
    };
    for v in [fa, fb] {
        if v >= f64::from(f32::MAX) {
            return Err(CompareError::Overflow(NO_EQUALS_FLOAT32_MORE_THAN_MAX_FLOAT32_ERROR));
        }
        if v <= -f64::from(f32::MAX) {
            return Err(CompareError::Overflow(NO_EQUALS_FLOAT32_LESS_THAN_MAX_FLOAT32_ERROR));
        }
    }
    if fa as f32 == fb as f32 {
        Ok(())
    } else {
        Err(CompareError::Relation { left: render(left), op: "!=", right: render(right) })
    }
}

fn numeric_as_f64(v: &Value) -> Option<f64> {
    match categorize(v)? {
        Category::Signed(n) => Some(n as f64),
        Category::Unsigned(n) => Some(n as f64),
        Category::Float32(f) => Some(f64::from(f)),
        Category::Float64(f) => Some(f),
        Category::Text(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_categories_are_incomparable() {
        let err = check_order(Relation::More, &Value::int(43342), &Value::f64(f64::from(f32::MAX) + 1000.0))
            .unwrap_err();
        assert_eq!(err.to_string(), "Comparing incomparable type int and float64");
        let err = check_order(Relation::More, &Value::f32(43.12), &Value::uint64(43)).unwrap_err();
        assert_eq!(err.to_string(), "Comparing incomparable type float32 and uint64");
    }

    #[test]
    fn f64_beyond_float32_range_aborts() {
        let big = Value::f64(f64::from(f32::MAX) + 1000.0);
        let err = check_order(Relation::More, &big, &Value::f64(1.0)).unwrap_err();
        assert_eq!(err, CompareError::BeyondFloat32Range);
        // Exactly at the boundary is still comparable.
        let max = Value::f64(f64::from(f32::MAX));
        assert!(check_order(Relation::MoreOrEqual, &max, &max).is_ok());
    }

    #[test]
    fn violated_relation_message() {
        let err =
            check_order(Relation::MoreOrEqual, &Value::int(42), &Value::int(43)).unwrap_err();
        assert_eq!(err.to_string(), "Difference: 42 < 43");
        let err =
            check_order(Relation::LessOrEqual, &Value::int(43), &Value::int(42)).unwrap_err();
        assert_eq!(err.to_string(), "Difference: 43 > 42");
    }

    #[test]
    fn string_sentinels() {
        let err = check_order(Relation::More, &Value::bytes(b"42".to_vec()), &Value::str("42"))
            .unwrap_err();
        assert_eq!(err.to_string(), MORE_THAN_EQUAL_STRINGS);
        let err = check_order(Relation::More, &Value::str("Abc"), &Value::bytes(b"abc".to_vec()))
            .unwrap_err();
        assert_eq!(err.to_string(), NO_LESS_THAN_STRING_ERROR);
        let err = check_order(Relation::MoreOrEqual, &Value::str("42"), &Value::str("421"))
            .unwrap_err();
        assert_eq!(err.to_string(), NO_MORE_OR_EQUAL_THAN_STRING_ERROR);
    }

    #[test]
    fn equals_more_coerces_widths() {
        assert!(equals_more(&Value::uint64(44), &Value::uint64(44)).is_ok());
        assert!(equals_more(&Value::int(7), &Value::uint64(7)).is_ok());
        let err = equals_more(&Value::int(43), &Value::int32(64)).unwrap_err();
        assert_eq!(err.to_string(), "Difference: 43 != 64");
    }

    #[test]
    fn equals_float32_overflow_sentinels() {
        let max = Value::f64(f64::from(f32::MAX));
        let err = equals_float32(&max, &max).unwrap_err();
        assert_eq!(err.to_string(), NO_EQUALS_FLOAT32_MORE_THAN_MAX_FLOAT32_ERROR);
        let min = Value::f64(-f64::from(f32::MAX));
        let err = equals_float32(&min, &min).unwrap_err();
        assert_eq!(err.to_string(), NO_EQUALS_FLOAT32_LESS_THAN_MAX_FLOAT32_ERROR);
    }

    #[test]
    fn equals_float32_coerces_numerics() {
        assert!(equals_float32(&Value::f32(43.0), &Value::uint64(43)).is_ok());
        assert!(equals_float32(&Value::f64(43.12), &Value::f64(43.12)).is_ok());
        let err = equals_float32(&Value::str("42"), &Value::int(42)).unwrap_err();
        assert_eq!(err.to_string(), "Comparing incomparable type as float32: string and int");
    }
}
