//! Type identity and interface satisfaction: `FitsTypeOf`, `Implements`.

use crate::value::Value;

use super::{Checker, CheckerInfo, Verdict};

/// The obtained value's concrete type is identical to the sample's. Pointer
/// and value types are distinct, as are integer widths.
pub struct FitsTypeOf;

impl Checker for FitsTypeOf {
    fn info(&self) -> CheckerInfo {
        CheckerInfo::new("FitsTypeOf", &["obtained", "sample"])
    }

    fn check(&self, params: &[Value], _names: &[&str]) -> Verdict {
        if params[1].is_nil() {
            return Verdict::fail_with("Invalid sample value");
        }
        if params[0].is_nil() {
            return Verdict::fail();
        }
        if params[0].type_name() == params[1].type_name() {
            Verdict::pass()
        } else {
            Verdict::fail()
        }
    }
}

/// The obtained value satisfies the interface behind `ifaceptr`, which must
/// be a pointer to an interface-typed variable.
pub struct Implements;

impl Checker for Implements {
    fn info(&self) -> CheckerInfo {
        CheckerInfo::new("Implements", &["obtained", "ifaceptr"])
    }

    fn check(&self, params: &[Value], _names: &[&str]) -> Verdict {
        let iface = match &params[1] {
            Value::Ptr(target) => match target.as_ref() {
                Value::Iface(iface) => iface,
                _ => {
                    return Verdict::fail_with(
                        "ifaceptr should be a pointer to an interface variable",
                    )
                }
            },
            _ => {
                return Verdict::fail_with("ifaceptr should be a pointer to an interface variable")
            }
        };
        if params[0].is_nil() {
            return Verdict::fail();
        }
        if iface.satisfied_by(&params[0]) {
            Verdict::pass()
        } else {
            Verdict::fail()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Interface;

    fn check(c: &dyn Checker, obtained: Value, sample: Value) -> (bool, String) {
        let v = c.check(&[obtained, sample], &["obtained", "sample"]);
        (v.matched, v.diagnostic)
    }

    #[test]
    fn fits_type_of() {
        assert_eq!(check(&FitsTypeOf, Value::int(1), Value::int(0)), (true, String::new()));
        assert_eq!(check(&FitsTypeOf, Value::int(1), Value::int64(0)), (false, String::new()));
        assert_eq!(
            check(&FitsTypeOf, Value::str("a"), Value::str("")),
            (true, String::new())
        );
        let s = Value::record("simpleStruct", vec![("i", Value::int(1))]);
        assert_eq!(check(&FitsTypeOf, s.clone(), s.clone()), (true, String::new()));
        // Pointer and value types are distinct.
        assert_eq!(check(&FitsTypeOf, Value::ptr(s.clone()), s.clone()), (false, String::new()));
        assert_eq!(
            check(&FitsTypeOf, Value::ptr(s.clone()), Value::ptr(s)),
            (true, String::new())
        );
    }

    #[test]
    fn fits_type_of_nil_handling() {
        assert_eq!(
            check(&FitsTypeOf, Value::int(1), Value::Nil),
            (false, "Invalid sample value".to_string())
        );
        assert_eq!(check(&FitsTypeOf, Value::Nil, Value::int(1)), (false, String::new()));
    }

    #[test]
    fn implements() {
        let err_iface = Value::ptr(Value::Iface(Interface::error()));
        assert_eq!(
            check(&Implements, Value::error("boom"), err_iface.clone()),
            (true, String::new())
        );
        assert_eq!(check(&Implements, Value::int(1), err_iface.clone()), (false, String::new()));
        assert_eq!(check(&Implements, Value::Nil, err_iface), (false, String::new()));
    }

    #[test]
    fn implements_requires_an_interface_pointer() {
        let expected = "ifaceptr should be a pointer to an interface variable".to_string();
        assert_eq!(
            check(&Implements, Value::error("boom"), Value::int(1)),
            (false, expected.clone())
        );
        assert_eq!(
            check(&Implements, Value::error("boom"), Value::ptr(Value::int(1))),
            (false, expected)
        );
    }
}
