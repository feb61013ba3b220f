//! Structural diff engine.
//!
//! Recursively compares two values and produces an ordered list of
//! leaf-level mismatches. The empty path denotes a top-level scalar
//! mismatch; struct fields are dotted and indices bracketed, composable as
//! `a[1].b`. Pointers deref transparently and contribute no path segment.

use crate::render::render;
use crate::value::Value;

/// One leaf mismatch: dotted path plus both sides, already rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    pub path: String,
    pub left: String,
    pub right: String,
}

/// Ordered leaf mismatches between two values. Empty means structurally
/// equal.
pub fn diff(left: &Value, right: &Value) -> Vec<DiffEntry> {
    let mut out = Vec::new();
    walk(left, right, "", &mut out);
    out
}

/// Structural equality: the diff is empty.
pub fn deep_eq(left: &Value, right: &Value) -> bool {
    diff(left, right).is_empty()
}

/// Renders a non-empty diff under the fixed `Difference:` header, one line
/// per leaf, trailing newline included.
pub fn render_diff(entries: &[DiffEntry]) -> String {
    let mut out = String::from("Difference:\n");
    for e in entries {
        out.push_str(&format!("...     {}: {} != {}\n", e.path, e.left, e.right));
    }
    out
}

fn leaf(path: &str, left: &Value, right: &Value, out: &mut Vec<DiffEntry>) {
    out.push(DiffEntry { path: path.to_string(), left: render(left), right: render(right) });
}

fn field_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

fn index_path(path: &str, i: usize) -> String {
    format!("{path}[{i}]")
}

fn key_path(path: &str, key: &Value) -> String {
    format!("{path}[{}]", render(key))
}

fn walk(left: &Value, right: &Value, path: &str, out: &mut Vec<DiffEntry>) {
    if left.type_name() != right.type_name() {
        leaf(path, left, right, out);
        return;
    }
    match (left, right) {
        (Value::Nil, Value::Nil) => {}
        (Value::Bool(a), Value::Bool(b)) if a == b => {}
        (Value::Int(_, a), Value::Int(_, b)) if a == b => {}
        (Value::Uint(_, a), Value::Uint(_, b)) if a == b => {}
        (Value::F32(a), Value::F32(b)) if a == b => {}
        (Value::F64(a), Value::F64(b)) if a == b => {}
        (Value::Str(a), Value::Str(b)) if a == b => {}
        (Value::Bytes(a), Value::Bytes(b)) => {
            if a.len() != b.len() {
                leaf(path, left, right, out);
                return;
            }
            for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
                if x != y {
                    out.push(DiffEntry {
                        path: index_path(path, i),
                        left: x.to_string(),
                        right: y.to_string(),
                    });
                }
            }
        }
        (Value::Seq(a), Value::Seq(b)) => {
            if a.len() != b.len() {
                leaf(path, left, right, out);
                return;
            }
            for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
                walk(x, y, &index_path(path, i), out);
            }
        }
        (Value::Struct(a), Value::Struct(b)) => {
            if a.fields.len() != b.fields.len() {
                leaf(path, left, right, out);
                return;
            }
            for ((na, va), (nb, vb)) in a.fields.iter().zip(b.fields.iter()) {
                if na != nb {
                    leaf(path, left, right, out);
                    return;
                }
                walk(va, vb, &field_path(path, na), out);
            }
        }
        (Value::Ptr(a), Value::Ptr(b)) => walk(a, b, path, out),
        (Value::Map(a), Value::Map(b)) => {
            if a.len() != b.len() || !same_key_set(a, b) {
                leaf(path, left, right, out);
                return;
            }
            for (k, va) in a {
                // Key presence was established above.
                if let Some((_, vb)) = b.iter().find(|(kb, _)| deep_eq(k, kb)) {
                    walk(va, vb, &key_path(path, k), out);
                }
            }
        }
        (Value::Chan(_), Value::Chan(_)) => {
            if left.native_eq(right) != Ok(true) {
                leaf(path, left, right, out);
            }
        }
        (Value::Func(a), Value::Func(b)) => {
            if !a.same_func(b) {
                leaf(path, left, right, out);
            }
        }
        // Errors compare structurally by message, not identity.
        (Value::Error(a), Value::Error(b)) => {
            if a.message() != b.message() {
                out.push(DiffEntry {
                    path: path.to_string(),
                    left: a.message().to_string(),
                    right: b.message().to_string(),
                });
            }
        }
        (Value::Iface(a), Value::Iface(b)) => {
            if a.name() != b.name() {
                leaf(path, left, right, out);
            }
        }
        _ => leaf(path, left, right, out),
    }
}

fn same_key_set(a: &[(Value, Value)], b: &[(Value, Value)]) -> bool {
    a.iter().all(|(k, _)| b.iter().any(|(kb, _)| deep_eq(k, kb)))
        && b.iter().all(|(k, _)| a.iter().any(|(ka, _)| deep_eq(k, ka)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn simple(i: i64) -> Value {
        Value::record("simpleStruct", vec![("i", Value::int(i))])
    }

    #[test]
    fn equal_values_have_empty_diff() {
        assert!(deep_eq(&Value::int(42), &Value::int(42)));
        assert!(deep_eq(&simple(1), &simple(1)));
        assert!(deep_eq(&Value::ptr(simple(1)), &Value::ptr(simple(1))));
        assert!(deep_eq(&Value::bytes(vec![1u8, 2]), &Value::bytes(vec![1u8, 2])));
    }

    #[test]
    fn top_level_scalar_mismatch_has_empty_path() {
        let d = diff(&Value::int(42), &Value::int(43));
        assert_eq!(d, vec![DiffEntry { path: "".into(), left: "42".into(), right: "43".into() }]);
    }

    #[test]
    fn differing_widths_are_a_type_mismatch() {
        let d = diff(&Value::int32(42), &Value::int64(42));
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].path, "");
    }

    #[test]
    fn struct_field_path() {
        let d = diff(&simple(1), &simple(2));
        assert_eq!(d, vec![DiffEntry { path: "i".into(), left: "1".into(), right: "2".into() }]);
    }

    #[test]
    fn byte_index_path() {
        let d = diff(&Value::bytes(vec![1u8, 2]), &Value::bytes(vec![1u8, 3]));
        assert_eq!(d, vec![DiffEntry { path: "[1]".into(), left: "2".into(), right: "3".into() }]);
    }

    #[test]
    fn nested_paths_compose() {
        let l = Value::record(
            "outer",
            vec![("items", Value::seq(vec![simple(1), simple(2)]))],
        );
        let r = Value::record(
            "outer",
            vec![("items", Value::seq(vec![simple(1), simple(3)]))],
        );
        let d = diff(&l, &r);
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].path, "items[1].i");
    }

    #[test]
    fn pointer_deref_adds_no_segment() {
        let d = diff(&Value::ptr(simple(1)), &Value::ptr(simple(2)));
        assert_eq!(d[0].path, "i");
    }

    #[test]
    fn length_mismatch_is_a_container_leaf() {
        let d = diff(
            &Value::seq(vec![Value::int(42)]),
            &Value::seq(vec![Value::int(42), Value::int(1)]),
        );
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].path, "");
    }

    #[test]
    fn map_value_mismatch_uses_key_path() {
        let l = Value::map(vec![(Value::str("a"), Value::int(1))]);
        let r = Value::map(vec![(Value::str("a"), Value::int(2))]);
        let d = diff(&l, &r);
        assert_eq!(d, vec![DiffEntry { path: "[a]".into(), left: "1".into(), right: "2".into() }]);
    }

    #[test]
    fn errors_diff_by_message() {
        assert!(deep_eq(&Value::error("x"), &Value::error("x")));
        let d = diff(&Value::error("x"), &Value::error("y"));
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn render_diff_format() {
        let d = diff(&simple(1), &simple(2));
        assert_eq!(render_diff(&d), "Difference:\n...     i: 1 != 2\n");
    }
}
