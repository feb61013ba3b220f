//! Closed value model and kind classifier.
//!
//! Every checker dispatches on this tagged variant instead of ad hoc
//! reflection: a value is classified exactly once into a fixed [`Kind`] and
//! the checkers consume the kind plus the generic accessors (`length`,
//! `type_name`, element/field iteration).

use std::fmt;
use std::sync::Arc;

/// Concrete signed integer width. Part of the concrete type: `int` and
/// `int32` never compare equal under `Equals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    Int,
    I8,
    I16,
    I32,
    I64,
}

impl IntWidth {
    pub fn name(self) -> &'static str {
        match self {
            IntWidth::Int => "int",
            IntWidth::I8 => "int8",
            IntWidth::I16 => "int16",
            IntWidth::I32 => "int32",
            IntWidth::I64 => "int64",
        }
    }
}

/// Concrete unsigned integer width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UintWidth {
    Uint,
    U8,
    U16,
    U32,
    U64,
}

impl UintWidth {
    pub fn name(self) -> &'static str {
        match self {
            UintWidth::Uint => "uint",
            UintWidth::U8 => "uint8",
            UintWidth::U16 => "uint16",
            UintWidth::U32 => "uint32",
            UintWidth::U64 => "uint64",
        }
    }
}

/// Semantic kind of a value. Pure, stateless classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Nil,
    Bool,
    SignedInt,
    UnsignedInt,
    Float32,
    Float64,
    Str,
    Bytes,
    Struct,
    Ptr,
    Seq,
    Map,
    Chan,
    Func,
    Error,
    Iface,
}

/// A named record with ordered fields.
#[derive(Debug, Clone)]
pub struct StructValue {
    pub name: String,
    pub fields: Vec<(String, Value)>,
}

/// A channel-like value: identity plus a buffered length. The nil channel is
/// represented as `Value::Chan(None)`.
#[derive(Debug, Clone)]
pub struct ChanValue {
    id: Arc<()>,
    len: usize,
}

impl ChanValue {
    pub fn new(len: usize) -> Self {
        ChanValue { id: Arc::new(()), len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn same_channel(&self, other: &ChanValue) -> bool {
        Arc::ptr_eq(&self.id, &other.id)
    }
}

/// A zero-argument callable with a declared arity. The panic checkers invoke
/// the body exactly once inside a catch-unwind boundary; a non-zero arity is
/// rejected before invocation.
#[derive(Clone)]
pub struct FuncValue {
    arity: usize,
    body: Arc<dyn Fn() + Send + Sync>,
}

impl FuncValue {
    pub fn new<F: Fn() + Send + Sync + 'static>(body: F) -> Self {
        FuncValue { arity: 0, body: Arc::new(body) }
    }

    /// Models a callable that takes `arity` arguments. It cannot be invoked
    /// by the engine; the panic checkers reject it.
    pub fn with_arity(arity: usize) -> Self {
        FuncValue { arity, body: Arc::new(|| {}) }
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn body(&self) -> Arc<dyn Fn() + Send + Sync> {
        Arc::clone(&self.body)
    }

    pub fn same_func(&self, other: &FuncValue) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for FuncValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuncValue").field("arity", &self.arity).finish()
    }
}

#[derive(Debug)]
struct ErrorInner {
    message: String,
    cause: Option<ErrorValue>,
}

/// An error value with identity, a message, and an optional wrapped cause.
/// Identity survives cloning; two independently constructed errors with the
/// same message are distinct.
#[derive(Debug, Clone)]
pub struct ErrorValue(Arc<ErrorInner>);

impl ErrorValue {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorValue(Arc::new(ErrorInner { message: message.into(), cause: None }))
    }

    /// Wraps `cause` under a new message, like `fmt.Errorf("...: %w", cause)`.
    pub fn wrap(message: impl Into<String>, cause: ErrorValue) -> Self {
        ErrorValue(Arc::new(ErrorInner { message: message.into(), cause: Some(cause) }))
    }

    pub fn message(&self) -> &str {
        &self.0.message
    }

    pub fn cause(&self) -> Option<&ErrorValue> {
        self.0.cause.as_ref()
    }

    pub fn same_error(&self, other: &ErrorValue) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Walks the wrap chain looking for `target` by identity.
    pub fn is(&self, target: &ErrorValue) -> bool {
        let mut cur = Some(self);
        while let Some(e) = cur {
            if e.same_error(target) {
                return true;
            }
            cur = e.cause();
        }
        false
    }
}

/// A named interface with a satisfaction predicate, used by `Implements`.
#[derive(Clone, Copy)]
pub struct Interface {
    name: &'static str,
    satisfies: fn(&Value) -> bool,
}

impl Interface {
    pub const fn new(name: &'static str, satisfies: fn(&Value) -> bool) -> Self {
        Interface { name, satisfies }
    }

    /// The error capability: satisfied by any error value.
    pub fn error() -> Self {
        Interface::new("error", |v| matches!(v, Value::Error(_)))
    }

    /// String-like values: strings and byte sequences.
    pub fn stringer() -> Self {
        Interface::new("Stringer", |v| matches!(v, Value::Str(_) | Value::Bytes(_)))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn satisfied_by(&self, v: &Value) -> bool {
        (self.satisfies)(v)
    }
}

impl fmt::Debug for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interface").field("name", &self.name).finish()
    }
}

/// An arbitrary runtime value, classified by construction.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(IntWidth, i64),
    Uint(UintWidth, u64),
    F32(f32),
    F64(f64),
    Str(String),
    Bytes(Vec<u8>),
    Struct(StructValue),
    Ptr(Arc<Value>),
    Seq(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Chan(Option<ChanValue>),
    Func(FuncValue),
    Error(ErrorValue),
    Iface(Interface),
}

impl Value {
    // Constructors. The default-width integer constructors mirror the host
    // language's untyped literals.

    pub fn int(v: i64) -> Value {
        Value::Int(IntWidth::Int, v)
    }

    pub fn int8(v: i8) -> Value {
        Value::Int(IntWidth::I8, v as i64)
    }

    pub fn int16(v: i16) -> Value {
        Value::Int(IntWidth::I16, v as i64)
    }

    pub fn int32(v: i32) -> Value {
        Value::Int(IntWidth::I32, v as i64)
    }

    pub fn int64(v: i64) -> Value {
        Value::Int(IntWidth::I64, v)
    }

    pub fn uint(v: u64) -> Value {
        Value::Uint(UintWidth::Uint, v)
    }

    pub fn uint8(v: u8) -> Value {
        Value::Uint(UintWidth::U8, v as u64)
    }

    pub fn uint16(v: u16) -> Value {
        Value::Uint(UintWidth::U16, v as u64)
    }

    pub fn uint32(v: u32) -> Value {
        Value::Uint(UintWidth::U32, v as u64)
    }

    pub fn uint64(v: u64) -> Value {
        Value::Uint(UintWidth::U64, v)
    }

    pub fn f32(v: f32) -> Value {
        Value::F32(v)
    }

    pub fn f64(v: f64) -> Value {
        Value::F64(v)
    }

    pub fn str(v: impl Into<String>) -> Value {
        Value::Str(v.into())
    }

    pub fn bytes(v: impl Into<Vec<u8>>) -> Value {
        Value::Bytes(v.into())
    }

    pub fn seq(items: impl Into<Vec<Value>>) -> Value {
        Value::Seq(items.into())
    }

    pub fn map(pairs: impl Into<Vec<(Value, Value)>>) -> Value {
        Value::Map(pairs.into())
    }

    pub fn record(name: impl Into<String>, fields: Vec<(&str, Value)>) -> Value {
        Value::Struct(StructValue {
            name: name.into(),
            fields: fields.into_iter().map(|(n, v)| (n.to_string(), v)).collect(),
        })
    }

    pub fn ptr(target: Value) -> Value {
        Value::Ptr(Arc::new(target))
    }

    pub fn chan() -> Value {
        Value::Chan(Some(ChanValue::new(0)))
    }

    pub fn chan_with_len(len: usize) -> Value {
        Value::Chan(Some(ChanValue::new(len)))
    }

    pub fn nil_chan() -> Value {
        Value::Chan(None)
    }

    pub fn func0<F: Fn() + Send + Sync + 'static>(body: F) -> Value {
        Value::Func(FuncValue::new(body))
    }

    pub fn error(message: impl Into<String>) -> Value {
        Value::Error(ErrorValue::new(message))
    }

    /// The pure classifier: value to semantic kind.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Nil => Kind::Nil,
            Value::Bool(_) => Kind::Bool,
            Value::Int(..) => Kind::SignedInt,
            Value::Uint(..) => Kind::UnsignedInt,
            Value::F32(_) => Kind::Float32,
            Value::F64(_) => Kind::Float64,
            Value::Str(_) => Kind::Str,
            Value::Bytes(_) => Kind::Bytes,
            Value::Struct(_) => Kind::Struct,
            Value::Ptr(_) => Kind::Ptr,
            Value::Seq(_) => Kind::Seq,
            Value::Map(_) => Kind::Map,
            Value::Chan(_) => Kind::Chan,
            Value::Func(_) => Kind::Func,
            Value::Error(_) => Kind::Error,
            Value::Iface(_) => Kind::Iface,
        }
    }

    /// Nil-ness in the interface sense: the untyped nil and the nil channel.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil | Value::Chan(None))
    }

    /// Length for kinds that have a length concept.
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.len()),
            Value::Bytes(b) => Some(b.len()),
            Value::Seq(items) => Some(items.len()),
            Value::Map(pairs) => Some(pairs.len()),
            Value::Chan(c) => Some(c.as_ref().map_or(0, ChanValue::len)),
            _ => None,
        }
    }

    /// Textual form for string-like values; `None` for everything else.
    pub fn text(&self) -> Option<String> {
        match self {
            Value::Str(s) => Some(s.clone()),
            Value::Bytes(b) => Some(String::from_utf8_lossy(b).into_owned()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Concrete type name used verbatim in diagnostics.
    pub fn type_name(&self) -> String {
        match self {
            Value::Nil => "nil".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Int(w, _) => w.name().to_string(),
            Value::Uint(w, _) => w.name().to_string(),
            Value::F32(_) => "float32".to_string(),
            Value::F64(_) => "float64".to_string(),
            Value::Str(_) => "string".to_string(),
            Value::Bytes(_) => "[]uint8".to_string(),
            Value::Struct(s) => s.name.clone(),
            Value::Ptr(target) => format!("*{}", target.type_name()),
            Value::Seq(items) => match items.first() {
                Some(first) => format!("[]{}", first.type_name()),
                None => "[]interface {}".to_string(),
            },
            Value::Map(pairs) => match pairs.first() {
                Some((k, v)) => format!("map[{}]{}", k.type_name(), v.type_name()),
                None => "map[interface {}]interface {}".to_string(),
            },
            Value::Chan(_) => "chan".to_string(),
            Value::Func(_) => "func()".to_string(),
            Value::Error(_) => "error".to_string(),
            Value::Iface(i) => i.name().to_string(),
        }
    }

    /// Native (identity-first) equality, as the host runtime would compare
    /// two interface values of the same concrete type. `Err` carries the
    /// type name of an uncomparable operand.
    pub fn native_eq(&self, other: &Value) -> Result<bool, String> {
        match (self, other) {
            (Value::Nil, Value::Nil) => Ok(true),
            (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
            (Value::Int(wa, a), Value::Int(wb, b)) => Ok(wa == wb && a == b),
            (Value::Uint(wa, a), Value::Uint(wb, b)) => Ok(wa == wb && a == b),
            (Value::F32(a), Value::F32(b)) => Ok(a == b),
            (Value::F64(a), Value::F64(b)) => Ok(a == b),
            (Value::Str(a), Value::Str(b)) => Ok(a == b),
            (Value::Struct(a), Value::Struct(b)) => {
                if a.name != b.name || a.fields.len() != b.fields.len() {
                    return Ok(false);
                }
                for ((na, va), (nb, vb)) in a.fields.iter().zip(b.fields.iter()) {
                    if na != nb {
                        return Ok(false);
                    }
                    match va.native_eq(vb) {
                        Ok(true) => {}
                        Ok(false) => return Ok(false),
                        // An uncomparable field makes the whole struct
                        // uncomparable, reported under the struct's name.
                        Err(_) => return Err(self.type_name()),
                    }
                }
                Ok(true)
            }
            (Value::Ptr(a), Value::Ptr(b)) => Ok(Arc::ptr_eq(a, b)),
            (Value::Chan(a), Value::Chan(b)) => Ok(match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => a.same_channel(b),
                _ => false,
            }),
            (Value::Error(a), Value::Error(b)) => Ok(a.same_error(b)),
            (Value::Bytes(_), _) | (_, Value::Bytes(_)) => Err(self.type_name()),
            (Value::Seq(_), _) | (_, Value::Seq(_)) => Err(self.type_name()),
            (Value::Map(_), _) | (_, Value::Map(_)) => Err(self.type_name()),
            (Value::Func(_), _) | (_, Value::Func(_)) => Err(self.type_name()),
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(Value::Nil.kind(), Kind::Nil);
        assert_eq!(Value::int(1).kind(), Kind::SignedInt);
        assert_eq!(Value::uint64(1).kind(), Kind::UnsignedInt);
        assert_eq!(Value::bytes(vec![1u8]).kind(), Kind::Bytes);
        assert_eq!(Value::nil_chan().kind(), Kind::Chan);
    }

    #[test]
    fn type_names_carry_width() {
        assert_eq!(Value::int(1).type_name(), "int");
        assert_eq!(Value::int32(1).type_name(), "int32");
        assert_eq!(Value::uint64(1).type_name(), "uint64");
        assert_eq!(Value::bytes(vec![1u8, 2]).type_name(), "[]uint8");
        assert_eq!(Value::ptr(Value::record("point", vec![("x", Value::int(0))])).type_name(), "*point");
        assert_eq!(Value::seq(vec![Value::int64(1)]).type_name(), "[]int64");
    }

    #[test]
    fn nil_chan_has_zero_length() {
        assert_eq!(Value::nil_chan().length(), Some(0));
        assert_eq!(Value::chan_with_len(3).length(), Some(3));
        assert!(Value::nil_chan().is_nil());
        assert!(!Value::chan().is_nil());
    }

    #[test]
    fn error_identity_survives_clone() {
        let e1 = ErrorValue::new("my error");
        let e2 = e1.clone();
        assert!(e1.same_error(&e2));
        assert!(!e1.same_error(&ErrorValue::new("my error")));
    }

    #[test]
    fn error_chain_walk() {
        let e1 = ErrorValue::new("my error");
        let e2 = ErrorValue::wrap("level 1 error: my error", e1.clone());
        let e3 = ErrorValue::wrap("level 2 error: level 1 error: my error", e2.clone());
        assert!(e3.is(&e1));
        assert!(e3.is(&e2));
        assert!(!e1.is(&e2));
    }

    #[test]
    fn native_eq_rejects_uncomparable_kinds() {
        let a = Value::bytes(vec![1u8, 2]);
        let b = Value::bytes(vec![1u8, 2]);
        assert_eq!(a.native_eq(&b), Err("[]uint8".to_string()));
    }

    #[test]
    fn pointer_identity() {
        let target = Arc::new(Value::int(1));
        let a = Value::Ptr(Arc::clone(&target));
        let b = Value::Ptr(target);
        assert_eq!(a.native_eq(&b), Ok(true));
        assert_eq!(Value::ptr(Value::int(1)).native_eq(&Value::ptr(Value::int(1))), Ok(false));
    }
}
