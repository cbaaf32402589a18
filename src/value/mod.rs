//! Dynamically typed values flowing through the iterators.
//!
//! The iterator engine is agnostic about its items, but several
//! transformations need to ask questions of them: can it be hashed, how does
//! it order against another item, is it a container that can be descended
//! into. `Value` answers those questions with fallible operations so that a
//! failure in the item itself surfaces to the caller unchanged.

mod literal;
mod object;
mod ops;

pub use object::Object;

use std::fmt;
use std::rc::Rc;

use crate::source::IterHandle;

/// Rich comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl CompareOp {
    /// Operator obtained by swapping the operands.
    pub fn reflected(self) -> Self {
        match self {
            CompareOp::Lt => CompareOp::Gt,
            CompareOp::Le => CompareOp::Ge,
            CompareOp::Gt => CompareOp::Lt,
            CompareOp::Ge => CompareOp::Le,
        }
    }

    /// Source-level symbol, used in error messages.
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

/// Kind tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `None`
    None,
    /// `bool`
    Bool,
    /// `int`
    Int,
    /// `float`
    Float,
    /// `str`
    Str,
    /// `tuple`
    Tuple,
    /// `list`
    List,
    /// `iterator`
    Iter,
    /// Caller-defined object type, identified by its type name.
    Object(&'static str),
}

impl Kind {
    /// Type name as shown in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Kind::None => "NoneType",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Str => "str",
            Kind::Tuple => "tuple",
            Kind::List => "list",
            Kind::Iter => "iterator",
            Kind::Object(name) => name,
        }
    }
}

/// A dynamically typed item.
#[derive(Debug, Clone)]
pub enum Value {
    /// Absence of a value.
    None,
    /// Boolean.
    Bool(bool),
    /// Machine integer.
    Int(i64),
    /// Double precision float.
    Float(f64),
    /// Immutable string.
    Str(Rc<str>),
    /// Immutable, shareable sequence.
    Tuple(Rc<[Value]>),
    /// Owned, unhashable sequence. Cloning copies the vector.
    List(Vec<Value>),
    /// Live iterator shared by handle.
    Iter(IterHandle),
    /// Caller-defined object.
    Object(Rc<dyn Object>),
}

impl Value {
    /// Build a string value.
    pub fn str(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }

    /// Build a tuple value.
    pub fn tuple(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Tuple(items.into_iter().collect())
    }

    /// Build a list value.
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    /// Wrap a caller-defined object.
    pub fn object(obj: impl Object + 'static) -> Self {
        Value::Object(Rc::new(obj))
    }

    /// Kind tag of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::None => Kind::None,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::Tuple(_) => Kind::Tuple,
            Value::List(_) => Kind::List,
            Value::Iter(_) => Kind::Iter,
            Value::Object(obj) => Kind::Object(obj.type_name()),
        }
    }

    /// Type name of this value.
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Whether this is `None`.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Integer payload, if this is an `int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Tuple items, if this is a `tuple`.
    pub fn as_tuple(&self) -> Option<&Rc<[Value]>> {
        match self {
            Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Downcast an object value to a concrete type.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        match self {
            Value::Object(obj) => obj.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Strings of exactly one character iterate to themselves and are
    /// therefore treated as atoms when flattening.
    pub fn is_atomic_str(&self) -> bool {
        match self {
            Value::Str(s) => s.chars().nth(1).is_none() && !s.is_empty(),
            _ => false,
        }
    }
}

impl PartialEq for Value {
    /// Structural equality; a failing comparison counts as "not equal".
    /// Use [`Value::eq_value`] to observe the failure.
    fn eq(&self, other: &Self) -> bool {
        self.eq_value(other).unwrap_or(false)
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::None
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<IterHandle> for Value {
    fn from(handle: IterHandle) -> Self {
        Value::Iter(handle)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::None, Into::into)
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, items: &[Value], open: &str, close: &str) -> fmt::Result {
    f.write_str(open)?;
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    if open == "(" && items.len() == 1 {
        f.write_str(",")?;
    }
    f.write_str(close)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) if x.fract() == 0.0 && x.is_finite() => write!(f, "{x:.1}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "'{}'", s.replace('\'', "\\'")),
            Value::Tuple(items) => write_seq(f, items, "(", ")"),
            Value::List(items) => write_seq(f, items, "[", "]"),
            Value::Iter(handle) => write!(f, "<{} object>", handle.type_name()),
            Value::Object(obj) => write!(f, "{obj:?}"),
        }
    }
}
