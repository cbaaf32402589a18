//! Caller-supplied callables: key functions, binary operators and type
//! filters. All of them may fail; failures propagate unchanged.

use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::value::{Kind, Value};

/// One-argument function `f(x)`.
#[derive(Clone)]
pub struct UnaryFn {
    name: &'static str,
    f: Rc<dyn Fn(&Value) -> Result<Value>>,
}

impl UnaryFn {
    /// Wrap an anonymous function.
    pub fn new(f: impl Fn(&Value) -> Result<Value> + 'static) -> Self {
        Self::named("<lambda>", f)
    }

    /// Wrap a function with a display name.
    pub fn named(name: &'static str, f: impl Fn(&Value) -> Result<Value> + 'static) -> Self {
        Self { name, f: Rc::new(f) }
    }

    /// Call the function.
    pub fn call(&self, x: &Value) -> Result<Value> {
        (self.f)(x)
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether both handles refer to the same function object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.f, &other.f)
    }
}

impl fmt::Debug for UnaryFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name)
    }
}

/// Two-argument function `f(x, y)`.
#[derive(Clone)]
pub struct BinaryFn {
    name: &'static str,
    f: Rc<dyn Fn(&Value, &Value) -> Result<Value>>,
}

impl BinaryFn {
    /// Wrap an anonymous function.
    pub fn new(f: impl Fn(&Value, &Value) -> Result<Value> + 'static) -> Self {
        Self::named("<lambda>", f)
    }

    /// Wrap a function with a display name.
    pub fn named(
        name: &'static str,
        f: impl Fn(&Value, &Value) -> Result<Value> + 'static,
    ) -> Self {
        Self { name, f: Rc::new(f) }
    }

    /// `operator.add`
    pub fn add() -> Self {
        Self::named("add", Value::add)
    }

    /// `operator.mul`
    pub fn mul() -> Self {
        Self::named("mul", Value::mul)
    }

    /// Call the function.
    pub fn call(&self, x: &Value, y: &Value) -> Result<Value> {
        (self.f)(x, y)
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether both handles refer to the same function object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.f, &other.f)
    }
}

impl fmt::Debug for BinaryFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name)
    }
}

/// Type membership test, the counterpart of an `isinstance` check.
#[derive(Clone)]
pub enum TypeFilter {
    /// Matches values whose kind is listed.
    Kinds(Vec<Kind>),
    /// Arbitrary, possibly failing predicate.
    Predicate(Rc<dyn Fn(&Value) -> Result<bool>>),
}

impl TypeFilter {
    /// Filter matching a single kind.
    pub fn kind(kind: Kind) -> Self {
        TypeFilter::Kinds(vec![kind])
    }

    /// Filter matching any of the given kinds.
    pub fn kinds(kinds: impl IntoIterator<Item = Kind>) -> Self {
        TypeFilter::Kinds(kinds.into_iter().collect())
    }

    /// Filter backed by a predicate.
    pub fn predicate(f: impl Fn(&Value) -> Result<bool> + 'static) -> Self {
        TypeFilter::Predicate(Rc::new(f))
    }

    /// Whether `value` belongs to the filter.
    pub fn matches(&self, value: &Value) -> Result<bool> {
        match self {
            TypeFilter::Kinds(kinds) => Ok(kinds.contains(&value.kind())),
            TypeFilter::Predicate(f) => f(value),
        }
    }
}

impl fmt::Debug for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::Kinds(kinds) => {
                let names: Vec<_> = kinds.iter().map(|k| k.name()).collect();
                write!(f, "TypeFilter({})", names.join(", "))
            }
            TypeFilter::Predicate(_) => f.write_str("TypeFilter(<predicate>)"),
        }
    }
}
