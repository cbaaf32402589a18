//! Fallible protocol operations on values: hashing, equality, ordering,
//! arithmetic and iteration.

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::source::{IterHandle, SeqIter, StrIter};

use super::{CompareOp, Value};

#[derive(Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn partial_cmp(self, other: Num) -> Option<Ordering> {
        match (self, other) {
            (Num::Int(a), Num::Int(b)) => Some(a.cmp(&b)),
            (Num::Int(a), Num::Float(b)) => int_cmp_float(a, b),
            (Num::Float(a), Num::Int(b)) => int_cmp_float(b, a).map(Ordering::reverse),
            (Num::Float(a), Num::Float(b)) => a.partial_cmp(&b),
        }
    }
}

/// Exact ordering of an integer against a float, without rounding the
/// integer through `f64`.
fn int_cmp_float(i: i64, f: f64) -> Option<Ordering> {
    // 2^63 is exactly representable; every i64 lies in [-2^63, 2^63)
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() {
        return None;
    }
    if f >= BOUND {
        return Some(Ordering::Less);
    }
    if f < -BOUND {
        return Some(Ordering::Greater);
    }
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => whole.partial_cmp(&f),
        unequal => Some(unequal),
    }
}

fn apply(op: CompareOp, ord: Option<Ordering>) -> bool {
    match (op, ord) {
        (_, None) => false,
        (CompareOp::Lt, Some(o)) => o == Ordering::Less,
        (CompareOp::Le, Some(o)) => o != Ordering::Greater,
        (CompareOp::Gt, Some(o)) => o == Ordering::Greater,
        (CompareOp::Ge, Some(o)) => o != Ordering::Less,
    }
}

fn object_addr(obj: &Rc<dyn super::Object>) -> *const () {
    Rc::as_ptr(obj) as *const ()
}

fn seq_eq(a: &[Value], b: &[Value]) -> Result<bool> {
    if a.len() != b.len() {
        return Ok(false);
    }
    for (x, y) in a.iter().zip(b) {
        if !x.eq_value(y)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn seq_compare(a: &[Value], b: &[Value], op: CompareOp) -> Result<bool> {
    for (x, y) in a.iter().zip(b) {
        if !x.eq_value(y)? {
            return x.rich_compare(y, op);
        }
    }
    Ok(apply(op, Some(a.len().cmp(&b.len()))))
}

impl Value {
    fn numeric(&self) -> Option<Num> {
        match self {
            Value::Bool(b) => Some(Num::Int(i64::from(*b))),
            Value::Int(i) => Some(Num::Int(*i)),
            Value::Float(f) => Some(Num::Float(*f)),
            _ => None,
        }
    }

    fn feed_hash(&self, state: &mut DefaultHasher) -> Result<()> {
        match self {
            Value::None => 0u8.hash(state),
            Value::Bool(b) => {
                1u8.hash(state);
                i64::from(*b).hash(state);
            }
            Value::Int(i) => {
                1u8.hash(state);
                i.hash(state);
            }
            Value::Float(f) => {
                1u8.hash(state);
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                    (*f as i64).hash(state);
                } else {
                    f.to_bits().hash(state);
                }
            }
            Value::Str(s) => {
                2u8.hash(state);
                s.hash(state);
            }
            Value::Tuple(items) => {
                3u8.hash(state);
                items.len().hash(state);
                for item in items.iter() {
                    item.feed_hash(state)?;
                }
            }
            Value::List(_) => return Err(Error::Unhashable("list".to_string())),
            Value::Iter(handle) => {
                4u8.hash(state);
                handle.addr().hash(state);
            }
            Value::Object(obj) => {
                5u8.hash(state);
                obj.hash_value()?.hash(state);
            }
        }
        Ok(())
    }

    /// Hash of the value. Lists (and tuples containing them) report
    /// [`Error::Unhashable`]; objects may fail with anything.
    pub fn hash_value(&self) -> Result<u64> {
        let mut state = DefaultHasher::new();
        self.feed_hash(&mut state)?;
        Ok(state.finish())
    }

    /// Equality. Numbers compare by numeric value across kinds, unrelated
    /// kinds are unequal, objects decide for themselves.
    pub fn eq_value(&self, other: &Value) -> Result<bool> {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) if object_addr(a) == object_addr(b) => Ok(true),
            (Value::Object(a), _) => a.eq_value(other),
            (_, Value::Object(b)) => b.eq_value(self),
            (Value::None, Value::None) => Ok(true),
            (Value::Str(a), Value::Str(b)) => Ok(a == b),
            (Value::Tuple(a), Value::Tuple(b)) => seq_eq(a, b),
            (Value::List(a), Value::List(b)) => seq_eq(a, b),
            (Value::Iter(a), Value::Iter(b)) => Ok(a.ptr_eq(b)),
            _ => match (self.numeric(), other.numeric()) {
                (Some(a), Some(b)) => Ok(a.partial_cmp(b) == Some(Ordering::Equal)),
                _ => Ok(false),
            },
        }
    }

    /// Rich comparison `self op other`.
    pub fn rich_compare(&self, other: &Value, op: CompareOp) -> Result<bool> {
        match (self, other) {
            (Value::Object(a), _) => a.compare(other, op),
            (_, Value::Object(b)) => b.compare(self, op.reflected()),
            (Value::Str(a), Value::Str(b)) => Ok(apply(op, Some(a.cmp(b)))),
            (Value::Tuple(a), Value::Tuple(b)) => seq_compare(a, b, op),
            (Value::List(a), Value::List(b)) => seq_compare(a, b, op),
            _ => match (self.numeric(), other.numeric()) {
                (Some(a), Some(b)) => Ok(apply(op, a.partial_cmp(b))),
                _ => Err(Error::Type(format!(
                    "'{}' not supported between instances of '{}' and '{}'",
                    op.symbol(),
                    self.type_name(),
                    other.type_name()
                ))),
            },
        }
    }

    /// `self < other`
    pub fn lt(&self, other: &Value) -> Result<bool> {
        self.rich_compare(other, CompareOp::Lt)
    }

    /// `self <= other`
    pub fn le(&self, other: &Value) -> Result<bool> {
        self.rich_compare(other, CompareOp::Le)
    }

    /// `self > other`
    pub fn gt(&self, other: &Value) -> Result<bool> {
        self.rich_compare(other, CompareOp::Gt)
    }

    /// `self >= other`
    pub fn ge(&self, other: &Value) -> Result<bool> {
        self.rich_compare(other, CompareOp::Ge)
    }

    fn unsupported_operands(&self, other: &Value, symbol: &str) -> Error {
        Error::Type(format!(
            "unsupported operand type(s) for {symbol}: '{}' and '{}'",
            self.type_name(),
            other.type_name()
        ))
    }

    /// `self + other`: numeric addition or sequence concatenation.
    pub fn add(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Ok(Value::from(format!("{a}{b}"))),
            (Value::Tuple(a), Value::Tuple(b)) => Ok(Value::tuple(a.iter().chain(b.iter()).cloned())),
            (Value::List(a), Value::List(b)) => Ok(Value::list(a.iter().chain(b.iter()).cloned())),
            _ => match (self.numeric(), other.numeric()) {
                (Some(Num::Int(a)), Some(Num::Int(b))) => a
                    .checked_add(b)
                    .map(Value::Int)
                    .ok_or_else(|| Error::Overflow("integer addition overflowed".to_string())),
                (Some(a), Some(b)) => Ok(Value::Float(as_f64(a) + as_f64(b))),
                _ => Err(self.unsupported_operands(other, "+")),
            },
        }
    }

    /// `self * other` on numbers.
    pub fn mul(&self, other: &Value) -> Result<Value> {
        match (self.numeric(), other.numeric()) {
            (Some(Num::Int(a)), Some(Num::Int(b))) => a
                .checked_mul(b)
                .map(Value::Int)
                .ok_or_else(|| Error::Overflow("integer multiplication overflowed".to_string())),
            (Some(a), Some(b)) => Ok(Value::Float(as_f64(a) * as_f64(b))),
            _ => Err(self.unsupported_operands(other, "*")),
        }
    }

    /// Iterator over the value, `Ok(None)` if the value is not iterable.
    /// Failures raised while obtaining the iterator propagate.
    pub fn try_iter(&self) -> Result<Option<IterHandle>> {
        match self {
            Value::Str(s) => Ok(Some(IterHandle::new(StrIter::new(Rc::clone(s))))),
            Value::Tuple(items) => Ok(Some(IterHandle::new(SeqIter::new(Rc::clone(items))))),
            Value::List(items) => Ok(Some(IterHandle::new(SeqIter::new(Rc::from(
                items.as_slice(),
            ))))),
            Value::Iter(handle) => Ok(Some(handle.clone())),
            Value::Object(obj) => obj.iter(),
            Value::None | Value::Bool(_) | Value::Int(_) | Value::Float(_) => Ok(None),
        }
    }

    /// Iterator over the value; non-iterables are a type error.
    pub fn iter(&self) -> Result<IterHandle> {
        self.try_iter()?.ok_or_else(|| {
            Error::Type(format!("'{}' object is not iterable", self.type_name()))
        })
    }
}

fn as_f64(n: Num) -> f64 {
    match n {
        Num::Int(i) => i as f64,
        Num::Float(f) => f,
    }
}
