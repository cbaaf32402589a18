#![allow(dead_code)]

use std::any::Any;
use std::rc::Rc;

use iterkit::source::SeqIter;
use iterkit::{CompareOp, Error, IterHandle, Object, Resumable, Result, Source, Value};

pub const NEXT_FAILED: &str = "next call failed";
pub const ITER_FAILED: &str = "iter call failed";
pub const HINT_FAILED: &str = "length_hint call failed";

/// Parse a literal, e.g. `v("[1, (2, 3)]")`.
pub fn v(literal: &str) -> Value {
    literal
        .parse()
        .unwrap_or_else(|err| panic!("bad test literal {literal:?}: {err}"))
}

pub fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::Int).collect()
}

pub fn range(n: i64) -> Value {
    Value::list((0..n).map(Value::Int))
}

pub fn next_failed() -> Error {
    Error::raised("ValueError", NEXT_FAILED)
}

pub fn iter_failed() -> Error {
    Error::raised("ValueError", ITER_FAILED)
}

pub fn hint_failed() -> Error {
    Error::raised("ValueError", HINT_FAILED)
}

/// Drain `it`, panicking on failure.
pub fn drain(it: &mut impl Source) -> Vec<Value> {
    it.collect_values().expect("iteration succeeds")
}

/// Check that a checkpoint of `it` continues exactly like `it` itself.
pub fn assert_checkpoint_matches<T: Resumable>(mut it: T) {
    let mut copy = it.checkpoint().expect("checkpoint succeeds");
    let expected = drain(&mut it);
    assert_eq!(drain(&mut copy), expected);
}

/// Restore `state` into `it` and hand it back.
pub fn restored<T: Resumable>(mut it: T, state: &Value) -> T {
    it.restore_state(state).expect("restore succeeds");
    it
}

/// Handle over the given values.
pub fn handle(values: Vec<Value>) -> IterHandle {
    IterHandle::from_values(values)
}

/// Source that yields `1` `offset` times and then fails.
#[derive(Debug, Clone)]
pub struct FailNext {
    pub offset: usize,
}

impl Source for FailNext {
    fn type_name(&self) -> &'static str {
        "FailNext"
    }

    fn advance(&mut self) -> Result<Option<Value>> {
        if self.offset == 0 {
            return Err(next_failed());
        }
        self.offset -= 1;
        Ok(Some(Value::Int(1)))
    }
}

pub fn fail_next(offset: usize) -> Value {
    Value::Iter(IterHandle::new(FailNext { offset }))
}

/// Object whose iteration fails.
#[derive(Debug)]
pub struct FailIter;

impl Object for FailIter {
    fn type_name(&self) -> &'static str {
        "FailIter"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn iter(&self) -> Result<Option<IterHandle>> {
        Err(iter_failed())
    }
}

pub fn fail_iter() -> Value {
    Value::object(FailIter)
}

/// Items whose length hint fails.
#[derive(Debug, Clone)]
pub struct FailLengthHint(pub SeqIter);

impl Source for FailLengthHint {
    fn type_name(&self) -> &'static str {
        "FailLengthHint"
    }

    fn advance(&mut self) -> Result<Option<Value>> {
        self.0.advance()
    }

    fn length_hint(&self) -> Result<usize> {
        Err(hint_failed())
    }
}

pub fn fail_length_hint(values: &[i64]) -> Value {
    Value::Iter(IterHandle::new(FailLengthHint(SeqIter::new(Rc::from(ints(values))))))
}

/// Items with a fixed, arbitrary length hint.
#[derive(Debug, Clone)]
pub struct FixedLengthHint {
    pub items: SeqIter,
    pub hint: usize,
}

impl Source for FixedLengthHint {
    fn type_name(&self) -> &'static str {
        "FixedLengthHint"
    }

    fn advance(&mut self) -> Result<Option<Value>> {
        self.items.advance()
    }

    fn length_hint(&self) -> Result<usize> {
        Ok(self.hint)
    }
}

pub fn fixed_length_hint(values: &[i64], hint: usize) -> Value {
    Value::Iter(IterHandle::new(FixedLengthHint {
        items: SeqIter::new(Rc::from(ints(values))),
        hint,
    }))
}

/// Object whose hash fails with an error other than "unhashable".
#[derive(Debug)]
pub struct NoHash;

impl Object for NoHash {
    fn type_name(&self) -> &'static str {
        "NoHash"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn hash_value(&self) -> Result<u64> {
        Err(Error::raised("ValueError", "bad class"))
    }
}

/// Unhashable object whose equality fails.
#[derive(Debug)]
pub struct NoHashNoEq;

impl Object for NoHashNoEq {
    fn type_name(&self) -> &'static str {
        "NoHashNoEq"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn hash_value(&self) -> Result<u64> {
        Err(Error::Unhashable("NoHashNoEq".to_string()))
    }

    fn eq_value(&self, _other: &Value) -> Result<bool> {
        Err(Error::raised("ValueError", "bad class"))
    }
}

/// Object that keeps every default hook.
#[derive(Debug)]
pub struct Plain;

impl Object for Plain {
    fn type_name(&self) -> &'static str {
        "Plain"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// String-like object whose characters are again string-like objects, so
/// descending into it never bottoms out.
#[derive(Debug, Clone)]
pub struct UserString(pub String);

impl Object for UserString {
    fn type_name(&self) -> &'static str {
        "UserString"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn hash_value(&self) -> Result<u64> {
        Value::str(&self.0).hash_value()
    }

    fn eq_value(&self, other: &Value) -> Result<bool> {
        Ok(other
            .downcast_ref::<UserString>()
            .is_some_and(|other| other.0 == self.0))
    }

    fn iter(&self) -> Result<Option<IterHandle>> {
        let chars = self
            .0
            .chars()
            .map(|c| Value::object(UserString(c.to_string())))
            .collect();
        Ok(Some(IterHandle::from_values(chars)))
    }
}

/// Orders correctly with `<` but fails on `>`.
#[derive(Debug)]
pub struct LtButNoGt(pub i64);

impl Object for LtButNoGt {
    fn type_name(&self) -> &'static str {
        "LtButNoGt"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn compare(&self, other: &Value, op: CompareOp) -> Result<bool> {
        let Some(other) = other.downcast_ref::<LtButNoGt>() else {
            return Err(Error::Type("not comparable".into()));
        };
        match op {
            CompareOp::Lt => Ok(self.0 < other.0),
            CompareOp::Le => Ok(self.0 <= other.0),
            CompareOp::Gt | CompareOp::Ge => Err(Error::raised("ValueError", "no gt!")),
        }
    }
}
