//! Snapshot/restore protocol.
//!
//! A snapshot is a tuple value holding an iterator's progress fields.
//! Restoring parses and validates the whole tuple before touching the
//! iterator, so a rejected snapshot leaves the iterator as it was.

use std::ops::RangeInclusive;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::source::Source;
use crate::value::Value;

/// Iterators whose progress can be captured, restored and copied.
pub trait Resumable: Source {
    /// Tuple describing the current progress. Containers are copied.
    fn capture_state(&self) -> Value;

    /// Replace the progress with `state`. Fails without side effects when
    /// the snapshot is malformed.
    fn restore_state(&mut self, state: &Value) -> Result<()>;

    /// Shallow copy: progress fields are copied, the upstream is shared.
    fn duplicate(&self) -> Self
    where
        Self: Sized;

    /// Deep copy: the upstream is forked and the progress restored from a
    /// fresh snapshot, so both iterators continue independently.
    fn checkpoint(&self) -> Result<Self>
    where
        Self: Sized;
}

/// Validated view over a snapshot tuple.
#[derive(Debug)]
pub(crate) struct StateFields<'a> {
    owner: &'static str,
    items: &'a [Value],
}

fn describe(arity: &RangeInclusive<usize>) -> String {
    if arity.start() == arity.end() {
        format!("exactly {}", arity.start())
    } else {
        format!("{} to {}", arity.start(), arity.end())
    }
}

impl<'a> StateFields<'a> {
    /// Check that `state` is a tuple whose length lies in `arity`.
    pub(crate) fn parse(
        owner: &'static str,
        state: &'a Value,
        arity: RangeInclusive<usize>,
    ) -> Result<Self> {
        let Value::Tuple(items) = state else {
            return Err(Error::StateShape {
                owner,
                got: state.type_name(),
            });
        };
        if !arity.contains(&items.len()) {
            return Err(Error::StateArity {
                owner,
                expected: describe(&arity),
                given: items.len(),
            });
        }
        Ok(Self {
            owner,
            items: &items[..],
        })
    }

    pub(crate) fn get(&self, idx: usize) -> Option<&'a Value> {
        self.items.get(idx)
    }

    pub(crate) fn field_error(&self, field: &'static str, expected: &'static str, got: &Value) -> Error {
        Error::StateField {
            owner: self.owner,
            field,
            expected,
            got: got.type_name(),
        }
    }

    /// Field `idx`, which the arity check guarantees to exist.
    pub(crate) fn value(&self, idx: usize) -> Result<&'a Value> {
        self.items.get(idx).ok_or_else(|| Error::StateArity {
            owner: self.owner,
            expected: format!("at least {}", idx + 1),
            given: self.items.len(),
        })
    }

    pub(crate) fn int(&self, idx: usize, field: &'static str) -> Result<i64> {
        match self.value(idx)? {
            Value::Int(i) => Ok(*i),
            other => Err(self.field_error(field, "int", other)),
        }
    }

    pub(crate) fn tuple(&self, idx: usize, field: &'static str) -> Result<&'a Rc<[Value]>> {
        match self.value(idx)? {
            Value::Tuple(items) => Ok(items),
            other => Err(self.field_error(field, "tuple", other)),
        }
    }

    pub(crate) fn list(&self, idx: usize, field: &'static str) -> Result<&'a [Value]> {
        match self.value(idx)? {
            Value::List(items) => Ok(items.as_slice()),
            other => Err(self.field_error(field, "list", other)),
        }
    }

    pub(crate) fn object<T: 'static>(
        &self,
        idx: usize,
        field: &'static str,
        expected: &'static str,
    ) -> Result<&'a T> {
        let value = self.value(idx)?;
        value
            .downcast_ref::<T>()
            .ok_or_else(|| self.field_error(field, expected, value))
    }

    pub(crate) fn range_error(&self, message: impl Into<String>) -> Error {
        Error::StateRange {
            owner: self.owner,
            message: message.into(),
        }
    }
}
