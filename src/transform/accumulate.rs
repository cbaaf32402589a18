use tracing::debug;

use crate::error::Result;
use crate::func::BinaryFn;
use crate::hint;
use crate::source::{IterHandle, Source};
use crate::state::{Resumable, StateFields};
use crate::value::Value;

/// Running totals: yields `total = func(total, item)` for every item, where
/// the first total is either the seed or the first item itself.
#[derive(Debug, Clone)]
pub struct Accumulate {
    source: IterHandle,
    func: Option<BinaryFn>,
    total: Option<Value>,
}

impl Accumulate {
    /// Running sums of `source`.
    pub fn new(source: IterHandle) -> Self {
        Self {
            source,
            func: None,
            total: None,
        }
    }

    /// Combine with `func` instead of addition.
    pub fn with_func(mut self, func: BinaryFn) -> Self {
        self.func = Some(func);
        self
    }

    /// Seed the running total; the first output is `func(initial, first)`.
    pub fn with_initial(mut self, initial: Value) -> Self {
        self.total = Some(initial);
        self
    }

    /// Combining function, `None` when addition is used.
    pub fn func(&self) -> Option<&BinaryFn> {
        self.func.as_ref()
    }

    /// Last yielded total (or the seed before the first pull).
    pub fn current(&self) -> Option<&Value> {
        self.total.as_ref()
    }

    fn combine(&self, total: &Value, item: &Value) -> Result<Value> {
        match &self.func {
            Some(func) => func.call(total, item),
            None => total.add(item),
        }
    }
}

impl Source for Accumulate {
    fn type_name(&self) -> &'static str {
        "accumulate"
    }

    fn advance(&mut self) -> Result<Option<Value>> {
        let Some(item) = self.source.pull()? else {
            return Ok(None);
        };
        let total = match &self.total {
            Some(total) => self.combine(total, &item)?,
            None => item,
        };
        self.total = Some(total.clone());
        Ok(Some(total))
    }

    fn length_hint(&self) -> Result<usize> {
        hint::upstream(&self.source)
    }

    fn fork(&self) -> Result<Box<dyn Source>> {
        Ok(Box::new(self.checkpoint()?))
    }
}

impl Resumable for Accumulate {
    fn capture_state(&self) -> Value {
        Value::tuple(self.total.clone())
    }

    fn restore_state(&mut self, state: &Value) -> Result<()> {
        let fields = StateFields::parse("accumulate", state, 0..=1)?;
        self.total = fields.get(0).cloned();
        debug!(has_total = self.total.is_some(), "accumulate state restored");
        Ok(())
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn checkpoint(&self) -> Result<Self> {
        let mut copy = Self {
            source: self.source.fork()?,
            ..self.clone()
        };
        copy.restore_state(&self.capture_state())?;
        Ok(copy)
    }
}

crate::source::impl_iterator!(Accumulate);

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> IterHandle {
        IterHandle::from_values(values.iter().copied().map(Value::Int).collect())
    }

    #[test]
    fn first_item_starts_the_total() {
        let mut it = Accumulate::new(ints(&[1, 2, 3]));
        assert!(it.current().is_none());
        let out = it.collect_values().unwrap();
        assert_eq!(out, vec![Value::Int(1), Value::Int(3), Value::Int(6)]);
        assert_eq!(it.current(), Some(&Value::Int(6)));
    }

    #[test]
    fn state_holds_the_optional_total() {
        let mut it = Accumulate::new(ints(&[1, 2, 3]));
        assert_eq!(it.capture_state(), Value::tuple([]));
        it.advance().unwrap();
        assert_eq!(it.capture_state(), Value::tuple([Value::Int(1)]));
        it.restore_state(&Value::tuple([Value::Int(10)])).unwrap();
        assert_eq!(it.advance().unwrap(), Some(Value::Int(12)));
    }
}
