use tracing::debug;

use crate::error::Result;
use crate::func::UnaryFn;
use crate::source::Source;
use crate::state::{Resumable, StateFields};
use crate::value::Value;

/// Infinite iterator yielding `f(x)`, `f(f(x))`, ...
#[derive(Debug, Clone)]
pub struct ApplyFunc {
    func: UnaryFn,
    current: Value,
}

impl ApplyFunc {
    /// Start the chain at `initial`; `initial` itself is not yielded.
    pub fn new(func: UnaryFn, initial: Value) -> Self {
        Self {
            func,
            current: initial,
        }
    }

    /// Applied function.
    pub fn func(&self) -> &UnaryFn {
        &self.func
    }

    /// Last yielded value, or the initial value before the first pull.
    pub fn current(&self) -> &Value {
        &self.current
    }
}

impl Source for ApplyFunc {
    fn type_name(&self) -> &'static str {
        "applyfunc"
    }

    fn advance(&mut self) -> Result<Option<Value>> {
        let next = self.func.call(&self.current)?;
        self.current = next.clone();
        Ok(Some(next))
    }

    fn fork(&self) -> Result<Box<dyn Source>> {
        Ok(Box::new(self.checkpoint()?))
    }
}

impl Resumable for ApplyFunc {
    fn capture_state(&self) -> Value {
        Value::tuple([self.current.clone()])
    }

    fn restore_state(&mut self, state: &Value) -> Result<()> {
        let fields = StateFields::parse("applyfunc", state, 1..=1)?;
        self.current = fields.value(0)?.clone();
        debug!("applyfunc state restored");
        Ok(())
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn checkpoint(&self) -> Result<Self> {
        let mut copy = self.clone();
        copy.restore_state(&self.capture_state())?;
        Ok(copy)
    }
}

crate::source::impl_iterator!(ApplyFunc);
