use tracing::debug;

use crate::error::Result;
use crate::hint;
use crate::source::{IterHandle, Source};
use crate::state::{Resumable, StateFields};
use crate::value::Value;

/// Source items with a fill value between each pair of neighbours.
#[derive(Debug, Clone)]
pub struct Intersperse {
    source: IterHandle,
    fill: Value,
    started: bool,
    /// Item pulled ahead of the fill value that precedes it.
    pending: Option<Value>,
}

impl Intersperse {
    /// Put `fill` between the items of `source`.
    pub fn new(source: IterHandle, fill: Value) -> Self {
        Self {
            source,
            fill,
            started: false,
            pending: None,
        }
    }

    /// Fill value.
    pub fn fillvalue(&self) -> &Value {
        &self.fill
    }
}

impl Source for Intersperse {
    fn type_name(&self) -> &'static str {
        "intersperse"
    }

    fn advance(&mut self) -> Result<Option<Value>> {
        if let Some(item) = self.pending.take() {
            return Ok(Some(item));
        }
        let Some(item) = self.source.pull()? else {
            return Ok(None);
        };
        if !self.started {
            self.started = true;
            return Ok(Some(item));
        }
        self.pending = Some(item);
        Ok(Some(self.fill.clone()))
    }

    fn length_hint(&self) -> Result<usize> {
        let n = hint::upstream(&self.source)?;
        match (self.started, self.pending.is_some()) {
            (false, _) if n == 0 => Ok(0),
            (false, _) => hint::add(hint::mul(n - 1, 2)?, 1),
            (true, false) => hint::mul(n, 2),
            (true, true) => hint::add(hint::mul(n, 2)?, 1),
        }
    }

    fn fork(&self) -> Result<Box<dyn Source>> {
        Ok(Box::new(self.checkpoint()?))
    }
}

impl Resumable for Intersperse {
    fn capture_state(&self) -> Value {
        let started = Value::Int(i64::from(self.started));
        Value::tuple(std::iter::once(started).chain(self.pending.clone()))
    }

    fn restore_state(&mut self, state: &Value) -> Result<()> {
        let fields = StateFields::parse("intersperse", state, 1..=2)?;
        let started = match fields.int(0, "started")? {
            0 => false,
            1 => true,
            other => {
                return Err(fields.range_error(format!("`started` must be 0 or 1, got {other}")))
            }
        };
        let pending = fields.get(1).cloned();
        if !started && pending.is_some() {
            return Err(fields.range_error(
                "a pending item requires `started` to be 1",
            ));
        }
        self.started = started;
        self.pending = pending;
        debug!(started, "intersperse state restored");
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

crate::source::impl_iterator!(Intersperse);
