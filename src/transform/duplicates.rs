use tracing::debug;

use crate::error::Result;
use crate::func::UnaryFn;
use crate::seen::Seen;
use crate::source::{IterHandle, Source};
use crate::state::{Resumable, StateFields};
use crate::value::Value;

/// Items whose value (or key) already occurred earlier in the source.
#[derive(Debug, Clone)]
pub struct Duplicates {
    source: IterHandle,
    key: Option<UnaryFn>,
    seen: Seen,
}

impl Duplicates {
    /// Report repeats in `source`, comparing `key(item)` when `key` is given.
    pub fn new(source: IterHandle, key: Option<UnaryFn>) -> Self {
        Self {
            source,
            key,
            seen: Seen::new(),
        }
    }

    /// Values (or keys) encountered so far.
    pub fn seen(&self) -> &Seen {
        &self.seen
    }

    /// Key function, if any.
    pub fn key(&self) -> Option<&UnaryFn> {
        self.key.as_ref()
    }
}

impl Source for Duplicates {
    fn type_name(&self) -> &'static str {
        "duplicates"
    }

    fn advance(&mut self) -> Result<Option<Value>> {
        while let Some(item) = self.source.pull()? {
            let key = match &self.key {
                Some(key) => key.call(&item)?,
                None => item.clone(),
            };
            if self.seen.contains_add(key)? {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    fn fork(&self) -> Result<Box<dyn Source>> {
        Ok(Box::new(self.checkpoint()?))
    }
}

impl Resumable for Duplicates {
    fn capture_state(&self) -> Value {
        Value::tuple([Value::from(self.seen.clone())])
    }

    fn restore_state(&mut self, state: &Value) -> Result<()> {
        let fields = StateFields::parse("duplicates", state, 1..=1)?;
        let seen = fields.object::<Seen>(0, "seen", "Seen")?;
        self.seen = seen.clone();
        debug!(seen = self.seen.len(), "duplicates state restored");
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

crate::source::impl_iterator!(Duplicates);
